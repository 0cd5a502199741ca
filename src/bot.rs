//! Bot orchestration and message routing.
//!
//! A [`Bot`] composes zero or more endpoints with a [`Switchboard`], the
//! shared routing core that endpoint workers consult for every incoming
//! message. Routing is synchronous and stateless across calls; no
//! conversation state is kept.

use crate::commands::{CommandHandler, CommandRegistry, Echo, Responder};
use crate::endpoint::Endpoint;
use crate::error::{EndpointError, RouteResult, StopError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Shared routing core handed to every endpoint worker.
///
/// Owns the command registry, the default responder and the access-log
/// toggle. Workers hold it behind a [`Weak`](std::sync::Weak), so a draining
/// worker never keeps a discarded bot alive.
pub struct Switchboard {
    commands: CommandRegistry,
    responder: Box<dyn Responder>,
    logging: AtomicBool,
}

impl Switchboard {
    pub(crate) fn new(commands: CommandRegistry, responder: Box<dyn Responder>) -> Self {
        Self {
            commands,
            responder,
            logging: AtomicBool::new(false),
        }
    }

    /// Route one incoming message to a command or the default responder.
    ///
    /// A message starting with `/` is looked up in the registry by the text
    /// after the slash. A miss is not an error: the message falls through to
    /// the responder as ordinary text.
    ///
    /// Safe to invoke concurrently from any number of endpoint workers.
    pub fn route(&self, in_message: &str) -> RouteResult {
        if let Some(name) = in_message.strip_prefix('/')
            && let Some(handler) = self.commands.get(name)
        {
            return handler.invoke();
        }
        self.responder.respond(in_message)
    }

    /// Whether endpoint workers should emit access logs. Read per request,
    /// never cached at start.
    pub fn logging(&self) -> bool {
        self.logging.load(Ordering::Relaxed)
    }

    pub fn set_logging(&self, enabled: bool) {
        self.logging.store(enabled, Ordering::Relaxed);
    }
}

/// The bot host: endpoints plus routing policy.
pub struct Bot {
    switchboard: Arc<Switchboard>,
    endpoints: Vec<Box<dyn Endpoint>>,
}

impl Bot {
    /// Start building a bot with commands and a custom responder.
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    /// A bot with the echo responder and no commands.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Attach an endpoint. No network side effect; binding happens at
    /// [`run`](Bot::run). Endpoints start in attachment order.
    pub fn add_endpoint(&mut self, endpoint: impl Endpoint + 'static) {
        self.endpoints.push(Box::new(endpoint));
    }

    /// Route a message exactly as an endpoint worker would.
    pub fn route(&self, in_message: &str) -> RouteResult {
        self.switchboard.route(in_message)
    }

    pub fn logging(&self) -> bool {
        self.switchboard.logging()
    }

    /// Toggle per-request access logging. Observed by running workers
    /// without a restart.
    pub fn set_logging(&self, enabled: bool) {
        self.switchboard.set_logging(enabled);
    }

    /// Start every attached endpoint, in attachment order.
    ///
    /// Fail-fast: if an endpoint cannot start, the ones already started by
    /// this call are stopped again before the error is returned. `run` never
    /// partially succeeds.
    pub async fn run(&mut self) -> Result<(), EndpointError> {
        for started in 0..self.endpoints.len() {
            let switchboard = Arc::clone(&self.switchboard);
            if let Err(e) = self.endpoints[started].start(switchboard).await {
                error!(
                    endpoint = started,
                    error = %e,
                    code = e.error_code(),
                    "Endpoint failed to start, rolling back"
                );
                for (i, ep) in self.endpoints[..started].iter_mut().enumerate() {
                    if let Err(stop_err) = ep.stop().await {
                        warn!(endpoint = i, error = %stop_err, "Rollback stop failed");
                    }
                }
                return Err(e);
            }
        }
        info!(endpoints = self.endpoints.len(), "Bot running");
        Ok(())
    }

    /// Stop every attached endpoint, in attachment order, best-effort.
    ///
    /// An error stopping one endpoint does not block stopping the rest; all
    /// failures are collected and returned together after every endpoint has
    /// been attempted. Idempotent: already-idle endpoints are no-ops.
    pub async fn stop(&mut self) -> Result<(), StopError> {
        let mut errors = Vec::new();
        for (i, ep) in self.endpoints.iter_mut().enumerate() {
            if let Err(e) = ep.stop().await {
                warn!(endpoint = i, error = %e, code = e.error_code(), "Endpoint failed to stop");
                errors.push((i, e));
            }
        }
        if errors.is_empty() {
            info!("Bot stopped");
            Ok(())
        } else {
            Err(StopError { errors })
        }
    }

    /// Bound addresses of the currently active endpoints, in attachment
    /// order. Idle endpoints are skipped.
    pub fn addresses(&self) -> Vec<SocketAddr> {
        self.endpoints.iter().filter_map(|ep| ep.address()).collect()
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder assembling the immutable command registry and responder.
///
/// Registration happens here once; the registry cannot change after
/// [`build`](BotBuilder::build).
pub struct BotBuilder {
    commands: CommandRegistry,
    responder: Box<dyn Responder>,
}

impl Default for BotBuilder {
    fn default() -> Self {
        Self {
            commands: CommandRegistry::default(),
            responder: Box::new(Echo),
        }
    }
}

impl BotBuilder {
    /// Register a command under `name` (case-sensitive, no leading slash).
    /// Registering a name twice keeps the last handler.
    pub fn command(mut self, name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        self.commands.insert(name, Box::new(handler));
        self
    }

    /// Replace the default echo responder.
    pub fn responder(mut self, responder: impl Responder + 'static) -> Self {
        self.responder = Box::new(responder);
        self
    }

    pub fn build(self) -> Bot {
        Bot {
            switchboard: Arc::new(Switchboard::new(self.commands, self.responder)),
            endpoints: Vec::new(),
        }
    }
}
