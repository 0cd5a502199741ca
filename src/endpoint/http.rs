//! HTTP endpoint.
//!
//! Serves the message-exchange protocol over HTTP. The worker accepts
//! exactly one route, `GET /process?in_message=<url-encoded text>`, routes
//! the decoded message through the bot, and replies `200 OK` with
//! `{"out_message": "<reply>"}`.
//!
//! Negative-path policy: 400 for a missing or undecodable `in_message`
//! parameter, 404 for any other path, 500 when a handler fails. A handler
//! failure is contained to its request; the worker keeps serving.

use crate::bot::Switchboard;
use crate::codec::{InboundQuery, OutboundReply};
use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use async_trait::async_trait;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// An [`Endpoint`] backed by an HTTP listener.
///
/// The default configuration binds the loopback interface on an OS-assigned
/// port: the kernel hands out a free port at bind time, so any number of
/// concurrently started bots get distinct ports without coordination. The
/// bound port is fixed for the active lifetime and reported by
/// [`address`](Endpoint::address); stopping releases it back to the OS.
pub struct HttpEndpoint {
    host: IpAddr,
    port: u16,
    stop_timeout: Duration,
    active: Option<Active>,
}

/// Listener state owned while active.
struct Active {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    worker: JoinHandle<()>,
}

impl HttpEndpoint {
    /// An endpoint on the loopback interface with an auto-assigned port.
    pub fn new() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
            active: None,
        }
    }

    /// Set the bind address.
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Request a fixed port. Port 0 (the default) asks the OS for a free
    /// ephemeral port at bind time.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Bound on how long [`stop`](Endpoint::stop) waits for the worker to
    /// finish its in-flight request and exit.
    pub fn stop_timeout(mut self, timeout: Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }
}

impl Default for HttpEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    async fn start(&mut self, switchboard: Arc<Switchboard>) -> Result<(), EndpointError> {
        if self.active.is_some() {
            return Err(EndpointError::AlreadyActive);
        }

        let requested = SocketAddr::new(self.host, self.port);
        let listener = TcpListener::bind(requested)
            .await
            .map_err(|source| EndpointError::Bind {
                addr: requested,
                source,
            })?;
        let addr = listener
            .local_addr()
            .map_err(|source| EndpointError::Bind {
                addr: requested,
                source,
            })?;

        let state = EndpointState {
            switchboard: Arc::downgrade(&switchboard),
            addr,
        };
        let app = axum::Router::new()
            .route("/process", get(process))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let worker = tokio::spawn(async move {
            // The shutdown future also resolves if the sender is dropped, so
            // dropping an active endpoint still winds the worker down.
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                error!(%addr, error = %e, "HTTP endpoint worker failed");
            }
        });

        info!(%addr, "HTTP endpoint listening");
        self.active = Some(Active {
            addr,
            shutdown: Some(shutdown_tx),
            worker,
        });
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), EndpointError> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };

        if let Some(tx) = active.shutdown.take() {
            let _ = tx.send(());
        }

        match tokio::time::timeout(self.stop_timeout, &mut active.worker).await {
            Ok(joined) => {
                joined?;
                info!(addr = %active.addr, "HTTP endpoint stopped");
                Ok(())
            }
            Err(_) => {
                // Cooperative shutdown only: the worker is left to finish its
                // in-flight request and exit on its own. The deadline bounds
                // this call, not the worker.
                Err(EndpointError::StopTimeout(self.stop_timeout))
            }
        }
    }

    fn address(&self) -> Option<SocketAddr> {
        self.active.as_ref().map(|a| a.addr)
    }
}

/// Per-worker handler state.
#[derive(Clone)]
struct EndpointState {
    /// Non-owning back-reference to the routing core.
    switchboard: Weak<Switchboard>,
    addr: SocketAddr,
}

/// Handler for `GET /process`.
async fn process(
    State(state): State<EndpointState>,
    Query(query): Query<InboundQuery>,
) -> Response {
    let Some(switchboard) = state.switchboard.upgrade() else {
        // The owning bot is gone while the worker drains.
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    let routed = switchboard.route(&query.in_message);
    let status = if routed.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    // The flag is read per request, never cached at start.
    if switchboard.logging() {
        let addr = state.addr;
        let in_message = query.in_message.clone();
        // Logged off the request path; delivery may lag the response.
        tokio::spawn(async move {
            info!(
                target: "chatbotd::access",
                %addr,
                in_message = %in_message,
                status = status.as_u16(),
                "GET /process"
            );
        });
    }

    match routed {
        Ok(reply) => Json(OutboundReply::new(reply)).into_response(),
        Err(e) => {
            error!(addr = %state.addr, error = %e, "Routing failed");
            status.into_response()
        }
    }
}
