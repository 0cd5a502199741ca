//! Transport endpoints.
//!
//! An endpoint owns its listener resource and worker task, turning external
//! requests into routed messages and routed replies into responses. Each
//! transport is a separate implementation of [`Endpoint`]; HTTP is the one
//! shipped here.

mod http;

pub use http::HttpEndpoint;

use crate::bot::Switchboard;
use crate::error::EndpointError;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;

/// Capability set shared by all transports: start, stop, describe-address.
///
/// Lifecycle is idle → active → idle. `start` on an active endpoint is an
/// error; `stop` on an idle endpoint is a no-op. An endpoint stopped and
/// restarted reallocates its resources (a fresh bind, possibly a fresh
/// auto-assigned port).
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Bind the listener and spawn the worker serving requests against
    /// `switchboard`.
    ///
    /// Fails with [`EndpointError::AlreadyActive`] if called again without an
    /// intervening [`stop`](Endpoint::stop), or with
    /// [`EndpointError::Bind`] if the address cannot be bound.
    async fn start(&mut self, switchboard: Arc<Switchboard>) -> Result<(), EndpointError>;

    /// Signal the worker, close the listener, and join the worker within a
    /// bounded wait.
    ///
    /// Cooperative: an in-flight request is allowed to complete, nothing is
    /// forcibly killed before the stop deadline. Idempotent.
    async fn stop(&mut self) -> Result<(), EndpointError>;

    /// The bound address while active, `None` while idle.
    fn address(&self) -> Option<SocketAddr>;
}
