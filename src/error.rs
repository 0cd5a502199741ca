//! Unified error handling for chatbotd.
//!
//! This module provides the error hierarchy for the bot host, with
//! error-code labels for structured logging.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Endpoint Errors (lifecycle operations)
// ============================================================================

/// Errors raised by endpoint lifecycle operations.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The requested address could not be bound.
    ///
    /// Covers both an explicitly requested port that is already in use and
    /// insufficient privilege for the requested port.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// `start` was called while the endpoint is already active.
    #[error("endpoint already active")]
    AlreadyActive,

    /// The worker did not exit within the stop deadline.
    #[error("worker did not stop within {0:?}")]
    StopTimeout(Duration),

    /// The worker task panicked or was aborted before it could be joined.
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl EndpointError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Bind { .. } => "bind",
            Self::AlreadyActive => "already_active",
            Self::StopTimeout(_) => "stop_timeout",
            Self::Join(_) => "join",
        }
    }
}

// ============================================================================
// Routing Errors (message handling)
// ============================================================================

/// A command or the default responder failed while routing a message.
///
/// Contained by the serving endpoint: the offending request gets a non-200
/// reply and the worker keeps serving subsequent requests.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RouteError {
    message: String,
}

impl RouteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for command handlers and responders.
pub type RouteResult = Result<String, RouteError>;

// ============================================================================
// Aggregated Stop Errors
// ============================================================================

/// Every endpoint stop failure collected from one [`Bot::stop`] call.
///
/// Stopping is best-effort: all endpoints are attempted before the failures
/// are surfaced together. Each entry carries the attachment index of the
/// endpoint that failed.
///
/// [`Bot::stop`]: crate::Bot::stop
#[derive(Debug, Error)]
#[error("failed to stop {} endpoint(s)", errors.len())]
pub struct StopError {
    pub errors: Vec<(usize, EndpointError)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_error_codes() {
        assert_eq!(EndpointError::AlreadyActive.error_code(), "already_active");
        assert_eq!(
            EndpointError::StopTimeout(Duration::from_secs(5)).error_code(),
            "stop_timeout"
        );
        let bind = EndpointError::Bind {
            addr: "127.0.0.1:80".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(bind.error_code(), "bind");
    }

    #[test]
    fn test_bind_error_display_includes_address() {
        let err = EndpointError::Bind {
            addr: "127.0.0.1:6667".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().contains("127.0.0.1:6667"));
    }

    #[test]
    fn test_stop_error_counts_failures() {
        let err = StopError {
            errors: vec![
                (0, EndpointError::AlreadyActive),
                (2, EndpointError::StopTimeout(Duration::from_secs(1))),
            ],
        };
        assert_eq!(err.to_string(), "failed to stop 2 endpoint(s)");
    }
}
