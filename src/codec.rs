//! Wire representation of a single message exchange.
//!
//! Inbound, the message text travels as the URL-encoded `in_message` query
//! parameter. Outbound, the routed reply is a JSON object with exactly one
//! key, `out_message`.

use serde::{Deserialize, Serialize};

/// Decoded query parameters for `GET /process`.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundQuery {
    /// The raw message text to route.
    pub in_message: String,
}

/// JSON reply body for a routed message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundReply {
    pub out_message: String,
}

impl OutboundReply {
    pub fn new(out_message: impl Into<String>) -> Self {
        Self {
            out_message: out_message.into(),
        }
    }
}
