//! Command handlers and the default responder.
//!
//! A command is a named, zero-argument handler invoked when the incoming
//! message is `/` + name. The registry is populated once by
//! [`BotBuilder`](crate::BotBuilder) and immutable afterwards; there is no
//! runtime registration.

use crate::error::RouteResult;
use std::collections::HashMap;

/// Trait implemented by command handlers.
///
/// A handler takes no input and produces the reply text directly. Closures
/// of type `Fn() -> RouteResult` implement it for free.
pub trait CommandHandler: Send + Sync {
    fn invoke(&self) -> RouteResult;
}

impl<F> CommandHandler for F
where
    F: Fn() -> RouteResult + Send + Sync,
{
    fn invoke(&self) -> RouteResult {
        self()
    }
}

/// Fallback handler invoked when no command matches.
///
/// Closures of type `Fn(&str) -> RouteResult` implement it for free.
pub trait Responder: Send + Sync {
    fn respond(&self, in_message: &str) -> RouteResult;
}

impl<F> Responder for F
where
    F: Fn(&str) -> RouteResult + Send + Sync,
{
    fn respond(&self, in_message: &str) -> RouteResult {
        self(in_message)
    }
}

/// The default responder: echoes the incoming message unchanged.
#[derive(Debug, Default)]
pub struct Echo;

impl Responder for Echo {
    fn respond(&self, in_message: &str) -> RouteResult {
        Ok(in_message.to_string())
    }
}

/// Immutable name-to-handler map.
///
/// Names are case-sensitive and carry no leading slash. Registering the same
/// name twice keeps the last handler.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub(crate) fn insert(&mut self, name: impl Into<String>, handler: Box<dyn CommandHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
