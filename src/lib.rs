//! chatbotd - a minimal chatbot host with pluggable transport endpoints.
//!
//! A [`Bot`] composes zero or more [`Endpoint`]s with an immutable command
//! registry and a default responder. Each endpoint owns its own listener and
//! worker task; the bot orchestrates start/stop across all of them and owns
//! the routing policy: a message `/name` invokes the command registered under
//! `name`, anything else goes to the default responder.
//!
//! ```no_run
//! use chatbotd::{Bot, HttpEndpoint};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut bot = Bot::builder()
//!     .command("start", || Ok("Welcome!".to_string()))
//!     .build();
//! bot.add_endpoint(HttpEndpoint::new());
//! bot.run().await?;
//! // GET /process?in_message=%2Fstart -> {"out_message":"Welcome!"}
//! bot.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod codec;
pub mod commands;
pub mod config;
pub mod endpoint;
pub mod error;

pub use bot::{Bot, BotBuilder, Switchboard};
pub use commands::{CommandHandler, CommandRegistry, Echo, Responder};
pub use endpoint::{Endpoint, HttpEndpoint};
pub use error::{EndpointError, RouteError, RouteResult, StopError};
