//! chatbotd - minimal chatbot host.
//!
//! Binary glue around the library: loads configuration, builds an echoing
//! bot with the configured HTTP endpoints, and serves until ctrl-c.

use anyhow::Context as _;
use chatbotd::config::Config;
use chatbotd::{Bot, HttpEndpoint};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(name = %config.server.name, "Starting chatbotd");

    let mut bot = Bot::builder()
        .command("ping", || Ok("pong".to_string()))
        .build();
    bot.set_logging(config.server.logging);

    if config.http.is_empty() {
        bot.add_endpoint(HttpEndpoint::new());
    } else {
        for http in &config.http {
            bot.add_endpoint(HttpEndpoint::new().host(http.host).port(http.port));
        }
    }

    bot.run().await.context("failed to start endpoints")?;
    for addr in bot.addresses() {
        info!(%addr, "Serving");
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    if let Err(e) = bot.stop().await {
        error!(error = %e, "Some endpoints failed to stop");
    }

    Ok(())
}
