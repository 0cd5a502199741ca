//! Integration test common infrastructure.
//!
//! Spawns in-process bots with HTTP endpoints on auto-assigned ports and
//! provides a thin request helper.

use chatbotd::{Bot, HttpEndpoint};
use std::net::SocketAddr;

/// Start `bot` with one HTTP endpoint on an auto-assigned loopback port and
/// return the bound address.
#[allow(dead_code)]
pub async fn serve(bot: &mut Bot) -> SocketAddr {
    bot.add_endpoint(HttpEndpoint::new());
    bot.run().await.expect("failed to start bot");
    *bot.addresses().first().expect("endpoint bound")
}

/// Send `in_message` to a bot's `/process` route. The client URL-encodes the
/// message, including a leading slash for command messages.
#[allow(dead_code)]
pub async fn send(addr: SocketAddr, in_message: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("http://{addr}/process"))
        .query(&[("in_message", in_message)])
        .send()
        .await
        .expect("request failed")
}
