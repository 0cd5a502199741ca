//! Integration tests for the HTTP exchange protocol.
//!
//! Full round trips against a live endpoint: query-string in, JSON out,
//! command dispatch, and the negative-path status policy.

mod common;

use chatbotd::codec::OutboundReply;
use chatbotd::error::RouteError;
use chatbotd::Bot;
use common::{send, serve};

#[tokio::test]
async fn test_default_echo_roundtrip() {
    let mut bot = Bot::new();
    let addr = serve(&mut bot).await;

    for message in ["hello", "another message"] {
        let response = send(addr, message).await;
        assert_eq!(response.status(), 200);

        let reply: OutboundReply = response.json().await.unwrap();
        assert_eq!(reply.out_message, message);
    }

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_reply_is_json() {
    let mut bot = Bot::new();
    let addr = serve(&mut bot).await;

    let response = send(addr, "hello").await;
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));
    assert_eq!(response.text().await.unwrap(), r#"{"out_message":"hello"}"#);

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_custom_responder_reverses() {
    let mut bot = Bot::builder()
        .responder(|m: &str| Ok(m.chars().rev().collect()))
        .build();
    let addr = serve(&mut bot).await;

    let response = send(addr, "hello").await;
    assert_eq!(response.status(), 200);
    let reply: OutboundReply = response.json().await.unwrap();
    assert_eq!(reply.out_message, "olleh");

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_command_over_http() {
    let mut bot = Bot::builder()
        .command("start", || Ok("Welcome!".to_string()))
        .responder(|m: &str| Ok(m.chars().rev().collect()))
        .build();
    let addr = serve(&mut bot).await;

    // The client URL-encodes "/start" as %2Fstart.
    let response = send(addr, "/start").await;
    assert_eq!(response.status(), 200);
    let reply: OutboundReply = response.json().await.unwrap();
    assert_eq!(reply.out_message, "Welcome!");

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_command_falls_through_over_http() {
    let mut bot = Bot::builder()
        .command("start", || Ok("Welcome!".to_string()))
        .build();
    let addr = serve(&mut bot).await;

    // Unrecognized /commands are routed as ordinary text, not rejected.
    let response = send(addr, "/help").await;
    assert_eq!(response.status(), 200);
    let reply: OutboundReply = response.json().await.unwrap();
    assert_eq!(reply.out_message, "/help");

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let mut bot = Bot::new();
    let addr = serve(&mut bot).await;

    let response = reqwest::get(format!("http://{addr}/other")).await.unwrap();
    assert_eq!(response.status(), 404);

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_missing_parameter_is_400() {
    let mut bot = Bot::new();
    let addr = serve(&mut bot).await;

    let response = reqwest::get(format!("http://{addr}/process"))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_handler_error_is_500_and_worker_survives() {
    let mut bot = Bot::builder()
        .command("boom", || Err(RouteError::new("handler failed")))
        .build();
    let addr = serve(&mut bot).await;

    let response = send(addr, "/boom").await;
    assert_eq!(response.status(), 500);

    // The failure stays contained to its request.
    let response = send(addr, "still alive").await;
    assert_eq!(response.status(), 200);
    let reply: OutboundReply = response.json().await.unwrap();
    assert_eq!(reply.out_message, "still alive");

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_requests_one_endpoint() {
    let mut bot = Bot::new();
    let addr = serve(&mut bot).await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        tasks.push(tokio::spawn(async move {
            let message = format!("message-{i}");
            let response = send(addr, &message).await;
            assert_eq!(response.status(), 200);
            let reply: OutboundReply = response.json().await.unwrap();
            assert_eq!(reply.out_message, message);
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    bot.stop().await.unwrap();
}

#[tokio::test]
async fn test_two_endpoints_one_bot() {
    let mut bot = Bot::new();
    bot.add_endpoint(chatbotd::HttpEndpoint::new());
    bot.add_endpoint(chatbotd::HttpEndpoint::new());
    bot.run().await.unwrap();

    let addrs = bot.addresses();
    assert_eq!(addrs.len(), 2);
    assert_ne!(addrs[0], addrs[1]);

    // Both listeners route through the same switchboard.
    for addr in addrs {
        let response = send(addr, "hello").await;
        assert_eq!(response.status(), 200);
        let reply: OutboundReply = response.json().await.unwrap();
        assert_eq!(reply.out_message, "hello");
    }

    bot.stop().await.unwrap();
}
