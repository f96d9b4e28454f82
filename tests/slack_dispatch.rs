// tests/slack_dispatch.rs
//
// Dispatch ordering: the header message is acknowledged before any other
// message is posted; the rest go out concurrently and all are attempted.

use async_trait::async_trait;
use lunch_digest::notify::SlackChannel;
use lunch_digest::transport::Transport;
use lunch_digest::TransportError;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Start(String),
    Ack(String),
}

/// Logs start/ack of every post. The header message, and `slow_on` if set,
/// are slow to be acknowledged.
#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<Event>>,
    fail_on: Option<&'static str>,
    slow_on: Option<&'static str>,
}

impl EventLog {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for EventLog {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        Err(TransportError::new(url, "not used"))
    }

    async fn post_json(&self, url: &str, payload: &Value) -> Result<(), TransportError> {
        let text = payload["text"].as_str().unwrap_or("<block>").to_string();
        self.events.lock().unwrap().push(Event::Start(text.clone()));
        if text.starts_with("*Lunches") || self.slow_on == Some(text.as_str()) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.events.lock().unwrap().push(Event::Ack(text.clone()));
        match self.fail_on {
            Some(f) if f == text => Err(TransportError::new(url, "HTTP 500")),
            _ => Ok(()),
        }
    }
}

fn messages() -> Vec<String> {
    vec![
        "*Lunches for Thursday 10.08.2017*\n\n*Iné*\n1. Pizza".to_string(),
        "*A*\n1. Soup".to_string(),
        "*B*\n1. Stew".to_string(),
        "https://img.test/menu.png".to_string(),
    ]
}

#[tokio::test]
async fn first_message_is_acknowledged_before_the_rest_start() {
    let log = Arc::new(EventLog::default());
    let slack = SlackChannel::new("https://hooks.test/T/B/X", log.clone());

    slack.send(&messages()).await.unwrap();

    let events = log.events();
    assert_eq!(events.len(), 8);
    let first = messages()[0].clone();
    assert_eq!(events[0], Event::Start(first.clone()));
    assert_eq!(events[1], Event::Ack(first));

    // Every remaining message was started and acknowledged.
    for m in ["*A*\n1. Soup", "*B*\n1. Stew", "<block>"] {
        assert!(events.contains(&Event::Start(m.to_string())), "{m} not started");
        assert!(events.contains(&Event::Ack(m.to_string())), "{m} not acked");
    }
}

#[tokio::test]
async fn rest_is_posted_concurrently() {
    let log = Arc::new(EventLog {
        slow_on: Some("*A*\n1. Soup"),
        ..Default::default()
    });
    let slack = SlackChannel::new("https://hooks.test/T/B/X", log.clone());

    slack.send(&messages()).await.unwrap();

    let events = log.events();
    let pos = |e: Event| events.iter().position(|x| *x == e).unwrap();
    let a_ack = pos(Event::Ack("*A*\n1. Soup".to_string()));
    // B and the image block start while A is still waiting for its ack.
    assert!(pos(Event::Start("*B*\n1. Stew".to_string())) < a_ack);
    assert!(pos(Event::Start("<block>".to_string())) < a_ack);
    assert!(pos(Event::Ack("*B*\n1. Stew".to_string())) < a_ack);
}

#[tokio::test]
async fn failure_in_the_rest_is_returned_after_all_attempts() {
    let log = Arc::new(EventLog {
        fail_on: Some("*A*\n1. Soup"),
        ..Default::default()
    });
    let slack = SlackChannel::new("https://hooks.test/T/B/X", log.clone());

    let err = slack.send(&messages()).await.unwrap_err();
    assert!(err.to_string().contains("HTTP 500"));
    assert_eq!(log.events().len(), 8);
}

#[tokio::test]
async fn failing_header_stops_dispatch() {
    let log = Arc::new(EventLog {
        fail_on: Some("*Lunches for Thursday 10.08.2017*\n\n*Iné*\n1. Pizza"),
        ..Default::default()
    });
    let slack = SlackChannel::new("https://hooks.test/T/B/X", log.clone());

    assert!(slack.send(&messages()).await.is_err());
    assert_eq!(log.events().len(), 2);
}

#[tokio::test]
async fn nothing_to_send_is_ok() {
    let log = Arc::new(EventLog::default());
    let slack = SlackChannel::new("https://hooks.test/T/B/X", log.clone());
    slack.send(&[]).await.unwrap();
    assert!(log.events().is_empty());
}
