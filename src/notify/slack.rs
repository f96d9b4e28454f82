// src/notify/slack.rs
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::TransportError;
use crate::transport::Transport;

/// Slack payload for one digest message. Links (`https://…`) are posted as
/// an image block, everything else as plain text.
pub fn format_message(msg: &str, channel: Option<&str>) -> Value {
    let mut payload = if msg.starts_with("https://") {
        json!({
            "blocks": [{
                "type": "image",
                "image_url": msg,
                "alt_text": "Restaurant menu.",
            }]
        })
    } else {
        json!({ "text": msg })
    };
    if let Some(ch) = channel {
        payload["channel"] = Value::String(ch.to_string());
    }
    payload
}

/// One Slack channel behind an incoming webhook.
pub struct SlackChannel {
    hook: String,
    channel: Option<String>,
    transport: Arc<dyn Transport>,
}

impl SlackChannel {
    pub fn new(hook: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            hook: hook.into(),
            channel: None,
            transport,
        }
    }

    pub fn with_channel(mut self, channel: Option<String>) -> Self {
        self.channel = channel;
        self
    }

    async fn post(&self, msg: &str) -> Result<(), TransportError> {
        let payload = format_message(msg, self.channel.as_deref());
        self.transport.post_json(&self.hook, &payload).await
    }

    /// Post the first message and wait for it, then post the rest
    /// concurrently. Every post is attempted; the first error is returned.
    pub async fn send(&self, messages: &[String]) -> Result<(), TransportError> {
        let Some((first, rest)) = messages.split_first() else {
            return Ok(());
        };
        self.post(first).await?;

        let results = join_all(rest.iter().map(|m| self.post(m))).await;
        let failed: Vec<TransportError> = results.into_iter().filter_map(Result::err).collect();
        for e in &failed {
            tracing::warn!(error = %e, "slack post failed");
        }
        match failed.into_iter().next() {
            Some(e) => Err(e),
            None => {
                tracing::info!(messages = messages.len(), "digest posted to slack");
                Ok(())
            }
        }
    }
}
