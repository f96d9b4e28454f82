// src/transport.rs
//! The two network capabilities the pipeline needs: fetch a page, post a payload.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::TransportError;

const USER_AGENT: &str = concat!("lunch-digest/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the body as text. Non-2xx is an error.
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;

    /// POST `payload` as JSON to `url`. Non-2xx is an error.
    async fn post_json(&self, url: &str, payload: &serde_json::Value)
        -> Result<(), TransportError>;
}

/// Connection-pooled HTTP transport. Clones share the pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::new("<client>", e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::new(url, e.to_string()))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| TransportError::new(url, e.to_string()))?;
        resp.text()
            .await
            .map_err(|e| TransportError::new(url, format!("reading body: {e}")))
    }

    async fn post_json(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), TransportError> {
        self.client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::new(url, e.to_string()))?
            .error_for_status()
            .map_err(|e| TransportError::new(url, e.to_string()))?;
        Ok(())
    }
}
