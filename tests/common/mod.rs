// tests/common/mod.rs
// Shared mock sources and transports for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use lunch_digest::transport::Transport;
use lunch_digest::{Menu, MenuDay, Source, SourceError, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub fn day(y: i32, m: u32, d: u32) -> MenuDay {
    MenuDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Where a [`MockSource`] fails, if at all.
#[derive(Clone)]
pub enum Behavior {
    Ok(Vec<&'static str>),
    FailFetch(SourceError),
    FailExtract(SourceError),
    Panic,
    Sleep(Duration, Vec<&'static str>),
}

pub struct MockSource {
    pub name: String,
    pub url: Option<String>,
    pub behavior: Behavior,
}

impl MockSource {
    pub fn new(name: &str, behavior: Behavior) -> Self {
        Self {
            name: name.to_string(),
            url: Some(format!("https://{}.test/menu", name.to_lowercase())),
            behavior,
        }
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<&str> {
        self.url.as_deref()
    }

    async fn fetch(&self, _day: MenuDay) -> Result<String, SourceError> {
        match &self.behavior {
            Behavior::FailFetch(e) => Err(e.clone()),
            Behavior::Panic => panic!("mock source exploded"),
            Behavior::Sleep(d, _) => {
                tokio::time::sleep(*d).await;
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }

    fn extract(&self, _content: &str, _day: MenuDay) -> Result<Menu, SourceError> {
        let mut menu = Menu::new(self.name.as_str());
        match &self.behavior {
            Behavior::Ok(items) | Behavior::Sleep(_, items) => {
                for i in items {
                    menu.add_item(i);
                }
                Ok(menu)
            }
            Behavior::FailExtract(e) => Err(e.clone()),
            _ => Ok(menu),
        }
    }
}

/// Serves canned bodies by URL and records posted payloads.
#[derive(Default)]
pub struct FixtureTransport {
    pub pages: HashMap<String, String>,
    pub posts: Mutex<Vec<(String, Value)>>,
}

impl FixtureTransport {
    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn posted(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::new(url, "HTTP 404 Not Found"))
    }

    async fn post_json(&self, url: &str, payload: &Value) -> Result<(), TransportError> {
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), payload.clone()));
        Ok(())
    }
}
