// src/sources/mod.rs
//! Menu sources: where a restaurant's menu comes from and how it is read.

pub mod extract;
pub mod restaurants;
pub mod safe;
pub mod text;

pub use safe::SafeSource;

use async_trait::async_trait;
use std::sync::Arc;

use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::Menu;
use crate::transport::Transport;
use extract::Extract;

/// Whatever a source fetched for today (page HTML, feed XML, or nothing).
pub type RawContent = String;

#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;

    /// Where a human can check the menu by hand.
    fn reference(&self) -> Option<&str>;

    async fn fetch(&self, day: MenuDay) -> Result<RawContent, SourceError>;

    fn extract(&self, content: &str, day: MenuDay) -> Result<Menu, SourceError>;
}

/// Fixed list of entries; no I/O, never fails.
pub struct StaticSource {
    name: String,
    entries: Vec<String>,
}

impl StaticSource {
    pub fn new(name: &str, entries: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Source for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<&str> {
        None
    }

    async fn fetch(&self, _day: MenuDay) -> Result<RawContent, SourceError> {
        Ok(RawContent::new())
    }

    fn extract(&self, _content: &str, _day: MenuDay) -> Result<Menu, SourceError> {
        let mut menu = Menu::new(self.name.as_str());
        for e in &self.entries {
            menu.add_item(e);
        }
        Ok(menu)
    }
}

/// A restaurant we only link to; its menu cannot be read automatically.
pub struct UnsupportedSource {
    name: String,
    url: String,
}

impl UnsupportedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Source for UnsupportedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<&str> {
        Some(&self.url)
    }

    async fn fetch(&self, _day: MenuDay) -> Result<RawContent, SourceError> {
        Err(SourceError::Unsupported)
    }

    fn extract(&self, _content: &str, _day: MenuDay) -> Result<Menu, SourceError> {
        Err(SourceError::Unsupported)
    }
}

/// A web page (or feed) read through the shared transport and parsed by an
/// [`Extract`] policy.
pub struct WebSource {
    name: String,
    url: String,
    transport: Arc<dyn Transport>,
    extractor: Box<dyn Extract>,
}

impl WebSource {
    pub fn new(
        name: &str,
        url: &str,
        transport: Arc<dyn Transport>,
        extractor: impl Extract + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            transport,
            extractor: Box::new(extractor),
        }
    }
}

#[async_trait]
impl Source for WebSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<&str> {
        Some(&self.url)
    }

    async fn fetch(&self, _day: MenuDay) -> Result<RawContent, SourceError> {
        Ok(self.transport.fetch(&self.url).await?)
    }

    fn extract(&self, content: &str, day: MenuDay) -> Result<Menu, SourceError> {
        let mut menu = Menu::new(self.name.as_str());
        for item in self.extractor.extract(content, day)? {
            menu.push(item);
        }
        Ok(menu)
    }
}

