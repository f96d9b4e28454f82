// src/sources/extract/feed.rs
use quick_xml::de::from_str;
use serde::Deserialize;

use super::{DayBlocks, Extract};
use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::MenuItem;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
}

/// Restaurants that post the weekly menu as a message (RSS feed of their
/// page). The newest message is split into day blocks.
pub struct FeedMessage {
    blocks: DayBlocks,
}

impl FeedMessage {
    pub fn new(blocks: DayBlocks) -> Self {
        Self { blocks }
    }

    /// Body of the newest item (feeds list newest first).
    pub fn latest_message(xml: &str) -> Result<String, SourceError> {
        let xml_clean = scrub_html_entities_for_xml(xml);
        let rss: Rss = from_str(&xml_clean)
            .map_err(|e| SourceError::format_changed(format!("unreadable feed: {e}")))?;

        rss.channel
            .item
            .into_iter()
            .find_map(|it| {
                it.description
                    .filter(|d| !d.trim().is_empty())
                    .or(it.title.filter(|t| !t.trim().is_empty()))
            })
            .ok_or_else(|| SourceError::format_changed("feed has no messages"))
    }
}

impl Extract for FeedMessage {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let message = Self::latest_message(body)?;
        self.blocks.extract(&message, day)
    }
}

// XML knows only five named entities; feeds embed HTML ones.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
