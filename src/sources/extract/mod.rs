// src/sources/extract/mod.rs
//! Extraction policies. Each turns a fetched body into one day's dishes.

pub mod date_lookup;
pub mod day_blocks;
pub mod feed;
pub mod listing;
pub mod paging;
pub mod priced;
pub mod section;

pub use date_lookup::{locate_date, DateRowLookup};
pub use day_blocks::DayBlocks;
pub use feed::FeedMessage;
pub use listing::{PositionalBlock, PostProcess, SelectorList};
pub use paging::{day_slice, TablePaging};
pub use priced::PricedRows;
pub use section::{DaySection, HeadingMatch};

use scraper::Selector;

use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::MenuItem;

/// A site-specific way of reading one day's dishes out of a fetched body.
pub trait Extract: Send + Sync {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError>;
}

/// Compile a CSS selector; a bad selector is reported as layout drift.
pub(crate) fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::format_changed(format!("invalid selector `{css}`: {e:?}")))
}

/// Items from non-empty texts, in order.
pub(crate) fn items_from<I>(texts: I) -> Vec<MenuItem>
where
    I: IntoIterator<Item = String>,
{
    texts
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .map(|t| MenuItem::new(&t))
        .collect()
}
