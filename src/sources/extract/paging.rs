// src/sources/extract/paging.rs
use scraper::Html;

use super::{items_from, selector, Extract};
use crate::calendar::{MenuDay, WORKDAYS};
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::element_text;

/// Split `items` into five equal Mon–Fri blocks and return the one for `day`.
/// A remainder (`len % 5`) is left out; fewer than five items is layout drift.
pub fn day_slice<T>(items: &[T], day: usize) -> Result<&[T], SourceError> {
    let block = items.len() / WORKDAYS;
    if block == 0 {
        return Err(SourceError::format_changed(format!(
            "expected at least {WORKDAYS} rows, found {}",
            items.len()
        )));
    }
    if day >= WORKDAYS {
        return Err(SourceError::DayOutOfRange {
            day,
            available: WORKDAYS,
        });
    }
    if items.len() % WORKDAYS != 0 {
        tracing::debug!(rows = items.len(), "row count not divisible by 5; ignoring remainder");
    }
    let start = block * day;
    Ok(&items[start..start + block])
}

/// A weekly table where every day has the same number of dish cells.
pub struct TablePaging {
    cells: String,
    attr_filter: Option<(String, Vec<String>)>,
}

impl TablePaging {
    pub fn new(cells: &str) -> Self {
        Self {
            cells: cells.to_string(),
            attr_filter: None,
        }
    }

    /// Only count cells whose `attr` is one of `values` (e.g. `colspan` 5 or 6).
    pub fn with_attr(mut self, attr: &str, values: &[&str]) -> Self {
        self.attr_filter = Some((
            attr.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    fn keeps(&self, value: Option<&str>) -> bool {
        match &self.attr_filter {
            None => true,
            Some((_, allowed)) => value.is_some_and(|v| allowed.iter().any(|a| a == v)),
        }
    }
}

impl Extract for TablePaging {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let sel = selector(&self.cells)?;
        let attr = self.attr_filter.as_ref().map(|(a, _)| a.as_str());

        let rows: Vec<String> = doc
            .select(&sel)
            .filter(|td| self.keeps(attr.and_then(|a| td.value().attr(a))))
            .map(element_text)
            .collect();

        let today = day_slice(&rows, day.index())?;
        Ok(items_from(today.iter().cloned()))
    }
}
