// src/sources/extract/date_lookup.rs
use chrono::NaiveDate;
use scraper::Html;

use super::{items_from, selector, Extract};
use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::element_text;

/// Index of the label containing `date` as `DD.MM.YYYY`.
pub fn locate_date<S: AsRef<str>>(labels: &[S], date: NaiveDate) -> Result<usize, SourceError> {
    let wanted = date.format("%d.%m.%Y").to_string();
    labels
        .iter()
        .position(|l| l.as_ref().contains(&wanted))
        .ok_or(SourceError::DateNotFound(wanted))
}

/// Pages that label each day with its date. Tolerates skipped days and
/// holidays, unlike [`super::TablePaging`].
pub struct DateRowLookup {
    dates: String,
    rows: String,
    rows_per_day: usize,
}

impl DateRowLookup {
    pub fn new(dates: &str, rows: &str, rows_per_day: usize) -> Self {
        Self {
            dates: dates.to_string(),
            rows: rows.to_string(),
            rows_per_day,
        }
    }
}

impl Extract for DateRowLookup {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let date_sel = selector(&self.dates)?;
        let row_sel = selector(&self.rows)?;

        let labels: Vec<String> = doc.select(&date_sel).map(element_text).collect();
        if labels.is_empty() {
            return Err(SourceError::format_changed(format!(
                "no date labels match `{}`",
                self.dates
            )));
        }
        let idx = locate_date(&labels, day.date())?;

        let rows: Vec<String> = doc.select(&row_sel).map(element_text).collect();
        let start = idx * self.rows_per_day;
        if start >= rows.len() {
            return Err(SourceError::DayOutOfRange {
                day: idx,
                available: rows.len() / self.rows_per_day.max(1),
            });
        }
        let end = (start + self.rows_per_day).min(rows.len());
        Ok(items_from(rows[start..end].iter().cloned()))
    }
}
