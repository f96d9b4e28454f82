// src/sources/extract/section.rs
use scraper::Html;

use super::{items_from, selector, Extract};
use crate::calendar::{Locale, MenuDay};
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::element_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingMatch {
    StartsWith,
    EndsWith,
}

/// Pages with one section per weekday, each headed by the day's name.
pub struct DaySection {
    sections: String,
    heading: String,
    items: String,
    locale: Locale,
    matching: HeadingMatch,
}

impl DaySection {
    pub fn new(sections: &str, heading: &str, items: &str, locale: Locale) -> Self {
        Self {
            sections: sections.to_string(),
            heading: heading.to_string(),
            items: items.to_string(),
            locale,
            matching: HeadingMatch::StartsWith,
        }
    }

    pub fn matching(mut self, matching: HeadingMatch) -> Self {
        self.matching = matching;
        self
    }

    fn is_day(&self, heading: &str, day_name: &str) -> bool {
        let heading = heading.trim().to_lowercase();
        match self.matching {
            HeadingMatch::StartsWith => heading.starts_with(day_name),
            HeadingMatch::EndsWith => heading.ends_with(day_name),
        }
    }
}

impl Extract for DaySection {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let section_sel = selector(&self.sections)?;
        let heading_sel = selector(&self.heading)?;
        let item_sel = selector(&self.items)?;
        let day_name = self.locale.day_name(day.index()).to_lowercase();

        let section = doc
            .select(&section_sel)
            .find(|s| {
                s.select(&heading_sel)
                    .next()
                    .is_some_and(|h| self.is_day(&element_text(h), &day_name))
            })
            .ok_or_else(|| {
                SourceError::format_changed(format!("no section headed `{day_name}`"))
            })?;

        Ok(items_from(section.select(&item_sel).map(element_text)))
    }
}
