// src/digest.rs
use chrono::NaiveDate;
use std::fmt;

use crate::calendar::{Locale, MenuDay};
use crate::menu::{ItemStyle, Menu};

/// All of today's menus, rendered as chat messages.
///
/// The first menu carries the date header; the others render alone.
#[derive(Debug, Clone)]
pub struct Digest {
    menus: Vec<Menu>,
    reference_date: NaiveDate,
    style: ItemStyle,
    locale: Locale,
    sort_rest: bool,
}

impl Digest {
    pub fn new(menus: Vec<Menu>, reference_date: NaiveDate) -> Self {
        Self {
            menus,
            reference_date,
            style: ItemStyle::default(),
            locale: Locale::default(),
            sort_rest: false,
        }
    }

    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Order menus after the first alphabetically instead of by arrival.
    pub fn sort_rest(mut self, on: bool) -> Self {
        self.sort_rest = on;
        self
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn header(&self) -> String {
        self.locale.header(&MenuDay::new(self.reference_date))
    }

    /// One message per menu.
    pub fn render(&self) -> Vec<String> {
        let Some((first, rest)) = self.menus.split_first() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.menus.len());
        out.push(format!("*{}*\n\n{}", self.header(), first.render(self.style)));

        let mut tail: Vec<String> = rest.iter().map(|m| m.render(self.style)).collect();
        if self.sort_rest {
            tail.sort();
        }
        out.extend(tail);
        out
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().join("\n\n"))
    }
}
