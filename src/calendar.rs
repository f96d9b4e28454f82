// src/calendar.rs
//! The run's "today" and the localized day names used by headers and parsers.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days with a lunch menu (Mon–Fri).
pub const WORKDAYS: usize = 5;

/// The day every source extracts for. Derived once per run so all sources agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuDay {
    date: NaiveDate,
}

impl MenuDay {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// 0 = Monday .. 6 = Sunday.
    pub fn index(&self) -> usize {
        self.date.weekday().num_days_from_monday() as usize
    }

    pub fn is_workday(&self) -> bool {
        self.index() < WORKDAYS
    }

    /// `DD.MM.YYYY`, as printed on menus and in the digest header.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }
}

const EN_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const SK_DAYS: [&str; 7] = [
    "pondelok", "utorok", "streda", "štvrtok", "piatok", "sobota", "nedeľa",
];

// accusative ("v stredu")
const SK_DAYS_ACC: [&str; 7] = [
    "pondelok", "utorok", "stredu", "štvrtok", "piatok", "sobotu", "nedeľu",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "sk")]
    Slovak,
}

impl Locale {
    pub fn day_name(self, index: usize) -> &'static str {
        let names = match self {
            Locale::English => &EN_DAYS,
            Locale::Slovak => &SK_DAYS,
        };
        names[index % 7]
    }

    /// Digest header without markup, e.g. `Lunches for Thursday 10.08.2017`.
    pub fn header(self, day: &MenuDay) -> String {
        match self {
            Locale::English => format!(
                "Lunches for {} {}",
                self.day_name(day.index()),
                day.formatted_date()
            ),
            Locale::Slovak => format!(
                "Obedy v {} {}",
                SK_DAYS_ACC[day.index()],
                day.formatted_date()
            ),
        }
    }
}
