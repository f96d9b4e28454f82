// src/sources/extract/day_blocks.rs
use once_cell::sync::OnceCell;
use regex::{Captures, Regex};

use super::Extract;
use crate::calendar::{Locale, MenuDay, WORKDAYS};
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::html_to_lines;

/// A weekly text post with one block per day, each introduced by a line
/// starting with the day name (`Pondelok:`, `Utorok 2.1.`, `Streda: Rizoto`).
/// Text after the marker is the block's first dish.
///
/// A block ends at the next day marker or at the first blank line after a
/// dish. Dish lines lose list markers, portion weights (`300/140g`) and
/// trailing allergen codes (`(1,3,7)`).
pub struct DayBlocks {
    locale: Locale,
    marker: Regex,
}

impl DayBlocks {
    pub fn new(locale: Locale) -> Self {
        let names: Vec<String> = (0..WORKDAYS)
            .map(|i| regex::escape(locale.day_name(i)))
            .collect();
        // name, optional `:`/`-`, optional `D.M.` or `D.M.YYYY`, optional `:`/`-`, rest
        let pattern = format!(
            r"(?i)^\s*({})\b\s*[:\-–]?\s*(?:\d{{1,2}}\.\s*\d{{1,2}}\.(?:\s*\d{{2,4}})?)?\s*[:\-–]?\s*(.*)$",
            names.join("|")
        );
        let marker = Regex::new(&pattern).expect("day marker regex");
        Self { locale, marker }
    }

    /// Weekday index and whatever follows the marker on the same line.
    fn marker_day<'a>(&self, line: &'a str) -> Option<(usize, &'a str)> {
        let caps = self.marker.captures(line)?;
        let name = caps.get(1)?.as_str().to_lowercase();
        let rest = caps.get(2).map_or("", |m| m.as_str());
        (0..WORKDAYS)
            .find(|&i| self.locale.day_name(i).to_lowercase() == name)
            .map(|d| (d, rest))
    }

    /// Group dish lines by weekday.
    pub fn split(&self, text: &str) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<String>> = vec![Vec::new(); WORKDAYS];
        let mut current: Option<usize> = None;

        for line in html_to_lines(text) {
            if let Some((d, rest)) = self.marker_day(&line) {
                current = Some(d);
                let dish = clean_dish(rest);
                if !dish.is_empty() {
                    groups[d].push(dish);
                }
                continue;
            }
            let Some(d) = current else { continue };
            if line.trim().is_empty() {
                if !groups[d].is_empty() {
                    current = None;
                }
                continue;
            }
            let dish = clean_dish(&line);
            if !dish.is_empty() {
                groups[d].push(dish);
            }
        }
        groups
    }
}

impl Extract for DayBlocks {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let idx = day.index();
        if idx >= WORKDAYS {
            return Err(SourceError::DayOutOfRange {
                day: idx,
                available: WORKDAYS,
            });
        }
        let mut groups = self.split(body);
        let today = std::mem::take(&mut groups[idx]);
        if today.is_empty() {
            return Err(SourceError::format_changed(format!(
                "no block for `{}`",
                self.locale.day_name(idx)
            )));
        }
        Ok(today.iter().map(|t| MenuItem::new(t)).collect())
    }
}

fn clean_dish(line: &str) -> String {
    static RE_BULLET: OnceCell<Regex> = OnceCell::new();
    static RE_NUMBER: OnceCell<Regex> = OnceCell::new();
    static RE_WEIGHT: OnceCell<Regex> = OnceCell::new();
    static RE_ALLERGENS: OnceCell<Regex> = OnceCell::new();
    let re_bullet = RE_BULLET.get_or_init(|| Regex::new(r"^\s*[-*•–]\s+").unwrap());
    // `1. `, `2)` or `2.Dish`, but not `1.5l`
    let re_number = RE_NUMBER.get_or_init(|| Regex::new(r"^\s*\d+[.)](\s+|[^\d\s])").unwrap());
    let re_weight = RE_WEIGHT
        .get_or_init(|| Regex::new(r"(?i)^\s*\d+(?:/\d+)?\s*(?:ml|g|l|ks)\b\s*").unwrap());
    let re_allergens =
        RE_ALLERGENS.get_or_init(|| Regex::new(r"\s*\(\s*\d+(?:\s*,\s*\d+)*\s*\)\s*$").unwrap());

    let out = re_bullet.replace(line, "");
    let out = re_number.replace(&out, |c: &Captures| c[1].trim().to_string());
    let out = re_weight.replace(&out, "");
    let out = re_allergens.replace(&out, "");
    out.trim().to_string()
}
