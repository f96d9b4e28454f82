// src/sources/extract/priced.rs
use once_cell::sync::OnceCell;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::Html;
use std::str::FromStr;

use super::{selector, Extract};
use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::element_text;

/// Dish cells paired positionally with price cells (`4,50 €`).
///
/// The last word of a dish cell is a portion/allergen tag and is dropped.
/// A dish cell with nothing before that tag becomes an inline
/// "Problem with parsing" item instead of failing the whole menu.
pub struct PricedRows {
    dishes: String,
    prices: String,
}

impl PricedRows {
    pub fn new(dishes: &str, prices: &str) -> Self {
        Self {
            dishes: dishes.to_string(),
            prices: prices.to_string(),
        }
    }
}

/// `"4,50 €"` → `4.50`; empty or unparsable → `None`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned = raw
        .trim()
        .trim_end_matches('€')
        .trim()
        .replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn dish_text(cell: &str) -> Option<String> {
    static RE_DISH: OnceCell<Regex> = OnceCell::new();
    let re = RE_DISH.get_or_init(|| Regex::new(r"^(.*\S)\s+\S+$").unwrap());
    re.captures(cell)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

impl Extract for PricedRows {
    fn extract(&self, body: &str, _day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let dish_sel = selector(&self.dishes)?;
        let price_sel = selector(&self.prices)?;

        let dishes: Vec<String> = doc.select(&dish_sel).map(element_text).collect();
        let prices: Vec<String> = doc.select(&price_sel).map(element_text).collect();
        if dishes.is_empty() {
            return Err(SourceError::format_changed(format!(
                "no dish cells match `{}`",
                self.dishes
            )));
        }

        let items = dishes
            .iter()
            .zip(prices.iter())
            .map(|(dish, price)| match (dish_text(dish), parse_price(price)) {
                (Some(text), Some(p)) => MenuItem::priced(&text, p),
                (Some(text), None) => MenuItem::new(&text),
                (None, _) => MenuItem::new(&format!("Problem with parsing - {dish}")),
            })
            .collect();
        Ok(items)
    }
}
