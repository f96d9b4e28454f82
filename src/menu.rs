// src/menu.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One dish line. `text` is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub text: String,
    pub price: Option<Decimal>,
}

impl MenuItem {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            price: None,
        }
    }

    pub fn priced(text: &str, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::new(text)
        }
    }
}

/// How dish lines are printed in a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStyle {
    #[default]
    Numbered,
    Bare,
}

/// A restaurant's dishes for one day, in the order the source presents them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub restaurant_name: String,
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(restaurant_name: impl Into<String>) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, text: &str) {
        self.items.push(MenuItem::new(text));
    }

    pub fn add_priced_item(&mut self, text: &str, price: Decimal) {
        self.items.push(MenuItem::priced(text, price));
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(MenuItem {
            text: item.text.trim().to_string(),
            price: item.price,
        });
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render(&self, style: ItemStyle) -> String {
        let mut lines = Vec::with_capacity(self.items.len() + 1);
        lines.push(format!("*{}*", self.restaurant_name));
        for (n, item) in self.items.iter().enumerate() {
            let price = item
                .price
                .map(|p| format!(" ({:.2}€)", p))
                .unwrap_or_default();
            match style {
                ItemStyle::Numbered => lines.push(format!("{}. {}{}", n + 1, item.text, price)),
                ItemStyle::Bare => lines.push(format!("{}{}", item.text, price)),
            }
        }
        lines.join("\n")
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(ItemStyle::Numbered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn add_item_trims_and_keeps_order() {
        let mut m = Menu::new("A");
        m.add_item("  A  ");
        m.add_item("B");
        assert_eq!(m.texts(), vec!["A", "B"]);
    }

    #[test]
    fn renders_numbered_with_price() {
        let mut m = Menu::new("Restaurant A");
        m.add_priced_item("Food 1", dec!(4.5));
        m.add_item("Food 2");
        assert_eq!(m.to_string(), "*Restaurant A*\n1. Food 1 (4.50€)\n2. Food 2");
    }

    #[test]
    fn renders_bare_style() {
        let mut m = Menu::new("B");
        m.add_item("Soup");
        m.add_priced_item("Goulash", dec!(6));
        assert_eq!(m.render(ItemStyle::Bare), "*B*\nSoup\nGoulash (6.00€)");
    }

    #[test]
    fn empty_menu_renders_only_name() {
        assert_eq!(Menu::new("Empty").render(ItemStyle::Bare), "*Empty*");
    }
}
