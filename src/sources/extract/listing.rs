// src/sources/extract/listing.rs
use scraper::{ElementRef, Html};

use super::{items_from, selector, Extract};
use crate::calendar::MenuDay;
use crate::error::SourceError;
use crate::menu::MenuItem;
use crate::sources::text::{capitalize, element_text};

/// Clean-up applied to the raw rows of a [`SelectorList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostProcess {
    #[default]
    None,
    /// Drop the first and last row, glue continuation rows onto their dish
    /// (a dish is complete once its allergen line is seen) and drop dishes
    /// whose price row is empty (`€()`).
    AllergenContinuations,
}

/// Sites that only publish today's menu: every item under `scope`.
pub struct SelectorList {
    scope: Option<String>,
    items: String,
    post: PostProcess,
}

impl SelectorList {
    pub fn new(items: &str) -> Self {
        Self {
            scope: None,
            items: items.to_string(),
            post: PostProcess::None,
        }
    }

    /// Require a container; its absence means the page layout changed.
    pub fn within(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    pub fn post_process(mut self, post: PostProcess) -> Self {
        self.post = post;
        self
    }
}

impl Extract for SelectorList {
    fn extract(&self, body: &str, _day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let item_sel = selector(&self.items)?;

        let rows: Vec<String> = match &self.scope {
            Some(scope) => {
                let scope_sel = selector(scope)?;
                let container = doc.select(&scope_sel).next().ok_or_else(|| {
                    SourceError::format_changed(format!("container `{scope}` not found"))
                })?;
                container.select(&item_sel).map(element_text).collect()
            }
            None => doc.select(&item_sel).map(element_text).collect(),
        };

        let rows = match self.post {
            PostProcess::None => rows,
            PostProcess::AllergenContinuations => merge_continuations(rows),
        };
        Ok(items_from(rows))
    }
}

fn merge_continuations(rows: Vec<String>) -> Vec<String> {
    let inner = match rows.len() {
        0..=2 => &[][..],
        n => &rows[1..n - 1],
    };
    let mut dishes: Vec<String> = Vec::new();
    for row in inner {
        let item = capitalize(row);
        if item.starts_with("€()") {
            // empty dish; drop its heading
            dishes.pop();
        } else if let Some(last) = dishes
            .last_mut()
            .filter(|l| !l.to_lowercase().contains("alergény"))
        {
            last.push(' ');
            last.push_str(&item);
        } else {
            dishes.push(item);
        }
    }
    dishes
}

/// Weekly pages where the day's dishes sit in the `day`-th block, optionally
/// inside the `nth` matching container.
pub struct PositionalBlock {
    container: Option<(String, usize)>,
    blocks: String,
    items: String,
}

impl PositionalBlock {
    pub fn new(blocks: &str, items: &str) -> Self {
        Self {
            container: None,
            blocks: blocks.to_string(),
            items: items.to_string(),
        }
    }

    pub fn inside(mut self, container: &str, nth: usize) -> Self {
        self.container = Some((container.to_string(), nth));
        self
    }

    fn pick_block<'a>(
        &self,
        blocks: impl Iterator<Item = ElementRef<'a>>,
        day: usize,
    ) -> Result<ElementRef<'a>, SourceError> {
        let all: Vec<ElementRef<'a>> = blocks.collect();
        let available = all.len();
        all.into_iter()
            .nth(day)
            .ok_or(SourceError::DayOutOfRange { day, available })
    }
}

impl Extract for PositionalBlock {
    fn extract(&self, body: &str, day: MenuDay) -> Result<Vec<MenuItem>, SourceError> {
        let doc = Html::parse_document(body);
        let block_sel = selector(&self.blocks)?;
        let item_sel = selector(&self.items)?;

        let block = match &self.container {
            Some((css, nth)) => {
                let container_sel = selector(css)?;
                let container = doc.select(&container_sel).nth(*nth).ok_or_else(|| {
                    SourceError::format_changed(format!("container `{css}` #{nth} not found"))
                })?;
                self.pick_block(container.select(&block_sel), day.index())?
            }
            None => self.pick_block(doc.select(&block_sel), day.index())?,
        };

        Ok(items_from(block.select(&item_sel).map(element_text)))
    }
}
