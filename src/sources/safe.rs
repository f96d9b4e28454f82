// src/sources/safe.rs
use futures::FutureExt;
use metrics::{counter, histogram};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::Source;
use crate::calendar::MenuDay;
use crate::error::{SourceError, TransportError};
use crate::menu::Menu;
use crate::report::ErrorReporter;

/// Wraps a source so that retrieving it always yields a menu.
///
/// Any failure (error, panic, timeout) becomes a one-line menu pointing the
/// reader at the restaurant's page. Failures other than
/// [`SourceError::Unsupported`] are sent to the [`ErrorReporter`] first.
pub struct SafeSource {
    inner: Arc<dyn Source>,
    reporter: Arc<dyn ErrorReporter>,
    timeout: Option<Duration>,
}

impl SafeSource {
    pub fn new(inner: Arc<dyn Source>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            inner,
            reporter,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Never fails.
    pub async fn retrieve(&self, day: MenuDay) -> Menu {
        let started = Instant::now();
        let outcome = self.attempt(day).await;
        histogram!("lunch_source_fetch_ms", "source" => self.name().to_string())
            .record(started.elapsed().as_secs_f64() * 1_000.0);

        match outcome {
            Ok(menu) => {
                tracing::debug!(source = self.name(), items = menu.len(), "menu retrieved");
                menu
            }
            Err(SourceError::Unsupported) => {
                counter!("lunch_source_unsupported_total", "source" => self.name().to_string())
                    .increment(1);
                self.stub(format!("Check menu yourself on {}", self.reference_label()))
            }
            Err(e) => {
                self.reporter.report(self.name(), &e);
                self.stub(format!(
                    "Problem with scraping. Check menu yourself on {}",
                    self.reference_label()
                ))
            }
        }
    }

    async fn attempt(&self, day: MenuDay) -> Result<Menu, SourceError> {
        let work = AssertUnwindSafe(async {
            let raw = self.inner.fetch(day).await?;
            self.inner.extract(&raw, day)
        })
        .catch_unwind();

        let caught = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(caught) => caught,
                Err(_) => {
                    return Err(TransportError::timed_out(self.reference_label(), limit).into())
                }
            },
            None => work.await,
        };

        caught.unwrap_or_else(|panic| Err(SourceError::Panicked(panic_message(panic.as_ref()))))
    }

    fn reference_label(&self) -> &str {
        self.inner.reference().unwrap_or_else(|| self.inner.name())
    }

    fn stub(&self, line: String) -> Menu {
        let mut menu = Menu::new(self.inner.name());
        menu.add_item(&line);
        menu
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
