// src/pipeline.rs
//! One aggregation run: static source first, then every other source
//! concurrently, collected in completion order.

use futures::stream::{FuturesUnordered, StreamExt};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;

use crate::calendar::MenuDay;
use crate::config::app::AppConfig;
use crate::digest::Digest;
use crate::error::SourceError;
use crate::menu::Menu;
use crate::report::ErrorReporter;
use crate::sources::{restaurants, SafeSource, Source};
use crate::transport::Transport;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("lunch_runs_total", "Aggregation runs started.");
        describe_counter!("lunch_menus_total", "Menus collected across runs.");
        describe_counter!(
            "lunch_source_failures_total",
            "Source failures turned into a check-it-yourself line."
        );
        describe_counter!(
            "lunch_source_unsupported_total",
            "Retrievals of sources without automated scraping."
        );
        describe_gauge!(
            "lunch_last_run_sources",
            "Sources retrieved (besides the fixed one) in the last run."
        );
        describe_histogram!(
            "lunch_source_fetch_ms",
            "Per-source fetch + extract time in milliseconds."
        );
    });
}

/// The sources of one run: the always-available one and the rest.
pub struct Lineup {
    pub fixed: Arc<dyn Source>,
    pub sources: Vec<Arc<dyn Source>>,
}

impl Lineup {
    /// The production lineup over a shared transport.
    pub fn standard(http: Arc<dyn Transport>, config: &AppConfig) -> Self {
        Self {
            fixed: Arc::new(restaurants::other()),
            sources: restaurants::enabled(http, &config.disabled_sources),
        }
    }
}

pub struct Orchestrator {
    reporter: Arc<dyn ErrorReporter>,
    timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            reporter,
            timeout: None,
        }
    }

    /// Per-source limit; a source exceeding it counts as a transport failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns `K + 1` menus for `K` sources, the fixed source's first.
    /// Only a failure of the fixed source is an error.
    pub async fn run(&self, lineup: &Lineup, day: MenuDay) -> Result<Vec<Menu>, SourceError> {
        ensure_metrics_described();
        counter!("lunch_runs_total").increment(1);

        let raw = lineup.fixed.fetch(day).await?;
        let mut menus = Vec::with_capacity(lineup.sources.len() + 1);
        menus.push(lineup.fixed.extract(&raw, day)?);

        let guarded: Vec<SafeSource> = lineup
            .sources
            .iter()
            .map(|s| SafeSource::new(s.clone(), self.reporter.clone()).with_timeout(self.timeout))
            .collect();

        let mut pending: FuturesUnordered<_> = guarded.iter().map(|g| g.retrieve(day)).collect();
        while let Some(menu) = pending.next().await {
            tracing::debug!(source = %menu.restaurant_name, "source finished");
            menus.push(menu);
        }

        counter!("lunch_menus_total").increment(menus.len() as u64);
        gauge!("lunch_last_run_sources").set(lineup.sources.len() as f64);
        tracing::info!(
            date = %day.formatted_date(),
            sources = lineup.sources.len(),
            menus = menus.len(),
            "menus retrieved"
        );
        Ok(menus)
    }
}

/// Retrieve every menu for `day` and wrap them in a digest styled per config.
pub async fn build_digest(
    lineup: &Lineup,
    day: MenuDay,
    config: &AppConfig,
    reporter: Arc<dyn ErrorReporter>,
) -> Result<Digest, SourceError> {
    let menus = Orchestrator::new(reporter)
        .with_timeout(config.fetch_timeout())
        .run(lineup, day)
        .await?;
    Ok(Digest::new(menus, day.date())
        .with_style(config.item_style)
        .with_locale(config.locale)
        .sort_rest(config.sort_rest))
}
