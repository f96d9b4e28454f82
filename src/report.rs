// src/report.rs
use metrics::counter;
use std::sync::Mutex;

use crate::error::SourceError;

/// Where scraping failures go. Fire-and-forget: callers ignore the outcome.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, source: &str, error: &SourceError);
}

/// Logs the failure and counts it per source.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, source: &str, error: &SourceError) {
        tracing::error!(source, kind = error.kind(), error = %error, "error scraping menu");
        counter!(
            "lunch_source_failures_total",
            "source" => source.to_string(),
            "kind" => error.kind()
        )
        .increment(1);
    }
}

// --- Test helper ---
pub struct RecordingReporter {
    pub calls: Mutex<Vec<(String, SourceError)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
        }
    }

    pub fn reported(&self) -> Vec<(String, SourceError)> {
        match self.calls.lock() {
            Ok(g) => g.clone(),
            Err(poison) => poison.into_inner().clone(),
        }
    }
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, source: &str, error: &SourceError) {
        let mut g = match self.calls.lock() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        };
        g.push((source.to_string(), error.clone()));
    }
}
