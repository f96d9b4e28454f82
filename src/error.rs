// src/error.rs
//! Error taxonomy for menu retrieval and dispatch.

use std::time::Duration;

/// Network or HTTP failure talking to a menu page or the chat webhook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error for {url}: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn timed_out(url: impl Into<String>, limit: Duration) -> Self {
        Self::new(url, format!("timed out after {}s", limit.as_secs()))
    }
}

/// Everything a source can fail with. All variants are contained by
/// [`crate::sources::SafeSource`]; none reach the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An expected anchor (table, heading, selector, marker) is gone.
    #[error("page layout changed: {0}")]
    FormatChanged(String),

    #[error("no block for day {day} (found {available})")]
    DayOutOfRange { day: usize, available: usize },

    #[error("date {0} not found")]
    DateNotFound(String),

    /// The source has no automated retrieval; only a manual-check link.
    #[error("automated retrieval not supported")]
    Unsupported,

    #[error("source panicked: {0}")]
    Panicked(String),
}

impl SourceError {
    pub fn format_changed(detail: impl Into<String>) -> Self {
        Self::FormatChanged(detail.into())
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::FormatChanged(_) => "format_changed",
            Self::DayOutOfRange { .. } => "day_out_of_range",
            Self::DateNotFound(_) => "date_not_found",
            Self::Unsupported => "unsupported",
            Self::Panicked(_) => "panicked",
        }
    }
}
