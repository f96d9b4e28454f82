// src/lib.rs
// Public library surface for the service binary, the CLI and integration tests.

pub mod api;
pub mod calendar;
pub mod config;
pub mod digest;
pub mod error;
pub mod menu;
pub mod metrics;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod transport;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::calendar::{Locale, MenuDay};
pub use crate::config::AppConfig;
pub use crate::digest::Digest;
pub use crate::error::{SourceError, TransportError};
pub use crate::menu::{ItemStyle, Menu, MenuItem};
pub use crate::pipeline::{build_digest, Lineup, Orchestrator};
pub use crate::sources::{SafeSource, Source};
