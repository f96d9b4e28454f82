//! Lunch Digest: binary entrypoint.
//! Boots the Axum HTTP server with config, metrics and the digest routes.

use lunch_digest::{api, metrics::Metrics, AppConfig};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs for local debugging.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - DEBUG set in config or env
fn enable_dev_tracing(debug: bool) {
    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(debug && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lunch_digest=debug,info"));

    // The runtime may already own the global subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;
    enable_dev_tracing(config.debug);

    let metrics = Metrics::init()?;
    let router = api::router(api::AppState::new(config)).merge(metrics.router());

    Ok(router.into())
}
