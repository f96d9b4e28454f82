// src/api.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::calendar::MenuDay;
use crate::config::AppConfig;
use crate::error::TransportError;
use crate::notify::SlackChannel;
use crate::pipeline::{build_digest, Lineup};
use crate::report::{ErrorReporter, TracingReporter};
use crate::transport::{ReqwestTransport, Transport};

pub const WEEKEND_MESSAGE: &str = "Come on Monday-Friday";

/// Opens the pooled transport for one run.
pub type Connector =
    Arc<dyn Fn(&AppConfig) -> Result<Arc<dyn Transport>, TransportError> + Send + Sync>;

/// Builds the run's sources over the transport.
pub type LineupBuilder = fn(Arc<dyn Transport>, &AppConfig) -> Lineup;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reporter: Arc<dyn ErrorReporter>,
    pub connect: Connector,
    pub lineup: LineupBuilder,
    pub today: fn() -> MenuDay,
}

impl AppState {
    /// Production wiring: real HTTP, the restaurant registry, the local date.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            reporter: Arc::new(TracingReporter),
            connect: Arc::new(
                |cfg: &AppConfig| -> Result<Arc<dyn Transport>, TransportError> {
                    Ok(Arc::new(ReqwestTransport::new(cfg.fetch_timeout())?))
                },
            ),
            lineup: Lineup::standard,
            today: MenuDay::today,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(index))
        .route("/{secret_key}", get(index_with_key))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Result<String, (StatusCode, String)> {
    serve_digest(state, None).await
}

async fn index_with_key(
    State(state): State<AppState>,
    Path(secret_key): Path<String>,
) -> Result<String, (StatusCode, String)> {
    serve_digest(state, Some(secret_key)).await
}

async fn serve_digest(
    state: AppState,
    secret_key: Option<String>,
) -> Result<String, (StatusCode, String)> {
    let day = (state.today)();
    if !day.is_workday() {
        return Ok(WEEKEND_MESSAGE.to_string());
    }

    // One pooled client per run, dropped when the request ends.
    let http = (state.connect)(&state.config).map_err(|e| {
        tracing::error!(error = %e, "cannot open http transport");
        (StatusCode::INTERNAL_SERVER_ERROR, "transport unavailable".to_string())
    })?;
    let lineup = (state.lineup)(http.clone(), &state.config);

    let digest = build_digest(&lineup, day, &state.config, state.reporter.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "digest run failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("digest failed: {e}"))
        })?;

    if state.config.should_send_to_slack(secret_key.as_deref()) {
        if let Some(hook) = &state.config.slack_hook {
            let channel = SlackChannel::new(hook.clone(), http.clone())
                .with_channel(state.config.slack_channel.clone());
            if let Err(e) = channel.send(&digest.render()).await {
                tracing::warn!(error = %e, "slack dispatch failed");
            }
        }
    }

    Ok(digest.to_string())
}
