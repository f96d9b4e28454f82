// tests/metrics.rs
mod common;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use common::{day, Behavior, MockSource};
use lunch_digest::metrics::Metrics;
use lunch_digest::report::TracingReporter;
use lunch_digest::sources::{StaticSource, UnsupportedSource};
use lunch_digest::{Lineup, Orchestrator, SourceError};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn metrics_endpoint_contains_run_series() {
    // One recorder per process; this binary owns it.
    let metrics = Metrics::init().expect("recorder");

    let lineup = Lineup {
        fixed: Arc::new(StaticSource::new("Iné", &[":pizza: Pizza"])),
        sources: vec![
            Arc::new(MockSource::new("Ok", Behavior::Ok(vec!["Soup"]))),
            Arc::new(MockSource::new(
                "Drifted",
                Behavior::FailExtract(SourceError::FormatChanged("no table".into())),
            )),
            Arc::new(UnsupportedSource::new("Casa", "http://casa.test")),
        ],
    };
    Orchestrator::new(Arc::new(TracingReporter))
        .run(&lineup, day(2024, 1, 4))
        .await
        .unwrap();

    let resp = metrics
        .router()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains("lunch_runs_total"));
    assert!(text.contains("lunch_menus_total"));
    assert!(text.contains("lunch_last_run_sources"));
    assert!(text.contains("lunch_source_fetch_ms"));
    assert!(text.contains("lunch_source_failures_total"));
    assert!(text.contains("lunch_source_unsupported_total"));

    // Values recorded by the run reach the exporter, not just descriptions.
    let value = |name: &str| -> Option<f64> {
        text.lines()
            .find_map(|l| l.strip_prefix(name)?.strip_prefix(' '))
            .and_then(|v| v.trim().parse().ok())
    };
    assert_eq!(value("lunch_runs_total"), Some(1.0));
    assert_eq!(value("lunch_menus_total"), Some(4.0));
    assert_eq!(value("lunch_last_run_sources"), Some(3.0));
}
