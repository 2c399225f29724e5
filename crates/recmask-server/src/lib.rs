//! HTTP redaction service in front of data sinks.
//!
//! - `GET  /health`
//! - `POST /v1/redact`        one JSON object → verdict
//! - `POST /v1/redact/batch`  `[{record_id, data}]` → `[{record_id, redacted_data, is_pii}]`

pub mod config;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use recmask_core::{Redactor, ScoringPolicy};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub use config::Config;
use routes::AppState;

pub fn build_app(config: &Config) -> Router {
    let policy = if config.strict_scoring {
        ScoringPolicy::strict()
    } else {
        ScoringPolicy::default()
    };
    let redactor = Redactor::new(policy);
    tracing::debug!(
        min_combo_signals = redactor.policy().min_combo_signals(),
        strict = config.strict_scoring,
        "scoring policy ready"
    );
    let state = AppState {
        redactor: Arc::new(redactor),
        max_batch_records: config.max_batch_records,
    };

    Router::new()
        .route("/health", get(routes::health))
        .route("/v1/redact", post(routes::redact_one))
        .route("/v1/redact/batch", post(routes::redact_batch))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
