use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use recmask_core::{parse_payload, Record, Redactor, Verdict};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared handler state. The redactor is immutable, so one instance serves
/// every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub redactor: Arc<Redactor>,
    pub max_batch_records: usize,
}

#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub record_id: Value,
    /// A JSON object, or JSON text that goes through payload repair.
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub record_id: Value,
    pub redacted_data: Record,
    pub is_pii: bool,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn redact_one(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Verdict>, ApiError> {
    let Json(body) = payload?;
    let Value::Object(record) = body else {
        return Err(ApiError::NotAnObject);
    };
    let verdict = state.redactor.redact(&record);
    tracing::info!(
        is_pii = verdict.is_pii,
        standalone = verdict.standalone_hits.len(),
        "record redacted"
    );
    Ok(Json(verdict))
}

pub async fn redact_batch(
    State(state): State<AppState>,
    payload: Result<Json<Vec<BatchItem>>, JsonRejection>,
) -> Result<Json<Vec<BatchResult>>, ApiError> {
    let Json(items) = payload?;
    if items.len() > state.max_batch_records {
        return Err(ApiError::BatchTooLarge {
            got: items.len(),
            limit: state.max_batch_records,
        });
    }

    let results: Vec<BatchResult> = items
        .into_iter()
        .map(|item| {
            let record = into_record(item.data);
            let verdict = state.redactor.redact(&record);
            BatchResult {
                record_id: item.record_id,
                redacted_data: verdict.redacted,
                is_pii: verdict.is_pii,
            }
        })
        .collect();

    let pii = results.iter().filter(|r| r.is_pii).count();
    tracing::info!(records = results.len(), pii, "batch redacted");
    Ok(Json(results))
}

fn into_record(data: Value) -> Record {
    match data {
        Value::Object(record) => record,
        Value::String(raw) => parse_payload(&raw).0,
        other => parse_payload(&other.to_string()).0,
    }
}
