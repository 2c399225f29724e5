use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("batch of {got} records exceeds the limit of {limit}")]
    BatchTooLarge { got: usize, limit: usize },

    #[error("{}", .0.body_text())]
    BadJson(#[from] JsonRejection),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotAnObject => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadJson(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request rejected");
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
