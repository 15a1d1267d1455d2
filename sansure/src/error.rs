use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::Mode;

#[derive(Error, Debug)]
pub enum SanSureError {
    /// Missing or placeholder credential. The message is shown to callers verbatim.
    #[error("{0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The model answered, but not with a JSON object.
    #[error("Could not parse {mode} response: {snippet}")]
    Parse { mode: Mode, snippet: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl SanSureError {
    pub fn status(&self) -> StatusCode {
        match self {
            SanSureError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SanSureError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            SanSureError::Configuration(_)
            | SanSureError::Llm(_)
            | SanSureError::Parse { .. }
            | SanSureError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SanSureError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SanSureError>;
