//! Wire format of successful mode responses.
//!
//! Structured modes return the model's JSON object unchanged at the top
//! level. The narrative mode wraps its text as `{"narrative": "..."}`.
//! Failures are rendered by [`crate::error::SanSureError`] as `{"detail": "..."}`.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::models::{ModeResult, NarrativeResponse};

/// Error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl IntoResponse for ModeResult {
    fn into_response(self) -> Response {
        tracing::debug!(mode = %self.mode(), "Serving mode result");

        match self {
            ModeResult::Vision(object)
            | ModeResult::Collusion(object)
            | ModeResult::InvestorSignal(object) => Json(Value::Object(object)).into_response(),
            ModeResult::Narrative(narrative) => Json(NarrativeResponse { narrative }).into_response(),
        }
    }
}
