//! Mode 1: vision hygiene scorer.

use axum::extract::State;

use crate::api::extractors::ValidatedJson;
use crate::api::response::ErrorDetail;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{ModeResult, VisionRequest, VisionResult};

/// `POST /api/vision`
///
/// Grades a facility photo against the caller's checklist.
#[utoipa::path(
    post,
    path = "/api/vision",
    tag = "modes",
    request_body = VisionRequest,
    responses(
        (status = 200, description = "Hygiene assessment", body = VisionResult),
        (status = 413, description = "Request body over the configured limit", body = ErrorDetail),
        (status = 422, description = "Invalid request", body = ErrorDetail),
        (status = 500, description = "Configuration, upstream or parse failure", body = ErrorDetail),
    )
)]
pub async fn score_vision(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VisionRequest>,
) -> Result<ModeResult> {
    let result = state
        .dispatcher
        .score_vision(&req)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Vision analysis failed"))?;

    Ok(ModeResult::Vision(result))
}
