//! Mode 3: health mirror narrator.

use axum::extract::State;

use crate::api::extractors::ValidatedJson;
use crate::api::response::ErrorDetail;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{HealthNarrativeRequest, ModeResult, NarrativeResponse};

/// `POST /api/health-narrative`
#[utoipa::path(
    post,
    path = "/api/health-narrative",
    tag = "modes",
    request_body = HealthNarrativeRequest,
    responses(
        (status = 200, description = "One plain-language paragraph", body = NarrativeResponse),
        (status = 422, description = "Invalid request", body = ErrorDetail),
        (status = 500, description = "Configuration or upstream failure", body = ErrorDetail),
    )
)]
pub async fn narrate_health(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<HealthNarrativeRequest>,
) -> Result<ModeResult> {
    let narrative = state
        .dispatcher
        .narrate_health(&req)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Health narrative failed"))?;

    Ok(ModeResult::Narrative(narrative))
}
