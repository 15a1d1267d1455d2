//! Mode 2: collusion adjudicator.

use axum::extract::State;

use crate::api::extractors::ValidatedJson;
use crate::api::response::ErrorDetail;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{CollusionRequest, CollusionResult, ModeResult};

/// `POST /api/collusion`
#[utoipa::path(
    post,
    path = "/api/collusion",
    tag = "modes",
    request_body = CollusionRequest,
    responses(
        (status = 200, description = "Independence and collusion verdict", body = CollusionResult),
        (status = 422, description = "Invalid request", body = ErrorDetail),
        (status = 500, description = "Configuration, upstream or parse failure", body = ErrorDetail),
    )
)]
pub async fn check_collusion(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CollusionRequest>,
) -> Result<ModeResult> {
    let result = state
        .dispatcher
        .check_collusion(&req)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Collusion check failed"))?;

    Ok(ModeResult::Collusion(result))
}
