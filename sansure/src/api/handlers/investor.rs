//! Mode 4: investor signal generator.

use axum::extract::State;

use crate::api::extractors::ValidatedJson;
use crate::api::response::ErrorDetail;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{InvestorSignalRequest, InvestorSignalResult, ModeResult};

/// `POST /api/investor-signal`
#[utoipa::path(
    post,
    path = "/api/investor-signal",
    tag = "modes",
    request_body = InvestorSignalRequest,
    responses(
        (status = 200, description = "Investment assessment", body = InvestorSignalResult),
        (status = 422, description = "Invalid request", body = ErrorDetail),
        (status = 500, description = "Configuration, upstream or parse failure", body = ErrorDetail),
    )
)]
pub async fn signal_investor(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<InvestorSignalRequest>,
) -> Result<ModeResult> {
    let result = state
        .dispatcher
        .signal_investor(&req)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Investor signal failed"))?;

    Ok(ModeResult::InvestorSignal(result))
}
