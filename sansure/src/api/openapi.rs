use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SanSure AI Backend",
        version = "1.0.0",
        description = "LLM-backed scoring, collusion checks, health narratives and investor signals for rural sanitation trust ratings.",
    ),
    paths(
        handlers::health::health_check,
        handlers::vision::score_vision,
        handlers::collusion::check_collusion,
        handlers::narrative::narrate_health,
        handlers::investor::signal_investor,
    ),
    components(schemas(
        response::ErrorDetail,
        handlers::health::HealthReport,
        // Requests
        models::Checklist,
        models::VisionRequest,
        models::Submission,
        models::CollusionRequest,
        models::HealthNarrativeRequest,
        models::InvestorSignalRequest,
        // Results
        models::Confidence,
        models::Verification,
        models::RiskLevel,
        models::CollusionRecommendation,
        models::RiskRating,
        models::Trend,
        models::Forecast,
        models::VisualVerification,
        models::VisionResult,
        models::CollusionResult,
        models::InvestorSignalResult,
        models::NarrativeResponse,
    )),
    tags(
        (name = "health", description = "Credential check"),
        (name = "modes", description = "The four LLM operation modes"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
