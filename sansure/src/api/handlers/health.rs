use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

/// Body of `GET /health`. Always served with HTTP 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HealthReport {
    Ok { model: String },
    Error { detail: String },
}

/// `GET /health`
///
/// Confirms the provider credential is configured. Makes no LLM call.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Credential status and active model", body = HealthReport),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    let report = match state.dispatcher.health() {
        Ok(model) => HealthReport::Ok {
            model: model.to_string(),
        },
        Err(e) => HealthReport::Error {
            detail: e.to_string(),
        },
    };

    Json(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_report_serializes_flat() {
        let json = serde_json::to_value(HealthReport::Ok {
            model: "llama".to_string(),
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({"status": "ok", "model": "llama"}));
    }

    #[test]
    fn error_report_carries_detail() {
        let json = serde_json::to_value(HealthReport::Error {
            detail: "GROQ_API_KEY not set".to_string(),
        })
        .expect("serialize");
        assert_eq!(json["status"], "error");
        assert_eq!(json["detail"], "GROQ_API_KEY not set");
    }
}
