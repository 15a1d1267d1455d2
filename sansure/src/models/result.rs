//! Response contracts of the four modes.
//!
//! Structured answers are passed to callers exactly as the model produced
//! them. The typed records here describe what the system instruction asks
//! for; they feed the OpenAPI schema and [`conformance_issue`], which only
//! reports drift and never rejects an answer.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::Mode;

pub type JsonObject = Map<String, Value>;

/// Result of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeResult {
    Vision(JsonObject),
    Collusion(JsonObject),
    InvestorSignal(JsonObject),
    Narrative(String),
}

impl ModeResult {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Vision(_) => Mode::Vision,
            Self::Collusion(_) => Mode::Collusion,
            Self::InvestorSignal(_) => Mode::InvestorSignal,
            Self::Narrative(_) => Mode::HealthNarrative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    Confirmed,
    Contradicted,
    Unclear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CollusionRecommendation {
    MintToken,
    HoldPendingReview,
    RejectFlagEscalate,
}

/// Credit-style rating tiers, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskRating {
    Aaa,
    Aa,
    A,
    Bbb,
    Bb,
    B,
    Ccc,
    D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    StronglyImproving,
    Improving,
    Stable,
    Declining,
    StronglyDeclining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Forecast {
    Improving,
    Stable,
    AtRisk,
}

/// Per-checklist-item verdict of the vision model.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VisualVerification {
    pub door: Verification,
    pub water: Verification,
    pub clean: Verification,
    pub toilet: Verification,
}

/// Mode 1 answer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct VisionResult {
    #[validate(range(min = 0.0, max = 100.0))]
    pub hygiene_score: f64,
    pub confidence: Confidence,
    pub visual_verification: VisualVerification,
    pub detected_features: Vec<String>,
    pub discrepancies: Vec<String>,
    pub recommendation: String,
    pub spoofing_risk: RiskLevel,
    pub spoofing_reasoning: String,
}

/// Mode 2 answer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CollusionResult {
    #[validate(range(min = 0.0, max = 100.0))]
    pub consensus_score: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub score_variance: f64,
    pub collusion_risk: RiskLevel,
    pub collusion_indicators: Vec<String>,
    pub independence_confirmed: bool,
    pub reasoning: String,
    pub recommendation: CollusionRecommendation,
    pub confidence: Confidence,
}

/// Mode 4 answer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct InvestorSignalResult {
    #[validate(range(min = 80.0, max = 500.0))]
    pub credit_price_inr: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub volatility_index: f64,
    pub risk_rating: RiskRating,
    pub trend: Trend,
    /// Asked to stay under 15 words; not checked.
    pub investment_signal: String,
    pub disbursement_ready: bool,
    #[serde(rename = "30_day_forecast")]
    pub forecast_30_day: Forecast,
}

/// Mode 3 answer as served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NarrativeResponse {
    pub narrative: String,
}

/// Describes how `object` departs from contract `T`, if it does.
pub fn conformance_issue<T>(object: &JsonObject) -> Option<String>
where
    T: DeserializeOwned + Validate,
{
    match serde_json::from_value::<T>(Value::Object(object.clone())) {
        Ok(typed) => typed.validate().err().map(|errors| errors.to_string()),
        Err(e) => Some(e.to_string()),
    }
}
