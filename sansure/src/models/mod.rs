mod mode;
mod request;
mod result;

pub use mode::Mode;
pub use request::{
    Checklist, CollusionRequest, HealthNarrativeRequest, InvestorSignalRequest, Submission,
    VisionRequest,
};
pub use result::{
    conformance_issue, CollusionRecommendation, CollusionResult, Confidence, Forecast,
    InvestorSignalResult, JsonObject, ModeResult, NarrativeResponse, RiskLevel, RiskRating, Trend,
    Verification, VisionResult, VisualVerification,
};
