//! Inbound request records, one per operation mode.
//!
//! Field names match the frontend's JSON contract. Shape errors (missing
//! fields, wrong types) are caught by serde; the `validator` rules below cover
//! what serde cannot express.

use std::borrow::Cow;

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{Result, SanSureError};

/// Used when the image bytes carry no recognizable signature.
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Accepts padded and unpadded input alike.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Human pre-assessment of a sanitation facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Checklist {
    pub door: bool,
    pub water: bool,
    pub clean: bool,
    pub toilet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct VisionRequest {
    /// Facility photo, base64-encoded. A `data:<mime>;base64,` prefix is tolerated.
    #[validate(custom(function = "validate_image_payload"))]
    pub base64_image: String,
    pub checklist: Checklist,
}

impl VisionRequest {
    /// Builds the `data:` URL sent to the vision model.
    pub fn image_data_url(&self) -> Result<String> {
        let image = decode_image(&self.base64_image).map_err(SanSureError::Validation)?;
        Ok(format!("data:{};base64,{}", image.mime, image.payload))
    }
}

/// One party's assessment of a facility.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub facility_id: String,
    /// Who submitted: `household`, `peer` or `auditor`.
    pub submitter_type: String,
    pub score: i64,
    pub checklist: Checklist,
    pub features: Vec<String>,
    pub discrepancies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct CollusionRequest {
    /// Household, peer and auditor submissions, in that order.
    #[validate(length(max = 3, message = "at most three submissions are accepted"))]
    pub submissions: Vec<Submission>,
}

impl CollusionRequest {
    pub fn facility_id(&self) -> &str {
        self.submissions
            .first()
            .map(|s| s.facility_id.as_str())
            .unwrap_or("UNKNOWN")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct HealthNarrativeRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub village_name: String,
    pub population: u64,
    pub avg_score: f64,
    pub cases_prevented: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct InvestorSignalRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub village_name: String,
    /// Daily hygiene scores, oldest first.
    pub history: Vec<f64>,
    pub avg: f64,
    #[validate(range(min = 0.0, message = "standard deviation cannot be negative"))]
    pub std_dev: f64,
}

struct DecodedImage {
    mime: &'static str,
    /// Canonical padded base64 of the decoded bytes.
    payload: String,
}

fn decode_image(raw: &str) -> std::result::Result<DecodedImage, String> {
    let payload = match raw.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => raw,
    }
    .trim();

    // Line-wrapped encoders insert newlines.
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if compact.is_empty() {
        return Err("base64_image cannot be empty".to_string());
    }

    let bytes = LENIENT_BASE64
        .decode(&compact)
        .map_err(|e| format!("base64_image is not valid base64: {e}"))?;

    let mime = match infer::get(&bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => kind.mime_type(),
        Some(kind) => {
            return Err(format!(
                "base64_image must be an image, got {}",
                kind.mime_type()
            ))
        }
        None => FALLBACK_IMAGE_MIME,
    };

    Ok(DecodedImage {
        mime,
        payload: STANDARD.encode(&bytes),
    })
}

fn validate_image_payload(value: &str) -> std::result::Result<(), ValidationError> {
    decode_image(value)
        .map(|_| ())
        .map_err(|message| ValidationError::new("image").with_message(Cow::Owned(message)))
}

fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("cannot be blank")));
    }
    Ok(())
}
