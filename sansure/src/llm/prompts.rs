//! Prompt templates for the four SanSure modes
//!
//! These templates use basic `format!()` interpolation for type safety.
//! Missing variables will cause compile-time errors.

use crate::models::{
    Checklist, CollusionRequest, HealthNarrativeRequest, InvestorSignalRequest, Submission,
};

/// Shared system message sent with every mode.
///
/// Defines the response contract of each mode plus the global rules, so the
/// user prompt only has to carry the request data.
pub const SYSTEM_INSTRUCTION: &str = r#"You are SanSure's core AI engine — an intelligence layer powering a rural sanitation
trust-rating platform aligned with SDG 6.2. You operate across four distinct modes
depending on the task passed to you. Always detect which mode applies from the request
structure and respond accordingly.

MODE 1 — VISION HYGIENE SCORER
Triggered when a toilet facility image is provided alongside a 4-item checklist.
Respond ONLY in this JSON:
{"hygiene_score": 0-100, "confidence": "high|medium|low", "visual_verification":
{"door": "confirmed|contradicted|unclear", "water": "confirmed|contradicted|unclear",
"clean": "confirmed|contradicted|unclear", "toilet": "confirmed|contradicted|unclear"},
"detected_features": [], "discrepancies": [], "recommendation": "",
"spoofing_risk": "low|medium|high", "spoofing_reasoning": ""}

MODE 2 — COLLUSION ADJUDICATOR
Triggered when three independent submission summaries are provided for the same facility.
Respond ONLY in this JSON:
{"consensus_score": 0-100, "score_variance": 0-100, "collusion_risk": "low|medium|high",
"collusion_indicators": [], "independence_confirmed": true|false, "reasoning": "",
"recommendation": "mint_token|hold_pending_review|reject_flag_escalate",
"confidence": "high|medium|low"}

MODE 3 — HEALTH MIRROR NARRATOR
Triggered when village demographics and cases_prevented are provided.
Respond with ONE warm plain-language paragraph only — no JSON, no headers.
Tone: a respected elder at a village meeting. Never use: data, score, metric, percentage, coefficient.

MODE 4 — INVESTOR SIGNAL GENERATOR
Triggered when a 90-day score history array is provided.
Respond ONLY in this JSON:
{"credit_price_inr": 80-500, "volatility_index": 0-100,
"risk_rating": "AAA|AA|A|BBB|BB|B|CCC|D",
"trend": "strongly_improving|improving|stable|declining|strongly_declining",
"investment_signal": "max 15 words", "disbursement_ready": true|false,
"30_day_forecast": "improving|stable|at_risk"}

GLOBAL RULES: Never wrap JSON in markdown fences. Never fabricate visual features.
Collusion false negatives are more damaging than false positives — be ruthlessly honest.
CLEANLINESS RULE: Judge cleanliness based on the toilet bowl, seat, and surrounding surfaces — not the floor. Floor tile colour, grout lines, or patterns are irrelevant to the cleanliness score. Only visible waste, faeces, heavy staining on the toilet itself, or clear evidence of neglect should lower the score."#;

/// Rendered in place of a submission slot nobody filled.
pub const MISSING_SUBMISSION: &str = "N/A";

/// Words the narrator must avoid. Enforced by the prompt only.
pub const NARRATIVE_BANNED_WORDS: &[&str] = &[
    "data",
    "score",
    "metric",
    "percentage",
    "coefficient",
    "algorithm",
    "system",
];

/// Collusion slot headings, in submission order.
pub const COLLUSION_SLOTS: [&str; 3] = [
    "HOUSEHOLD SUBMISSION",
    "PEER SUBMISSION (non-adjacent)",
    "AUDITOR SUBMISSION (separate ward)",
];

/// Generate the text half of the vision request
///
/// The image itself travels as a separate message part. The caller's
/// checklist is included so the model can flag contradictions with the photo.
///
/// # Example
/// ```
/// use sansure::llm::prompts::vision_prompt;
/// use sansure::models::Checklist;
///
/// let prompt = vision_prompt(&Checklist { door: true, water: false, clean: true, toilet: true });
/// assert!(prompt.contains("Water available: no"));
/// ```
pub fn vision_prompt(checklist: &Checklist) -> String {
    let door = yes_no(checklist.door);
    let water = yes_no(checklist.water);
    let clean = yes_no(checklist.clean);
    let toilet = yes_no(checklist.toilet);

    format!(
        r#"You are SanSure's hygiene scoring engine. Analyze this toilet facility photo across four dimensions:

1. STRUCTURAL INTEGRITY (door present, walls intact, roof functional)
2. WATER AVAILABILITY (water source visible, container present)
3. CLEANLINESS (focus on the toilet bowl, seat, and immediate surfaces — is there visible waste, heavy staining, or clear evidence of neglect? Floor appearance is irrelevant to this score)
4. TOILET VISIBILITY (is the toilet unit itself clearly visible and present in the image?)

User provided checklist:
- Door present: {door}
- Water available: {water}
- Clean floor: {clean}
- Toilet clearly visible: {toilet}

Return ONLY valid JSON (no markdown fences):
{{
  "hygiene_score": 0-100,
  "confidence": "high|medium|low",
  "visual_verification": {{
    "door": "confirmed|contradicted|unclear",
    "water": "confirmed|contradicted|unclear",
    "clean": "confirmed|contradicted|unclear",
    "toilet": "confirmed|contradicted|unclear"
  }},
  "detected_features": ["feature1"],
  "discrepancies": ["discrepancy if any"],
  "recommendation": "brief assessment",
  "spoofing_risk": "low|medium|high",
  "spoofing_reasoning": "reasoning"
}}"#
    )
}

/// Generate the collusion adjudication prompt
///
/// All three slots are always rendered; a slot without a submission shows
/// [`MISSING_SUBMISSION`]. Submissions past the third are ignored.
pub fn collusion_prompt(req: &CollusionRequest) -> String {
    let facility_id = req.facility_id();
    let slots = COLLUSION_SLOTS
        .iter()
        .enumerate()
        .map(|(idx, heading)| {
            let body = req
                .submissions
                .get(idx)
                .map(format_submission)
                .unwrap_or_else(|| MISSING_SUBMISSION.to_string());
            format!("{heading}:\n{body}")
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are SanSure's collusion detection engine. Three independent parties submitted assessments for facility {facility_id}:

{slots}

Analyze for score variance, checklist consistency, feature implausibility, and statistical independence.

Return ONLY valid JSON (no markdown fences):
{{
  "consensus_score": 0-100,
  "score_variance": 0-100,
  "collusion_risk": "low|medium|high",
  "collusion_indicators": ["indicator1"],
  "independence_confirmed": true,
  "reasoning": "brief explanation",
  "recommendation": "mint_token|hold_pending_review|reject_flag_escalate",
  "confidence": "high|medium|low"
}}"#
    )
}

/// Generate the health mirror narrative prompt
///
/// # Example
/// ```
/// use sansure::llm::prompts::health_narrative_prompt;
/// use sansure::models::HealthNarrativeRequest;
///
/// let req = HealthNarrativeRequest {
///     village_name: "Rampur".to_string(),
///     population: 1200,
///     avg_score: 81.0,
///     cases_prevented: 14,
/// };
/// let prompt = health_narrative_prompt(&req);
/// assert!(prompt.contains("Rampur"));
/// assert!(prompt.contains("14 cases"));
/// ```
pub fn health_narrative_prompt(req: &HealthNarrativeRequest) -> String {
    let village = &req.village_name;
    let population = req.population;
    let cases_prevented = req.cases_prevented;
    let banned = NARRATIVE_BANNED_WORDS.join(", ");

    format!(
        r#"You are speaking to the community of {village}. Population: {population} people.

Over the past 90 days, your village maintained clean toilets. The improvement prevented an estimated {cases_prevented} cases of diarrheal illness.

Write ONE warm paragraph (4-6 sentences) explaining this impact. Speak as a respected elder at a village meeting. Use plain language. Never use these words: {banned}.

Focus on: protection of children, health of families, pride in community achievement, connection between clean toilets and healthy children."#
    )
}

/// Generate the investor signal prompt
pub fn investor_signal_prompt(req: &InvestorSignalRequest) -> String {
    let village = &req.village_name;
    let history = format_history(&req.history);
    let avg = req.avg;
    let std_dev = req.std_dev;

    format!(
        r#"You are SanSure's investment signal generator. Analyze this 90-day hygiene score history for {village}:

Scores: {history}
Average: {avg}
Standard Deviation: {std_dev}

Generate investment signals for a rural sanitation trust-rating platform.

Return ONLY valid JSON (no markdown fences):
{{
  "credit_price_inr": 80-500,
  "volatility_index": 0-100,
  "risk_rating": "AAA|AA|A|BBB|BB|B|CCC|D",
  "trend": "strongly_improving|improving|stable|declining|strongly_declining",
  "investment_signal": "max 15 words",
  "disbursement_ready": true,
  "30_day_forecast": "improving|stable|at_risk"
}}"#
    )
}

fn format_submission(sub: &Submission) -> String {
    let checklist = format_checklist(&sub.checklist);
    let features = if sub.features.is_empty() {
        "none".to_string()
    } else {
        sub.features.join(", ")
    };

    format!(
        "Score: {}\nChecklist: {checklist}\nFeatures: {features}",
        sub.score
    )
}

fn format_checklist(checklist: &Checklist) -> String {
    format!(
        "door={}, water={}, clean={}, toilet={}",
        yes_no(checklist.door),
        yes_no(checklist.water),
        yes_no(checklist.clean),
        yes_no(checklist.toilet)
    )
}

fn format_history(history: &[f64]) -> String {
    let scores = history
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{scores}]")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
