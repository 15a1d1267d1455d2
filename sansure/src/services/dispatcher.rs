use std::sync::Arc;

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::config::LlmConfig;
use crate::error::{Result, SanSureError};
use crate::llm::{parse_json_response, prompts, ChatRequest, CompletionOptions, LlmClient};
use crate::models::{
    conformance_issue, CollusionRequest, CollusionResult, HealthNarrativeRequest,
    InvestorSignalRequest, InvestorSignalResult, JsonObject, Mode, VisionRequest, VisionResult,
};

/// Near-deterministic sampling for the structured modes.
const STRUCTURED_TEMPERATURE: f32 = 0.1;

/// Looser sampling so narratives don't read like a template.
const NARRATIVE_TEMPERATURE: f32 = 0.7;

/// Renders each mode's prompt, makes the single LLM call and interprets the
/// answer. Holds configuration only; every call builds its own client.
#[derive(Debug, Clone)]
pub struct ModeDispatcher {
    config: Arc<LlmConfig>,
}

impl ModeDispatcher {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Checks the credential without contacting the provider and returns the
    /// model id that would serve vision requests.
    pub fn health(&self) -> Result<&str> {
        self.config.credential()?;
        Ok(&self.config.vision_model)
    }

    pub async fn score_vision(&self, req: &VisionRequest) -> Result<JsonObject> {
        let mode = Mode::Vision;
        let image_url = req.image_data_url()?;
        let prompt = prompts::vision_prompt(&req.checklist);

        let text = self
            .call(
                mode,
                &self.config.vision_model,
                &prompt,
                Some(&image_url),
                STRUCTURED_TEMPERATURE,
            )
            .await?;

        Self::parse_structured::<VisionResult>(mode, &text)
    }

    pub async fn check_collusion(&self, req: &CollusionRequest) -> Result<JsonObject> {
        let mode = Mode::Collusion;
        let prompt = prompts::collusion_prompt(req);

        tracing::debug!(
            facility_id = req.facility_id(),
            submissions = req.submissions.len(),
            "Rendering collusion prompt"
        );

        let text = self
            .call(
                mode,
                &self.config.text_model,
                &prompt,
                None,
                STRUCTURED_TEMPERATURE,
            )
            .await?;

        Self::parse_structured::<CollusionResult>(mode, &text)
    }

    /// Returns the model's paragraph as-is; an empty answer is not an error.
    pub async fn narrate_health(&self, req: &HealthNarrativeRequest) -> Result<String> {
        let prompt = prompts::health_narrative_prompt(req);

        self.call(
            Mode::HealthNarrative,
            &self.config.text_model,
            &prompt,
            None,
            NARRATIVE_TEMPERATURE,
        )
        .await
    }

    pub async fn signal_investor(&self, req: &InvestorSignalRequest) -> Result<JsonObject> {
        let mode = Mode::InvestorSignal;
        let prompt = prompts::investor_signal_prompt(req);

        let text = self
            .call(
                mode,
                &self.config.text_model,
                &prompt,
                None,
                STRUCTURED_TEMPERATURE,
            )
            .await?;

        Self::parse_structured::<InvestorSignalResult>(mode, &text)
    }

    async fn call(
        &self,
        mode: Mode,
        model: &str,
        prompt: &str,
        image_url: Option<&str>,
        temperature: f32,
    ) -> Result<String> {
        let client = LlmClient::new(&self.config)?;

        tracing::info!(
            mode = %mode,
            mode_number = mode.number(),
            structured = mode.is_structured(),
            model,
            base_url = client.base_url(),
            "Sending LLM request"
        );

        let request = ChatRequest {
            model,
            system_prompt: prompts::SYSTEM_INSTRUCTION,
            prompt,
            image_url,
            options: CompletionOptions {
                temperature: Some(temperature),
            },
        };
        let text = client.complete(&request).await?;

        tracing::info!(
            mode = %mode,
            mode_number = mode.number(),
            response_len = text.len(),
            "LLM response received"
        );

        Ok(text)
    }

    fn parse_structured<T>(mode: Mode, text: &str) -> Result<JsonObject>
    where
        T: DeserializeOwned + Validate,
    {
        let object = parse_json_response(text).map_err(|failure| SanSureError::Parse {
            mode,
            snippet: failure.snippet,
        })?;

        // Out-of-contract answers are still returned unchanged.
        if let Some(issue) = conformance_issue::<T>(&object) {
            tracing::warn!(mode = %mode, issue = %issue, "LLM answer departs from response contract");
        }

        Ok(object)
    }
}
