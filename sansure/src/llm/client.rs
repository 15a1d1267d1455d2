use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, ImageUrlArgs,
    },
    Client,
};

use crate::{
    config::LlmConfig,
    error::{Result, SanSureError},
};

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
}

/// One chat-completion exchange.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub prompt: &'a str,
    /// `data:` or `https:` URL sent as an image part ahead of the prompt.
    pub image_url: Option<&'a str>,
    pub options: CompletionOptions,
}

/// Chat-completion client for the OpenAI-compatible provider endpoint.
///
/// Built per request. Makes exactly one attempt per call: the provider
/// library's transient-error backoff is given a zero time budget.
#[derive(Clone)]
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    base_url: String,
}

impl LlmClient {
    /// Fails with [`SanSureError::Configuration`] when no usable API key is
    /// configured, before any network activity.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config.credential()?;

        let openai_config = OpenAIConfig::new()
            .with_api_base(config.base_url.clone())
            .with_api_key(api_key.to_string());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                SanSureError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the request and returns the answer text, empty when the model
    /// returned no content.
    pub async fn complete(&self, request: &ChatRequest<'_>) -> Result<String> {
        let request = Self::build_request(request)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(Self::map_openai_error)?;

        Self::extract_content(response)
    }

    fn build_request(request: &ChatRequest<'_>) -> Result<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_prompt)
            .build()
            .map_err(|error| SanSureError::Internal(format!("Invalid system prompt: {error}")))?;

        let mut user = ChatCompletionRequestUserMessageArgs::default();
        match request.image_url {
            Some(url) => {
                user.content(Self::image_parts(url, request.prompt)?);
            }
            None => {
                user.content(request.prompt);
            }
        }
        let user = user
            .build()
            .map_err(|error| SanSureError::Internal(format!("Invalid user prompt: {error}")))?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(request.model)
            .messages(vec![system.into(), user.into()]);

        if let Some(temperature) = request.options.temperature {
            builder.temperature(temperature);
        }

        builder.build().map_err(|error| {
            SanSureError::Internal(format!("Invalid LLM completion request: {error}"))
        })
    }

    fn image_parts(
        url: &str,
        prompt: &str,
    ) -> Result<Vec<ChatCompletionRequestUserMessageContentPart>> {
        let image_url = ImageUrlArgs::default()
            .url(url)
            .build()
            .map_err(|error| SanSureError::Internal(format!("Invalid image URL: {error}")))?;

        let image = ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(image_url)
            .build()
            .map_err(|error| SanSureError::Internal(format!("Invalid image part: {error}")))?;

        let text = ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(prompt)
            .build()
            .map_err(|error| SanSureError::Internal(format!("Invalid text part: {error}")))?;

        Ok(vec![image.into(), text.into()])
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SanSureError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(content)
    }

    fn map_openai_error(error: OpenAIError) -> SanSureError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                SanSureError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                SanSureError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                SanSureError::Llm(format!("Failed to decode LLM response: {err}"))
            }
            other => SanSureError::Llm(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_API_KEY;

    fn test_llm_config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://localhost:9/v1".to_string(),
            vision_model: "vision-model".to_string(),
            text_model: "text-model".to_string(),
            timeout_secs: 5,
        }
    }

    fn chat_request<'a>(prompt: &'a str, image_url: Option<&'a str>) -> ChatRequest<'a> {
        ChatRequest {
            model: "text-model",
            system_prompt: "system rules",
            prompt,
            image_url,
            options: CompletionOptions {
                temperature: Some(0.1),
            },
        }
    }

    #[test]
    fn client_requires_api_key() {
        let result = LlmClient::new(&test_llm_config(None));
        assert!(matches!(result, Err(SanSureError::Configuration(_))));
    }

    #[test]
    fn client_rejects_placeholder_key() {
        let result = LlmClient::new(&test_llm_config(Some(PLACEHOLDER_API_KEY)));
        assert!(matches!(result, Err(SanSureError::Configuration(_))));
    }

    #[test]
    fn client_keeps_configured_base_url() {
        let client = LlmClient::new(&test_llm_config(Some("gsk_test"))).expect("client");
        assert_eq!(client.base_url(), "http://localhost:9/v1");
    }

    #[test]
    fn text_request_has_system_then_user_message() {
        let request = LlmClient::build_request(&chat_request("hello", None)).expect("request");
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["model"], "text-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "system rules");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert!((json["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn image_request_puts_image_before_text() {
        let request =
            LlmClient::build_request(&chat_request("grade this", Some("data:image/png;base64,AAAA")))
                .expect("request");
        let json = serde_json::to_value(&request).expect("serialize");

        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[0]["image_url"]["url"], "data:image/png;base64,AAAA");
        assert_eq!(parts[1]["type"], "text");
        assert_eq!(parts[1]["text"], "grade this");
    }
}
