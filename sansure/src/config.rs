use std::env;

use crate::error::{Result, SanSureError};

/// Value shipped in the sample `.env`; treated the same as an unset key.
pub const PLACEHOLDER_API_KEY: &str = "PLACEHOLDER_API_KEY";

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Vision-capable Llama 4 Scout; also used for the text-only modes.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated list, dropping blank entries.
fn parse_env_list(var: &str, default: &[&str]) -> Vec<String> {
    match env::var(var) {
        Ok(val) if !val.trim().is_empty() => val
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => default.iter().map(|item| item.to_string()).collect(),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
    /// Upper bound on request bodies; vision payloads carry base64 images.
    pub max_body_bytes: usize,
}

/// LLM configuration for the chat-completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub vision_model: String,
    pub text_model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Returns the usable API key, or the configuration error every mode
    /// reports before touching the network.
    pub fn credential(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(SanSureError::Configuration(
                "GROQ_API_KEY not set in environment or .env".to_string(),
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SANSURE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("SANSURE_PORT", 8000),
                cors_origins: parse_env_list("SANSURE_CORS_ORIGINS", DEFAULT_CORS_ORIGINS),
                max_body_bytes: parse_env_or("SANSURE_MAX_BODY_BYTES", 20 * 1024 * 1024),
            },
            llm: LlmConfig {
                api_key: env::var("GROQ_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").unwrap_or_else(|_| GROQ_BASE_URL.to_string()),
                vision_model: env::var("SANSURE_VISION_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                text_model: env::var("SANSURE_TEXT_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
