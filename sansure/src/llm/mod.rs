mod client;
pub mod parse;
pub mod prompts;

pub use client::{ChatRequest, CompletionOptions, LlmClient};
pub use parse::{parse_json_response, ParseFailure};
