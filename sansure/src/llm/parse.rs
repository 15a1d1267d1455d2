//! Lenient decoding of model answers that are supposed to be bare JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::JsonObject;

/// Characters of an unparseable answer written to the log.
const LOG_PREVIEW_CHARS: usize = 200;

/// Characters of an unparseable answer carried in the error.
pub const SNIPPET_CHARS: usize = 300;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|```").expect("code fence pattern is valid"));

/// The answer was not a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Leading part of the offending text, at most [`SNIPPET_CHARS`] characters.
    pub snippet: String,
    pub reason: String,
}

/// Removes markdown code-fence markers wherever they appear.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Parses a model answer into a non-empty JSON object, tolerating code
/// fences the model was told not to emit. `{}` answers nothing and fails.
pub fn parse_json_response(text: &str) -> Result<JsonObject, ParseFailure> {
    let cleaned = strip_code_fences(text);

    let reason = if cleaned.is_empty() {
        "empty response".to_string()
    } else {
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(object)) if !object.is_empty() => return Ok(object),
            Ok(Value::Object(_)) => "empty JSON object".to_string(),
            Ok(other) => format!("expected a JSON object, got {}", json_kind(&other)),
            Err(e) => e.to_string(),
        }
    };

    tracing::error!(
        response_len = text.len(),
        response_preview = %preview(text, LOG_PREVIEW_CHARS),
        error = %reason,
        "Failed to parse JSON response"
    );

    Err(ParseFailure {
        snippet: preview(text, SNIPPET_CHARS),
        reason,
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fenced_json_parses_like_bare_json() {
        let fenced = parse_json_response("```json\n{\"a\":1}\n```").expect("fenced");
        let bare = parse_json_response("{\"a\":1}").expect("bare");

        assert_eq!(fenced, bare);
        assert_eq!(fenced["a"], json!(1));
    }

    #[test]
    fn bare_fence_without_language_is_stripped() {
        let parsed = parse_json_response("```\n{\"trend\": \"stable\"}\n```").expect("parse");
        assert_eq!(parsed["trend"], json!("stable"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let parsed = parse_json_response("\n\n  {\"ok\": true}  \n").expect("parse");
        assert_eq!(parsed["ok"], json!(true));
    }

    #[test]
    fn truncated_json_is_a_parse_failure() {
        let failure = parse_json_response(r#"{"a":1"#).expect_err("truncated");
        assert_eq!(failure.snippet, r#"{"a":1"#);
        assert!(!failure.reason.is_empty());
    }

    #[test]
    fn snippet_is_bounded() {
        let long = format!("{{\"text\": \"{}", "x".repeat(1_000));
        let failure = parse_json_response(&long).expect_err("unterminated");

        assert_eq!(failure.snippet.chars().count(), SNIPPET_CHARS);
        assert!(long.starts_with(&failure.snippet));
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let long = "स्वच्छता ".repeat(100);
        let failure = parse_json_response(&long).expect_err("prose");
        assert_eq!(failure.snippet.chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn empty_text_is_a_parse_failure() {
        let failure = parse_json_response("").expect_err("empty");
        assert_eq!(failure.snippet, "");
        assert_eq!(failure.reason, "empty response");
    }

    #[test]
    fn fence_only_text_is_a_parse_failure() {
        assert!(parse_json_response("```json\n```").is_err());
    }

    #[test]
    fn empty_object_is_a_parse_failure() {
        let failure = parse_json_response("```json\n{}\n```").expect_err("empty object");
        assert_eq!(failure.reason, "empty JSON object");
        assert_eq!(failure.snippet, "```json\n{}\n```");
    }

    #[test]
    fn json_array_is_not_an_object() {
        let failure = parse_json_response("[1, 2, 3]").expect_err("array");
        assert!(failure.reason.contains("an array"));
    }

    #[test]
    fn prose_answer_is_a_parse_failure() {
        let failure =
            parse_json_response("I'm sorry, I cannot assess this image.").expect_err("prose");
        assert_eq!(failure.snippet, "I'm sorry, I cannot assess this image.");
    }

    #[test]
    fn strip_code_fences_keeps_inner_text() {
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("plain"), "plain");
    }
}
