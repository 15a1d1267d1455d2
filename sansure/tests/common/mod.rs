// Shared helpers for the HTTP-level tests
#![allow(dead_code)]

use std::sync::Once;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sansure::api::{create_router, AppState};
use sansure::config::{Config, LlmConfig, ServerConfig};

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

// 1x1 transparent PNG
pub const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn test_config(api_key: Option<&str>, base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![FRONTEND_ORIGIN.to_string()],
            max_body_bytes: 1024 * 1024,
        },
        llm: LlmConfig {
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            vision_model: "vision-model".to_string(),
            text_model: "text-model".to_string(),
            timeout_secs: 5,
        },
    }
}

/// Router whose LLM calls go to the given mock server.
pub fn app(server_uri: &str) -> Router {
    init_test_logger();
    create_router(AppState::new(test_config(
        Some("gsk_test"),
        &format!("{server_uri}/v1"),
    )))
}

pub fn app_with_config(config: Config) -> Router {
    init_test_logger();
    create_router(AppState::new(config))
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "text-model",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");

    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request");

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

/// JSON bodies of every chat-completion request the mock server received.
pub async fn received_completions(server: &wiremock::MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
        .collect()
}

pub fn submission(id: &str, submitter_type: &str, score: i64) -> Value {
    json!({
        "id": id,
        "facilityId": "FAC-042",
        "submitterType": submitter_type,
        "score": score,
        "checklist": {"door": true, "water": true, "clean": true, "toilet": true},
        "features": ["door", "bucket"],
        "discrepancies": []
    })
}
