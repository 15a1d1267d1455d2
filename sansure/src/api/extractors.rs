use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::SanSureError;

/// JSON body extractor that reports rejections as `{detail}` responses.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(SanSureError))]
pub struct AppJson<T>(pub T);

/// [`AppJson`] plus the type's `validator` rules. Handlers only ever see a
/// payload that passed both, so no LLM call is made for a bad request.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = SanSureError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|errors| SanSureError::Validation(errors.to_string()))?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for SanSureError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> SanSureError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                SanSureError::Validation(format!("Missing required field: {field}"))
            } else {
                SanSureError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            SanSureError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            SanSureError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            SanSureError::PayloadTooLarge(err.body_text())
        }
        JsonRejection::BytesRejection(err) => {
            SanSureError::Validation(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => SanSureError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_extracted() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `std_dev` at line 1 column 40";
        assert_eq!(extract_missing_field(message), Some("std_dev"));
    }

    #[test]
    fn other_messages_have_no_field() {
        assert_eq!(extract_missing_field("invalid type: string \"x\", expected u64"), None);
    }
}
