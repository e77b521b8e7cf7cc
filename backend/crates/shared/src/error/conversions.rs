//! Error conversions
//!
//! Turns [`AppError`] into the `{ message, action?, errors? }` JSON body,
//! and body-extraction failures into field errors for that envelope.

use super::app_error::AppError;
#[cfg(feature = "axum")]
use super::app_error::FieldErrors;

#[cfg(feature = "axum")]
const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// Field errors for a rejected JSON body.
///
/// Type mismatches are keyed by the offending field path (`stock`,
/// `categoryIds[0]`); everything else (syntax, missing content type) lands
/// under `body`.
#[cfg(feature = "axum")]
pub fn json_rejection_errors(rejection: &axum::extract::rejection::JsonRejection) -> FieldErrors {
    use axum::extract::rejection::JsonRejection;

    let text = rejection.body_text();
    let (field, message) = match rejection {
        JsonRejection::JsonDataError(_) => {
            let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(&text);
            match detail.split_once(": ") {
                Some((path, reason)) if !path.is_empty() && !path.contains(' ') => {
                    (path.to_string(), reason.to_string())
                }
                _ => ("body".to_string(), detail.to_string()),
            }
        }
        _ => ("body".to_string(), text),
    };

    let mut errors = FieldErrors::new();
    errors.entry(field).or_default().push(message);
    errors
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::Map::new();
        body.insert("message".into(), self.message().into());
        if let Some(action) = self.action() {
            body.insert("action".into(), action.into());
        }
        if let Some(fields) = self.field_errors() {
            body.insert("errors".into(), serde_json::json!(fields));
        }

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}
