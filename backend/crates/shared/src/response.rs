//! Success envelope
//!
//! Successful JSON responses share the shape `{ "message"?, "data"? }`.

use std::borrow::Cow;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Message only, no payload.
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
        }
    }

    pub fn with_data(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Logout success")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Logout success" }));
    }

    #[test]
    fn test_with_data() {
        let json = serde_json::to_value(ApiResponse::with_data("Stores fetched.", vec![1, 2])).unwrap();
        assert_eq!(json["message"], "Stores fetched.");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
