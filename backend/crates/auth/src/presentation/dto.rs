//! Data Transfer Objects
//!
//! Request payloads are all-optional so that missing fields are reported as
//! field errors rather than as body rejections.

use serde::Deserialize;

use crate::application::{LoginInput, RegisterInput};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub phone_number: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            user_name: req.username,
            password: req.password,
            phone_number: req.phone_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            user_name: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// `?token=` on the verification routes
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Query string Google appends to the callback URL
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_is_camel_case_and_lenient() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.co","firstName":"Budi","username":"budi"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "Budi");
        assert!(req.last_name.is_empty());
        assert!(req.phone_number.is_none());
    }
}
