//! Session and verification tokens
//!
//! Both are HS256 JWTs signed with the same secret. Sessions are stateless:
//! logout only clears the cookie, so a token stays valid until `exp`.

use std::time::Duration;

use chrono::Utc;
use kernel::id::UserId;
use platform::jwt::{JwtCodec, TokenError};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, user_role::UserRole,
};
use crate::error::AuthResult;

/// Identity carried by the `accessToken` cookie or bearer header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: UserId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub is_verified: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    codec: JwtCodec,
    session_ttl: Duration,
    verification_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            codec: JwtCodec::new(config.jwt_secret.expose_secret().as_bytes()),
            session_ttl: config.session_ttl,
            verification_ttl: config.verification_ttl,
        }
    }

    pub fn session_claims(&self, user: &User) -> SessionClaims {
        let iat = Utc::now().timestamp();
        SessionClaims {
            sub: user.user_id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            full_name: user.full_name(),
            username: user.user_name.as_ref().map(|u| u.to_string()),
            email: user.email.to_string(),
            role: user.role,
            provider: user.provider,
            is_verified: user.is_verified,
            iat,
            exp: iat + self.session_ttl.as_secs() as i64,
        }
    }

    pub fn encode_session(&self, claims: &SessionClaims) -> AuthResult<String> {
        Ok(self.codec.encode(claims)?)
    }

    pub fn decode_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.codec.decode(token)
    }

    pub fn issue_verification(&self, email: &Email) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let claims = VerificationClaims {
            email: email.to_string(),
            iat,
            exp: iat + self.verification_ttl.as_secs() as i64,
        };
        Ok(self.codec.encode(&claims)?)
    }

    pub fn decode_verification(&self, token: &str) -> Result<VerificationClaims, TokenError> {
        self.codec.decode(token)
    }
}
