//! Google OAuth 2.0 / OpenID Connect client
//!
//! Authorization code flow: consent URL, code-for-token exchange, userinfo.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::identity::{FederatedProfile, IdentityProvider};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Must match the callback registered with Google
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub timeout: Duration,
}

impl GoogleOAuthConfig {
    pub fn new(client_id: String, client_secret: SecretString, redirect_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_url,
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    config: GoogleOAuthConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleOAuthConfig) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

fn upstream(stage: &'static str) -> impl Fn(reqwest::Error) -> AuthError {
    move |e| AuthError::IdentityProvider(format!("{stage}: {e}"))
}

impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> AuthResult<String> {
        let url = reqwest::Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::Internal(format!("invalid Google auth URL: {e}")))?;

        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> AuthResult<FederatedProfile> {
        let token: TokenResponse = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.expose_secret()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream("token exchange"))?
            .json()
            .await
            .map_err(upstream("token response"))?;

        let info: UserInfo = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream("userinfo"))?
            .json()
            .await
            .map_err(upstream("userinfo response"))?;

        Ok(FederatedProfile {
            subject: info.sub,
            email: info.email,
            display_name: info.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn mocked(server: &MockServer) -> GoogleIdentityProvider {
        let mut config = GoogleOAuthConfig::new(
            "client-123".to_string(),
            SecretString::from("secret".to_string()),
            "http://localhost:8000/auth/google/callback".to_string(),
        );
        config.token_url = server.url("/token");
        config.userinfo_url = server.url("/userinfo");
        GoogleIdentityProvider::new(config).unwrap()
    }

    #[test]
    fn test_authorization_url_carries_state_and_scopes() {
        let provider = GoogleIdentityProvider::new(GoogleOAuthConfig::new(
            "client-123".to_string(),
            SecretString::from("secret".to_string()),
            "http://localhost:8000/auth/google/callback".to_string(),
        ))
        .unwrap();

        let url = reqwest::Url::parse(&provider.authorization_url("xyz").unwrap()).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["state"], "xyz");
        assert_eq!(params["scope"], "openid email profile");
        assert_eq!(params["response_type"], "code");
        assert_eq!(
            params["redirect_uri"],
            "http://localhost:8000/auth/google/callback"
        );
    }

    #[tokio::test]
    async fn test_exchange_trades_code_for_profile() {
        let server = MockServer::start_async().await;
        let token = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/token")
                    .body_contains("code=auth-code")
                    .body_contains("grant_type=authorization_code")
                    .body_contains("client_id=client-123");
                then.status(200)
                    .json_body(json!({ "access_token": "at-1", "token_type": "Bearer" }));
            })
            .await;
        let userinfo = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/userinfo")
                    .header("authorization", "Bearer at-1");
                then.status(200).json_body(json!({
                    "sub": "1098",
                    "email": "siti@example.com",
                    "name": "Siti Nurhaliza"
                }));
            })
            .await;

        let profile = mocked(&server).exchange("auth-code").await.unwrap();

        token.assert_async().await;
        userinfo.assert_async().await;
        assert_eq!(profile.subject, "1098");
        assert_eq!(profile.email.as_deref(), Some("siti@example.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Siti Nurhaliza"));
    }

    #[tokio::test]
    async fn test_rejected_code_is_identity_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(400).json_body(json!({ "error": "invalid_grant" }));
            })
            .await;
        let userinfo = server
            .mock_async(|when, then| {
                when.method(GET).path("/userinfo");
                then.status(200).json_body(json!({ "sub": "1098" }));
            })
            .await;

        let err = mocked(&server).exchange("stale").await.unwrap_err();
        assert!(matches!(&err, AuthError::IdentityProvider(msg) if msg.starts_with("token exchange")));
        assert_eq!(err.kind().status_code(), 502);
        userinfo.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_userinfo_failure_is_identity_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).json_body(json!({ "access_token": "at-1" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/userinfo");
                then.status(401).json_body(json!({ "error": "invalid_token" }));
            })
            .await;

        let err = mocked(&server).exchange("auth-code").await.unwrap_err();
        assert!(matches!(&err, AuthError::IdentityProvider(msg) if msg.starts_with("userinfo")));
    }
}
