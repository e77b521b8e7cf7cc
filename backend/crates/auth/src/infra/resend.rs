//! Resend transactional email client
//!
//! `POST {base_url}/emails` with a bearer API key.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::mailer::{Mailer, OutgoingEmail};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: SecretString,
    /// `Display Name <address>`
    pub from: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            from: "MarketSnap <cs@resend.dev>".to_string(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    config: ResendConfig,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> AuthResult<()> {
        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        let body = SendEmailRequest {
            from: &self.config.from,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::EmailDelivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AuthError::EmailDelivery(format!("{status}: {detail}")));
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| AuthError::EmailDelivery(format!("unreadable response: {e}")))?;

        tracing::info!(
            message_id = sent.id.as_deref().unwrap_or("-"),
            to_domain = %email.to.domain(),
            "Verification email sent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::domain::value_object::email::Email;

    fn mailer(server: &MockServer) -> ResendMailer {
        let mut config = ResendConfig::new(SecretString::from("re_test".to_string()));
        config.base_url = server.url("");
        ResendMailer::new(config).unwrap()
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: Email::new("budi@example.com").unwrap(),
            subject: "Verify your email".to_string(),
            html: "<p>123456</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_message_with_bearer_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/emails")
                    .header("authorization", "Bearer re_test")
                    .json_body(json!({
                        "from": "MarketSnap <cs@resend.dev>",
                        "to": ["budi@example.com"],
                        "subject": "Verify your email",
                        "html": "<p>123456</p>"
                    }));
                then.status(200).json_body(json!({ "id": "msg_1" }));
            })
            .await;

        mailer(&server).send(email()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_send_is_email_delivery_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(422)
                    .json_body(json!({ "name": "validation_error", "message": "Invalid `to` field" }));
            })
            .await;

        let err = mailer(&server).send(email()).await.unwrap_err();
        assert!(matches!(&err, AuthError::EmailDelivery(msg) if msg.contains("422")));
        assert_eq!(err.kind().status_code(), 502);
    }

    #[tokio::test]
    async fn test_provider_outage_is_email_delivery_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/emails");
                then.status(500).body("internal error");
            })
            .await;

        let err = mailer(&server).send(email()).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailDelivery(_)));
    }
}
