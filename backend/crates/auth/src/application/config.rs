//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use secrecy::SecretString;

pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Short-lived cookie holding the OAuth CSRF state
    pub oauth_state_cookie_name: String,
    /// HS256 signing secret for session and verification tokens
    pub jwt_secret: SecretString,
    pub session_ttl: Duration,
    pub verification_ttl: Duration,
    pub oauth_state_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Where browsers land after verification or federated login
    pub frontend_url: String,
    /// Externally reachable base URL of this API, used in emailed links
    pub public_api_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "accessToken".to_string(),
            oauth_state_cookie_name: "oauthState".to_string(),
            jwt_secret: SecretString::from(String::new()),
            session_ttl: Duration::from_secs(24 * 3600),
            verification_ttl: Duration::from_secs(24 * 3600),
            oauth_state_ttl: Duration::from_secs(10 * 60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            frontend_url: "http://localhost:3000".to_string(),
            public_api_url: "http://localhost:8000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Config with a random signing secret (tokens die with the process)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: SecretString::from(platform::crypto::random_token(32)),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.session_cookie_name)
            .secure(self.cookie_secure)
            .same_site(self.cookie_same_site)
            .max_age(self.session_ttl.as_secs() as i64)
    }

    pub fn oauth_state_cookie(&self) -> CookieConfig {
        CookieConfig::new(&self.oauth_state_cookie_name)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(self.oauth_state_ttl.as_secs() as i64)
    }

    /// Link embedded in the welcome email.
    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/auth/verify-email?token={}",
            self.public_api_url.trim_end_matches('/'),
            token
        )
    }

    /// Where a failed federated login is sent.
    pub fn login_failed_url(&self) -> String {
        format!(
            "{}/auth/login/failed",
            self.public_api_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_follows_config() {
        let config = AuthConfig::development();
        let cookie = config.session_cookie().build_set_cookie("t");

        assert!(cookie.starts_with("accessToken=t"));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_links() {
        let config = AuthConfig {
            public_api_url: "https://api.marketsnap.id/".to_string(),
            ..AuthConfig::default()
        };
        assert_eq!(
            config.verification_link("abc"),
            "https://api.marketsnap.id/auth/verify-email?token=abc"
        );
        assert_eq!(
            config.login_failed_url(),
            "https://api.marketsnap.id/auth/login/failed"
        );
    }
}
