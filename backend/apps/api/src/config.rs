//! Process configuration
//!
//! Everything is read from the environment (after `.env` is loaded). Required
//! keys fail startup; the rest fall back to local-development defaults.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::application::config::SameSite;
use auth::{AuthConfig, GoogleOAuthConfig, ResendConfig};
use secrecy::SecretString;
use shipping::ShippingConfig;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub resend: ResendConfig,
    pub google: GoogleOAuthConfig,
    pub shipping: ShippingConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).with_context(|| format!("{key} must be set"));
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters");
        }

        let public_api_url = or("PUBLIC_API_URL", "http://localhost:8000");
        let frontend_url = or("FRONTEND_URL", "http://localhost:3000");

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => v
                .parse::<bool>()
                .with_context(|| format!("COOKIE_SECURE must be true or false, got {v}"))?,
            None => true,
        };
        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(v) => Duration::from_secs(v.parse().context("SESSION_TTL_SECS must be seconds")?),
            None => Duration::from_secs(24 * 3600),
        };

        let auth = AuthConfig {
            jwt_secret: SecretString::from(jwt_secret),
            session_ttl,
            cookie_secure,
            cookie_same_site: if cookie_secure { SameSite::None } else { SameSite::Lax },
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_url,
            public_api_url: public_api_url.clone(),
            ..AuthConfig::default()
        };

        let mut resend = ResendConfig::new(SecretString::from(required("RESEND_API_KEY")?));
        if let Some(from) = get("EMAIL_FROM") {
            resend.from = from;
        }

        let google = GoogleOAuthConfig::new(
            required("GOOGLE_CLIENT_ID")?,
            SecretString::from(required("GOOGLE_CLIENT_SECRET")?),
            get("GOOGLE_REDIRECT_URL").unwrap_or_else(|| {
                format!(
                    "{}/auth/google/callback",
                    public_api_url.trim_end_matches('/')
                )
            }),
        );

        let mut shipping = ShippingConfig::new(SecretString::from(required("RAJA_ONGKIR_API_KEY")?));
        if let Some(base_url) = get("RAJA_ONGKIR_BASE_URL") {
            shipping = shipping.with_base_url(base_url);
        }

        let frontend_origins = or("FRONTEND_ORIGINS", DEFAULT_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            max_connections: or("DATABASE_MAX_CONNECTIONS", "5")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            port: or("PORT", "8000").parse().context("PORT must be a port number")?,
            frontend_origins,
            auth,
            resend,
            google,
            shipping,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/marketsnap"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("RESEND_API_KEY", "re_test"),
            ("GOOGLE_CLIENT_ID", "client"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
            ("RAJA_ONGKIR_API_KEY", "ro_test"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(env(&minimal())).unwrap();

        assert_eq!(config.port, 8000);
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(86400));
        assert_eq!(
            config.google.redirect_url,
            "http://localhost:8000/auth/google/callback"
        );
        assert_eq!(config.shipping.base_url, "https://api.rajaongkir.com/starter");
        assert_eq!(config.shipping.api_key.expose_secret(), "ro_test");
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = minimal();
        pairs.extend([
            ("PORT", "9000"),
            ("COOKIE_SECURE", "false"),
            ("SESSION_TTL_SECS", "3600"),
            ("PUBLIC_API_URL", "https://api.marketsnap.id/"),
            ("FRONTEND_ORIGINS", "https://marketsnap.id, "),
            ("EMAIL_FROM", "MarketSnap <no-reply@marketsnap.id>"),
        ]);
        let config = ApiConfig::from_lookup(env(&pairs)).unwrap();

        assert_eq!(config.port, 9000);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(3600));
        assert_eq!(
            config.google.redirect_url,
            "https://api.marketsnap.id/auth/google/callback"
        );
        assert_eq!(config.frontend_origins, vec!["https://marketsnap.id".to_string()]);
        assert_eq!(config.resend.from, "MarketSnap <no-reply@marketsnap.id>");
    }

    #[test]
    fn test_missing_or_weak_secrets_fail() {
        let without_db: Vec<_> = minimal()
            .into_iter()
            .filter(|(k, _)| *k != "DATABASE_URL")
            .collect();
        let err = ApiConfig::from_lookup(env(&without_db)).err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));

        let mut weak = minimal();
        weak.retain(|(k, _)| *k != "JWT_SECRET");
        weak.push(("JWT_SECRET", "short"));
        assert!(ApiConfig::from_lookup(env(&weak)).is_err());
    }
}
