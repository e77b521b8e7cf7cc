//! RajaOngkir client configuration

use std::time::Duration;

use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct ShippingConfig {
    /// Sent as the `key` header
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout: Duration,
}

impl ShippingConfig {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: "https://api.rajaongkir.com/starter".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
