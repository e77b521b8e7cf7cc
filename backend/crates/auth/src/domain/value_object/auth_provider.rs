use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an account's credentials live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Google,
}

impl AuthProvider {
    pub const fn code(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "local" => Some(AuthProvider::Local),
            "google" => Some(AuthProvider::Google),
            _ => None,
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AuthProvider::from_code("google"), Some(AuthProvider::Google));
        assert_eq!(AuthProvider::from_code("local"), Some(AuthProvider::Local));
        assert_eq!(AuthProvider::from_code("github"), None);
        assert_eq!(AuthProvider::Google.to_string(), "google");
    }
}
