//! Person Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const PERSON_NAME_MAX_LENGTH: usize = 100;

/// First or last name. NFC-normalized, trimmed, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// `field` names the input in error messages ("First name", "Last name").
    pub fn new(raw: impl AsRef<str>, field: &str) -> AppResult<Self> {
        let name: String = raw.as_ref().trim().nfc().collect();

        if name.is_empty() {
            return Err(AppError::bad_request(format!("{} is required", field)));
        }
        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{} must be at most {} characters",
                field, PERSON_NAME_MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(format!(
                "{} contains invalid characters",
                field
            )));
        }

        Ok(Self(name))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_accepts_unicode() {
        assert_eq!(PersonName::new("  Siti ", "First name").unwrap().as_str(), "Siti");
        assert!(PersonName::new("Nguyễn", "Last name").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_long() {
        let err = PersonName::new("   ", "First name").unwrap_err();
        assert_eq!(err.message(), "First name is required");
        assert!(PersonName::new("x".repeat(PERSON_NAME_MAX_LENGTH + 1), "Last name").is_err());
    }
}
