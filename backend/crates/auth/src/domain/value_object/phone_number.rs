//! Phone Number Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// 8 to 15 digits with an optional leading `+`. Spaces and dashes typed by
/// the user are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let compact: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        let digits = compact.strip_prefix('+').unwrap_or(&compact);
        let valid = digits.chars().all(|c| c.is_ascii_digit())
            && (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len());

        if !valid {
            return Err(AppError::bad_request(format!(
                "Phone number must be {} to {} digits, optionally starting with +",
                MIN_DIGITS, MAX_DIGITS
            )));
        }

        Ok(Self(compact))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_local_and_international() {
        assert_eq!(PhoneNumber::new("081234567890").unwrap().as_str(), "081234567890");
        assert_eq!(PhoneNumber::new("+62 812-3456-7890").unwrap().as_str(), "+6281234567890");
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(PhoneNumber::new("1234567").is_err());
        assert!(PhoneNumber::new("1234567890123456").is_err());
        assert!(PhoneNumber::new("0812abcd567").is_err());
        assert!(PhoneNumber::new("++6281234567").is_err());
    }
}
