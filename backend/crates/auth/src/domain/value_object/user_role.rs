use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, stored as its upper-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    StoreAdmin,
    SuperAdmin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            User => "USER",
            StoreAdmin => "STORE_ADMIN",
            SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// `None` for codes this build does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "USER" => Some(User),
            "STORE_ADMIN" => Some(StoreAdmin),
            "SUPER_ADMIN" => Some(SuperAdmin),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for role in [UserRole::User, UserRole::StoreAdmin, UserRole::SuperAdmin] {
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
        assert_eq!(UserRole::from_code("admin"), None);
    }

    #[test]
    fn test_serde_matches_code() {
        assert_eq!(
            serde_json::to_string(&UserRole::StoreAdmin).unwrap(),
            "\"STORE_ADMIN\""
        );
        let role: UserRole = serde_json::from_str("\"SUPER_ADMIN\"").unwrap();
        assert!(role.is_super_admin());
    }
}
