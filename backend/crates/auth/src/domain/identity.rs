//! Federated identity port (OAuth 2.0 authorization code flow)

use crate::domain::value_object::person_name::PERSON_NAME_MAX_LENGTH;
use crate::error::AuthResult;

pub const FALLBACK_FIRST_NAME: &str = "Google";
pub const FALLBACK_LAST_NAME: &str = "Account";

/// Profile returned by the identity provider after a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    /// Provider's stable user id
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl FederatedProfile {
    /// First word becomes the first name, the rest the last name.
    ///
    /// A single-word name gets the last name "Account"; no name at all
    /// becomes "Google User". Each part is cut to the person-name limit.
    pub fn split_name(&self) -> (String, String) {
        let mut words = self
            .display_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace();

        match words.next() {
            None => (FALLBACK_FIRST_NAME.to_string(), "User".to_string()),
            Some(first) => {
                let rest = words.collect::<Vec<_>>().join(" ");
                let last = if rest.is_empty() {
                    FALLBACK_LAST_NAME.to_string()
                } else {
                    rest
                };
                (truncate(first), truncate(&last))
            }
        }
    }
}

fn truncate(part: &str) -> String {
    part.chars().take(PERSON_NAME_MAX_LENGTH).collect()
}

#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Consent screen URL carrying `state`.
    fn authorization_url(&self, state: &str) -> AuthResult<String>;

    /// Trade the authorization code for the user's profile.
    async fn exchange(&self, code: &str) -> AuthResult<FederatedProfile>;
}
