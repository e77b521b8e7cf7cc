//! Outbound email port

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// A rendered transactional email.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: Email,
    pub subject: String,
    pub html: String,
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Hand the message to the provider. Delivery failures surface as
    /// `AuthError::EmailDelivery`.
    async fn send(&self, email: OutgoingEmail) -> AuthResult<()>;
}
