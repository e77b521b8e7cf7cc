//! Verify Email Use Case

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct VerifyEmailUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> VerifyEmailUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// Marks the account verified and returns it.
    ///
    /// The token must decode, belong to an unverified user, and be the token
    /// currently stored for that user.
    pub async fn execute(&self, token: Option<&str>) -> AuthResult<User> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingVerificationToken)?;

        let claims = self.tokens.decode_verification(token).map_err(|e| {
            tracing::debug!(error = %e, "Verification token rejected");
            AuthError::InvalidVerificationToken
        })?;

        let mut user = self
            .user_repo
            .find_by_email(&Email::from_db(claims.email))
            .await?
            .filter(|u| !u.is_verified && u.verification_token.as_deref() == Some(token))
            .ok_or(AuthError::InvalidVerificationToken)?;

        user.mark_verified();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        Ok(user)
    }
}
