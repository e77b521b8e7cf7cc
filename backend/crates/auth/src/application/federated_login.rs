//! Federated Login Use Case
//!
//! Finds or creates the account behind an identity-provider profile and
//! issues a session for it. Accounts are matched on email only.

use std::sync::Arc;

use crate::application::login::LoginOutput;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::identity::{FALLBACK_FIRST_NAME, FALLBACK_LAST_NAME, IdentityProvider};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, person_name::PersonName,
};
use crate::error::{AuthError, AuthResult};

pub struct FederatedLoginUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    user_repo: Arc<U>,
    identity: Arc<P>,
    tokens: Arc<TokenService>,
}

impl<U, P> FederatedLoginUseCase<U, P>
where
    U: UserRepository,
    P: IdentityProvider,
{
    pub fn new(user_repo: Arc<U>, identity: Arc<P>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            identity,
            tokens,
        }
    }

    pub async fn execute(&self, code: &str) -> AuthResult<LoginOutput> {
        let profile = self.identity.exchange(code).await?;

        let email = profile
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(AuthError::EmailNotInProfile)?;
        let email = Email::new(email)
            .map_err(|e| AuthError::IdentityProvider(format!("unusable email: {}", e.message())))?;

        let mut user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let (first, last) = profile.split_name();
                let user = User::new_federated(
                    AuthProvider::Google,
                    profile.subject.clone(),
                    email.clone(),
                    PersonName::new(first, "First name")
                        .unwrap_or_else(|_| PersonName::from_db(FALLBACK_FIRST_NAME)),
                    PersonName::new(last, "Last name")
                        .unwrap_or_else(|_| PersonName::from_db(FALLBACK_LAST_NAME)),
                );

                match self.user_repo.create(&user).await {
                    Ok(()) => {
                        tracing::info!(user_id = %user.user_id, "Federated account created");
                        user
                    }
                    // Lost a race with a concurrent first login
                    Err(AuthError::UserAlreadyExists) => self
                        .user_repo
                        .find_by_email(&email)
                        .await?
                        .ok_or(AuthError::UserNotFound)?,
                    Err(e) => return Err(e),
                }
            }
        };

        user.record_login();
        self.user_repo.update(&user).await?;

        let claims = self.tokens.session_claims(&user);
        let token = self.tokens.encode_session(&claims)?;

        tracing::info!(user_id = %user.user_id, provider = %user.provider, "Federated login");

        Ok(LoginOutput { token, claims })
    }
}
