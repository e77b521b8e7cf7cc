//! Login Use Case
//!
//! Username-or-email plus password. Issues a session token on success.

use std::sync::Arc;

use kernel::error::app_error::FieldErrors;

use crate::application::config::AuthConfig;
use crate::application::register::collect;
use crate::application::token::{SessionClaims, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

/// Signed token plus the claims it carries.
pub struct LoginOutput {
    pub token: String,
    pub claims: SessionClaims,
}

pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let mut errors = FieldErrors::new();

        // Stored usernames already passed validation; match them verbatim.
        let user_name = non_blank(input.user_name).map(UserName::from_db);
        let email = non_blank(input.email)
            .and_then(|raw| collect(&mut errors, "email", Email::new(raw)));

        if user_name.is_none() && email.is_none() && errors.is_empty() {
            errors
                .entry("username".to_string())
                .or_default()
                .push("Username or email is required".to_string());
        }
        if input.password.is_empty() {
            errors
                .entry("password".to_string())
                .or_default()
                .push("Password is required".to_string());
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let mut user = self
            .user_repo
            .find_by_login(user_name.as_ref(), email.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let stored = user.password.as_ref().ok_or(AuthError::PasswordNotSet)?;
        let attempt = RawPassword::attempt(input.password);
        if !stored.verify(&attempt, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        user.record_login();
        self.user_repo.update(&user).await?;

        let claims = self.tokens.session_claims(&user);
        let token = self.tokens.encode_session(&claims)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User logged in");

        Ok(LoginOutput { token, claims })
    }
}
