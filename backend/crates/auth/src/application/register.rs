//! Register Use Case
//!
//! Creates a local account and emails a verification link.

use std::sync::Arc;

use kernel::error::app_error::{AppResult, FieldErrors};

use crate::application::config::AuthConfig;
use crate::application::email::verification_email;
use crate::application::token::TokenService;
use crate::domain::entity::user::{NewLocalUser, User};
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    phone_number::PhoneNumber,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password: String,
    pub phone_number: Option<String>,
}

pub struct RegisterOutput {
    pub user_id: UserId,
}

pub struct RegisterUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

/// Record a failed field check and keep going.
pub(crate) fn collect<T>(errors: &mut FieldErrors, field: &str, result: AppResult<T>) -> Option<T> {
    result
        .map_err(|e| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(e.message().to_string())
        })
        .ok()
}

impl<U, M> RegisterUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        mailer: Arc<M>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            mailer,
            tokens,
            config,
        }
    }

    fn validate(input: RegisterInput) -> AuthResult<(NewLocalUserDraft, RawPassword)> {
        let mut errors = FieldErrors::new();

        let email = collect(&mut errors, "email", Email::new(input.email));
        let first_name = collect(
            &mut errors,
            "firstName",
            PersonName::new(input.first_name, "First name"),
        );
        let last_name = collect(
            &mut errors,
            "lastName",
            PersonName::new(input.last_name, "Last name"),
        );
        let user_name = collect(&mut errors, "username", UserName::new(input.user_name));
        let password = collect(&mut errors, "password", RawPassword::new(input.password));
        let phone_number = match input.phone_number.filter(|p| !p.trim().is_empty()) {
            Some(raw) => collect(&mut errors, "phoneNumber", PhoneNumber::new(raw)).map(Some),
            None => Some(None),
        };

        match (email, first_name, last_name, user_name, password, phone_number) {
            (
                Some(email),
                Some(first_name),
                Some(last_name),
                Some(user_name),
                Some(password),
                Some(phone_number),
            ) if errors.is_empty() => Ok((
                NewLocalUserDraft {
                    email,
                    user_name,
                    first_name,
                    last_name,
                    phone_number,
                },
                password,
            )),
            _ => Err(AuthError::Validation(errors)),
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (draft, raw_password) = Self::validate(input)?;

        if self
            .user_repo
            .exists_by_user_name_or_email(&draft.user_name, &draft.email)
            .await?
        {
            return Err(AuthError::UserAlreadyExists);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let mut user = User::new_local(NewLocalUser {
            email: draft.email,
            user_name: draft.user_name,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone_number: draft.phone_number,
            password,
        });

        let token = self.tokens.issue_verification(&user.email)?;
        user.set_verification_token(token.clone());

        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email_domain = %user.email.domain(),
            "User registered"
        );

        let email = verification_email(
            &user.email,
            user.first_name.as_str(),
            &self.config.verification_link(&token),
        )?;
        self.mailer.send(email).await?;

        Ok(RegisterOutput {
            user_id: user.user_id,
        })
    }
}

struct NewLocalUserDraft {
    email: Email,
    user_name: UserName,
    first_name: PersonName,
    last_name: PersonName,
    phone_number: Option<PhoneNumber>,
}
