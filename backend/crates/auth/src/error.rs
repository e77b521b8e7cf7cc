//! Auth Error Types
//!
//! Auth-specific variants that convert into the unified
//! `kernel::error::AppError` at the HTTP boundary.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldErrors},
    kind::ErrorKind,
};
use platform::jwt::TokenError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Request fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Username or email is already registered")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    /// Federated account without a local password
    #[error("User has no password set")]
    PasswordNotSet,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Verification token is required")]
    MissingVerificationToken,

    #[error("Invalid or already verified token")]
    InvalidVerificationToken,

    #[error("Invalid token")]
    InvalidLinkToken,

    #[error("Email not found in Google profile")]
    EmailNotInProfile,

    #[error("Registration succeeded but the verification email could not be sent")]
    EmailDelivery(String),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    // Session gates
    #[error("Unauthorized: Token not found")]
    SessionMissing,

    #[error("Invalid token")]
    SessionInvalid,

    #[error("No token provided.")]
    BearerMissing,

    #[error("Invalid token.")]
    BearerInvalid,

    #[error("Unauthorized access")]
    RoleNotAllowed,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        use AuthError::*;
        match self {
            Validation(_)
            | PasswordNotSet
            | InvalidCredentials
            | MissingVerificationToken
            | InvalidVerificationToken
            | InvalidLinkToken
            | EmailNotInProfile => ErrorKind::BadRequest,
            UserAlreadyExists => ErrorKind::Conflict,
            UserNotFound => ErrorKind::NotFound,
            SessionMissing | BearerMissing | BearerInvalid | NotAuthenticated => {
                ErrorKind::Unauthorized
            }
            SessionInvalid | RoleNotAllowed => ErrorKind::Forbidden,
            EmailDelivery(_) | IdentityProvider(_) => ErrorKind::BadGateway,
            Token(_) | Template(_) | Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(fields) => {
                AppError::new(self.kind(), self.to_string()).with_field_errors(fields.clone())
            }
            AuthError::IdentityProvider(_) => {
                AppError::new(self.kind(), "Login with Google failed")
            }
            AuthError::Token(_)
            | AuthError::Template(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::new(self.kind(), "Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Template(e) => {
                tracing::error!(error = %e, "Template rendering failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::EmailDelivery(msg) => {
                tracing::error!(message = %msg, "Verification email delivery failed");
            }
            AuthError::IdentityProvider(msg) => {
                tracing::warn!(message = %msg, "Identity provider call failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionInvalid | AuthError::BearerInvalid => {
                tracing::warn!(error = %self, "Rejected session token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(kernel::error::conversions::json_rejection_errors(&rejection))
    }
}

/// Unique violations on `users` are duplicate registrations.
pub(crate) fn map_insert_error(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UserAlreadyExists,
        _ => AuthError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_statuses() {
        assert_eq!(AuthError::SessionMissing.kind().status_code(), 401);
        assert_eq!(AuthError::SessionInvalid.kind().status_code(), 403);
        assert_eq!(AuthError::BearerMissing.kind().status_code(), 401);
        assert_eq!(AuthError::BearerInvalid.kind().status_code(), 401);
        assert_eq!(AuthError::RoleNotAllowed.kind().status_code(), 403);
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let app = AuthError::Internal("pool exhausted at 10.0.0.3".into()).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_validation_carries_fields() {
        let mut fields = FieldErrors::new();
        fields
            .entry("email".into())
            .or_default()
            .push("Invalid email format".into());

        let app = AuthError::Validation(fields).to_app_error();
        assert_eq!(app.status_code(), 400);
        assert!(app.field_errors().unwrap().contains_key("email"));
    }
}
