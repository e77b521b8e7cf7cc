//! User Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, person_name::PersonName,
    phone_number::PhoneNumber, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};

/// A registered account, local or federated.
///
/// Local accounts always carry a username and a password hash. Federated
/// accounts have neither and are identified by `provider_subject`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub user_name: Option<UserName>,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone_number: Option<PhoneNumber>,
    pub password: Option<UserPassword>,
    pub role: UserRole,
    pub provider: AuthProvider,
    /// Provider's stable id for federated accounts
    pub provider_subject: Option<String>,
    pub is_verified: bool,
    /// Outstanding email verification token, cleared once used
    pub verification_token: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated registration data.
pub struct NewLocalUser {
    pub email: Email,
    pub user_name: UserName,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone_number: Option<PhoneNumber>,
    pub password: UserPassword,
}

impl User {
    pub fn new_local(input: NewLocalUser) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email: input.email,
            user_name: Some(input.user_name),
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
            password: Some(input.password),
            role: UserRole::User,
            provider: AuthProvider::Local,
            provider_subject: None,
            is_verified: false,
            verification_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Unverified `USER` account created on first federated login.
    pub fn new_federated(
        provider: AuthProvider,
        subject: String,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            user_name: None,
            first_name,
            last_name,
            phone_number: None,
            password: None,
            role: UserRole::User,
            provider,
            provider_subject: Some(subject),
            is_verified: false,
            verification_token: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn set_verification_token(&mut self, token: String) {
        self.verification_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Flip the verified flag and consume the outstanding token.
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_token = None;
        self.updated_at = Utc::now();
    }
}
