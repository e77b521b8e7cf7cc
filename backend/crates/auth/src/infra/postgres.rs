//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    auth_provider::AuthProvider, email::Email, person_name::PersonName,
    phone_number::PhoneNumber, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, map_insert_error};

const USER_COLUMNS: &str = r#"
    id,
    email,
    username,
    first_name,
    last_name,
    phone_number,
    password_hash,
    role,
    provider,
    provider_subject,
    is_verified,
    verification_token,
    last_login_at,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        binds: &[Option<&str>],
    ) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate} LIMIT 1");
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        let row = query.fetch_optional(&self.pool).await?;

        row.map(UserRow::into_user).transpose()
    }
}

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                username,
                first_name,
                last_name,
                phone_number,
                password_hash,
                role,
                provider,
                provider_subject,
                is_verified,
                verification_token,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.user_name.as_ref().map(UserName::as_str))
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.phone_number.as_ref().map(PhoneNumber::as_str))
        .bind(user.password.as_ref().map(UserPassword::as_phc_string))
        .bind(user.role.code())
        .bind(user.provider.code())
        .bind(user.provider_subject.as_deref())
        .bind(user.is_verified)
        .bind(user.verification_token.as_deref())
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_where("email = $1", &[Some(email.as_str())])
            .await
    }

    async fn find_by_login(
        &self,
        user_name: Option<&UserName>,
        email: Option<&Email>,
    ) -> AuthResult<Option<User>> {
        // NULL never matches, so an absent half drops out of the OR.
        self.fetch_one_where(
            "username = $1 OR email = $2",
            &[user_name.map(UserName::as_str), email.map(Email::as_str)],
        )
        .await
    }

    async fn exists_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(user_name.as_str())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                is_verified = $2,
                verification_token = $3,
                last_login_at = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.is_verified)
        .bind(user.verification_token.as_deref())
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: Option<String>,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    password_hash: Option<String>,
    role: String,
    provider: String,
    provider_subject: Option<String>,
    is_verified: bool,
    verification_token: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("unknown role code: {}", self.role)))?;
        let provider = AuthProvider::from_code(&self.provider).ok_or_else(|| {
            AuthError::Internal(format!("unknown provider code: {}", self.provider))
        })?;
        let password = self
            .password_hash
            .map(UserPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            user_name: self.username.map(UserName::from_db),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            phone_number: self.phone_number.map(PhoneNumber::from_db),
            password,
            role,
            provider,
            provider_subject: self.provider_subject,
            is_verified: self.is_verified,
            verification_token: self.verification_token,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
