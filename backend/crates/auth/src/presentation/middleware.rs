//! Auth Middleware
//!
//! Session gates (cookie or bearer), the role gate, and the [`CurrentUser`]
//! extractor for handlers behind them.
//!
//! ```ignore
//! let gate = AuthGate::new(&auth_config);
//! let create = post(handler)
//!     .layer(from_fn_with_state(RoleGuard::super_admin(), require_role))
//!     .layer(from_fn_with_state(gate, require_session));
//! ```
//!
//! Layers run outermost first, so the session gate goes last.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{HeaderMap, Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::application::config::AuthConfig;
use crate::application::token::{SessionClaims, TokenService};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Decodes session tokens for the gate middlewares.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
    cookie_name: Arc<str>,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_parts(Arc::new(TokenService::new(config)), &config.session_cookie_name)
    }

    pub fn from_parts(tokens: Arc<TokenService>, cookie_name: &str) -> Self {
        Self {
            tokens,
            cookie_name: Arc::from(cookie_name),
        }
    }

    /// Cookie semantics: absent is 401, undecodable or expired is 403.
    pub fn session_from_cookie(&self, headers: &HeaderMap) -> AuthResult<SessionClaims> {
        let token = platform::cookie::extract_cookie(headers, &self.cookie_name)
            .ok_or(AuthError::SessionMissing)?;

        self.tokens.decode_session(&token).map_err(|e| {
            tracing::debug!(error = %e, "Session cookie rejected");
            AuthError::SessionInvalid
        })
    }

    /// Bearer semantics: absent is 401, anything unusable is also 401.
    pub fn session_from_bearer(&self, headers: &HeaderMap) -> AuthResult<SessionClaims> {
        if !headers.contains_key(header::AUTHORIZATION) {
            return Err(AuthError::BearerMissing);
        }
        let Authorization(bearer) = headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(AuthError::BearerInvalid)?;

        self.tokens.decode_session(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::BearerInvalid
        })
    }
}

/// Requires a valid `accessToken` cookie.
pub async fn require_session(
    State(gate): State<AuthGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let claims = gate
        .session_from_cookie(req.headers())
        .map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(req).await)
}

/// Requires `Authorization: Bearer <token>`.
pub async fn require_bearer(
    State(gate): State<AuthGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let claims = gate
        .session_from_bearer(req.headers())
        .map_err(IntoResponse::into_response)?;

    req.extensions_mut().insert(CurrentUser(claims));
    Ok(next.run(req).await)
}

/// Set of roles allowed through [`require_role`].
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: Arc<[UserRole]>,
}

impl RoleGuard {
    pub fn new(allowed: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn super_admin() -> Self {
        Self::new([UserRole::SuperAdmin])
    }

    pub fn permits(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }
}

/// Must sit inside a session gate.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(CurrentUser(claims)) = req.extensions().get::<CurrentUser>() else {
        return Err(AuthError::NotAuthenticated.into_response());
    };

    if !guard.permits(claims.role) {
        tracing::warn!(user_id = %claims.sub, role = %claims.role, "Role not allowed");
        return Err(AuthError::RoleNotAllowed.into_response());
    }

    Ok(next.run(req).await)
}

/// Claims attached by a session gate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }
}
