//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum_extra::extract::WithRejection;
use kernel::response::ApiResponse;
use platform::cookie::extract_cookie;
use platform::crypto::{constant_time_eq, random_token};

use crate::application::config::AuthConfig;
use crate::application::token::{SessionClaims, TokenService};
use crate::application::{
    FederatedLoginUseCase, LoginUseCase, RegisterUseCase, VerifyEmailUseCase,
};
use crate::domain::identity::IdentityProvider;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, OAuthCallbackQuery, RegisterRequest, TokenQuery};
use crate::presentation::pages;

/// Shared state for auth handlers
pub struct AuthAppState<R, M, P> {
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub identity: Arc<P>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: the derive would require R, M, P: Clone.
impl<R, M, P> Clone for AuthAppState<R, M, P> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            identity: self.identity.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

fn cookie_header(value: Option<HeaderValue>) -> AuthResult<HeaderValue> {
    value.ok_or_else(|| AuthError::Internal("cookie value is not a valid header".to_string()))
}

// ============================================================================
// Registration
// ============================================================================

/// POST /auth/register
pub async fn register<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AuthError>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    use_case.execute(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message(
            "Registration success, please check your email to verify your account",
        )),
    ))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /auth/login
pub async fn login<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.into()).await?;
    let cookie = cookie_header(state.config.session_cookie().set_header(&output.token))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::message("Login success")),
    ))
}

/// POST /auth/logout
///
/// Always succeeds; the token itself stays valid until it expires.
pub async fn logout<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let cookie = cookie_header(state.config.session_cookie().delete_header())?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::message("Logout success")),
    ))
}

// ============================================================================
// Email Verification
// ============================================================================

/// GET /auth/verify-email?token=
pub async fn verify_email<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    Query(query): Query<TokenQuery>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.tokens.clone());
    let user = use_case.execute(query.token.as_deref()).await?;

    pages::verification_completed(user.first_name.as_str(), &state.config.frontend_url)
}

/// GET /auth/verify-success?token=
///
/// Only checks the signature; the account is not touched.
pub async fn verify_success<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    Query(query): Query<TokenQuery>,
) -> AuthResult<Redirect>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let token = query
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or(AuthError::MissingVerificationToken)?;

    state
        .tokens
        .decode_verification(&token)
        .map_err(|_| AuthError::InvalidLinkToken)?;

    Ok(Redirect::to(&state.config.frontend_url))
}

// ============================================================================
// Google OAuth
// ============================================================================

/// GET /auth/google
pub async fn google_login<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let csrf_state = random_token(32);
    let url = state.identity.authorization_url(&csrf_state)?;
    let cookie = cookie_header(state.config.oauth_state_cookie().set_header(&csrf_state))?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&url)))
}

/// GET /auth/google/callback
///
/// Provider and state failures end at the login-failed page; a profile
/// without an email is reported directly.
pub async fn google_callback<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    headers: HeaderMap,
    Query(query): Query<OAuthCallbackQuery>,
) -> Response
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let config = &state.config;
    let clear_state = config.oauth_state_cookie().delete_header();
    let failed = |reason: &str| {
        tracing::warn!(reason, "Google login failed");
        let headers = clear_state.clone().map(|v| [(header::SET_COOKIE, v)]);
        (AppendHeaders(headers.into_iter().flatten()), Redirect::to(&config.login_failed_url()))
            .into_response()
    };

    if let Some(error) = query.error.as_deref() {
        return failed(error);
    }
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return failed("missing authorization code");
    };

    let expected = extract_cookie(&headers, &config.oauth_state_cookie_name);
    let state_matches = match (query.state.as_deref(), expected.as_deref()) {
        (Some(got), Some(want)) => constant_time_eq(got.as_bytes(), want.as_bytes()),
        _ => false,
    };
    if !state_matches {
        return failed("state mismatch");
    }

    let use_case = FederatedLoginUseCase::new(
        state.repo.clone(),
        state.identity.clone(),
        state.tokens.clone(),
    );

    match use_case.execute(&code).await {
        Ok(output) => {
            let session = config.session_cookie().set_header(&output.token);
            let (Some(session), Some(clear_state)) = (session, clear_state.clone()) else {
                return AuthError::Internal("cookie value is not a valid header".to_string())
                    .into_response();
            };
            (
                AppendHeaders([
                    (header::SET_COOKIE, clear_state),
                    (header::SET_COOKIE, session),
                ]),
                Redirect::to(&config.frontend_url),
            )
                .into_response()
        }
        Err(AuthError::IdentityProvider(msg)) => failed(&msg),
        Err(e) => e.into_response(),
    }
}

/// GET /auth/login/success
pub async fn login_success<R, M, P>(
    State(state): State<AuthAppState<R, M, P>>,
    headers: HeaderMap,
) -> AuthResult<Json<ApiResponse<SessionClaims>>>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
    P: IdentityProvider + Send + Sync + 'static,
{
    let claims = extract_cookie(&headers, &state.config.session_cookie_name)
        .and_then(|token| state.tokens.decode_session(&token).ok())
        .ok_or(AuthError::NotAuthenticated)?;

    Ok(Json(ApiResponse::with_data(
        "Login with Google successful",
        claims,
    )))
}

/// GET /auth/login/failed
pub async fn login_failed() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::message("Login with Google failed")),
    )
}
