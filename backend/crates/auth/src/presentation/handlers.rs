//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use platform::token::{TokenClaims, TokenService};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::user_cache::UserCache;
use crate::application::{AuthenticateInput, AuthenticateUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::{CacheStore, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AccessTokenResponse, AuthForm, SignUpRequest, TokenDataResponse, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, S>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: CacheStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cache: Arc<UserCache<S>>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Authenticate
// ============================================================================

/// POST /auth
pub async fn authenticate<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Form(form): Form<AuthForm>,
) -> AuthResult<Json<AccessTokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: CacheStore + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.cache.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = AuthenticateInput {
        username: form.username,
        password: form.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AccessTokenResponse::bearer(output.access_token)))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R, S>(
    State(state): State<AuthAppState<R, S>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    S: CacheStore + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.cache.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        name: req.name,
        age: req.age,
        birth_date: req.b_day,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /auth/me (behind `require_bearer`)
pub async fn current_user(Extension(claims): Extension<TokenClaims>) -> Json<TokenDataResponse> {
    Json(TokenDataResponse::from(claims))
}
