//! Auth Middleware
//!
//! Bearer-token guard for protected routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use platform::token::TokenService;
use std::sync::Arc;

use crate::error::AuthError;

/// Middleware that requires a valid bearer token.
///
/// On success the decoded `TokenClaims` are placed in request extensions.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let claims = tokens.decode_token(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
