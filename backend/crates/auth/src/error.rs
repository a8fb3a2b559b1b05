//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Cache result type alias
pub type CacheResult<T> = Result<T, CacheError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Absent from both the cache and the durable store
    #[error("User not found!")]
    UserNotFound,

    /// Password did not match the stored hash
    #[error("Incorrect password, please try again")]
    IncorrectPassword,

    #[error("Email already registered")]
    EmailTaken,

    /// No bearer token on a protected route
    #[error("Not authenticated")]
    MissingToken,

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Rejected input (sign-up fields, empty password, ...)
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound | AuthError::IncorrectPassword => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::MissingToken => ErrorKind::Unauthorized,
            AuthError::Token(TokenError::UnsupportedAlgorithm(_) | TokenError::Encoding(_)) => {
                ErrorKind::InternalServerError
            }
            AuthError::Token(_) => ErrorKind::Unauthorized,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the client should be asked for bearer credentials
    fn wants_bearer_challenge(&self) -> bool {
        match self {
            AuthError::UserNotFound | AuthError::IncorrectPassword | AuthError::MissingToken => {
                true
            }
            AuthError::Token(_) => self.kind() == ErrorKind::Unauthorized,
            _ => false,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());

        let err = match self {
            AuthError::Token(TokenError::Expired) => {
                err.with_action("Sign in again to obtain a new access token")
            }
            _ => err,
        };

        if self.wants_bearer_challenge() {
            err.with_bearer_challenge()
        } else {
            err
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::IncorrectPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Token(e) => {
                tracing::info!(error = %e, "Rejected bearer token");
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
        match self {
            // Let the kernel classify driver errors (pool exhaustion, unique violations, ...)
            AuthError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::EmptyPassword => AuthError::Validation(err.to_string()),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

// ============================================================================
// Cache errors
// ============================================================================

/// Errors raised by the user cache and its backing stores.
///
/// Never reaches an HTTP response: the use cases log them and carry on.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache key email cannot be empty")]
    EmptyEmail,

    #[error("Cache field key cannot be empty")]
    EmptyField,

    /// Only non-empty JSON objects are cached
    #[error("Cached record must be a non-empty JSON object")]
    InvalidRecord,

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis pool error: {0}")]
    Pool(String),
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        CacheError::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_are_bad_request_with_challenge() {
        for err in [AuthError::UserNotFound, AuthError::IncorrectPassword] {
            let app = err.to_app_error();
            assert_eq!(app.status_code(), 400);
            assert_eq!(app.challenge(), Some("Bearer"));
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(AuthError::UserNotFound.to_string(), "User not found!");
        assert_eq!(
            AuthError::IncorrectPassword.to_string(),
            "Incorrect password, please try again"
        );
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        let app = AuthError::from(TokenError::Expired).to_app_error();
        assert_eq!(app.status_code(), 401);
        assert_eq!(app.challenge(), Some("Bearer"));
        assert!(app.action().is_some());

        let app = AuthError::from(TokenError::Encoding("boom".into())).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(app.challenge().is_none());
    }

    #[test]
    fn test_from_password_error() {
        let err: AuthError = PasswordHashError::EmptyPassword.into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let err: AuthError = PasswordHashError::HashingFailed("oom".into()).into();
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));
    }
}
