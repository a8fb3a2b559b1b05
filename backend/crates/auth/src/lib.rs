//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User record, email, repository and cache-store traits
//! - `application/` - Use cases, user cache, configuration
//! - `infra/` - PostgreSQL repository, Redis and in-memory cache stores
//! - `presentation/` - HTTP handlers, DTOs, bearer middleware, router
//!
//! ## Features
//! - Sign-up with email + password
//! - OAuth2 password-form login issuing short-lived signed access tokens
//! - Email-keyed user cache in front of the durable store
//! - Bearer-token guard for protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HMAC-signed tokens, verified by signature and expiry only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::user_cache::UserCache;
pub use error::{AuthError, AuthResult, CacheError, CacheResult};
pub use infra::{MemoryCacheStore, PgUserRepository, RedisCacheStore};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
