//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod credentials;
pub mod sign_up;
pub mod user_cache;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::AuthConfig;
pub use credentials::authenticate;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use user_cache::UserCache;
