//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::crypto::random_secret;
use platform::token::{TokenConfig, TokenService};

use crate::error::AuthResult;

/// Cache field that receives the most recently issued access token
pub const DEFAULT_ACCESS_TOKEN_FIELD: &str = "access_token";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing secret, algorithm and token lifetimes
    pub token: TokenConfig,
    /// Auxiliary cache field written after a successful login
    pub access_token_field: String,
}

impl AuthConfig {
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            access_token_field: DEFAULT_ACCESS_TOKEN_FIELD.to_string(),
        }
    }

    /// Create config with a random signing secret (for development).
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self::new(TokenConfig::new(random_secret()))
    }

    /// Build the token service; fails on a non-HMAC algorithm
    pub fn token_service(&self) -> AuthResult<TokenService> {
        Ok(TokenService::new(self.token.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();

        assert_ne!(a.token.secret, b.token.secret);
        assert_eq!(a.token.algorithm, "HS256");
        assert_eq!(a.access_token_field, "access_token");
        assert!(a.token_service().is_ok());
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let mut config = AuthConfig::development();
        config.token.algorithm = "RS256".to_string();
        assert!(config.token_service().is_err());
    }
}
