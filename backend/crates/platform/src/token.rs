//! Signed Token Service
//!
//! Mints and decodes compact JWS tokens (JWT) signed with a shared HMAC
//! secret. Tokens are stateless: nothing is persisted server-side and a
//! token is valid as long as its signature checks out and `exp` lies in
//! the future.
//!
//! ## Claims
//! ```json
//! { "user_id": "…", "username": "…", "exp": 1700000000 }
//! ```
//!
//! ## Example
//! ```rust
//! use platform::token::{TokenClaims, TokenConfig, TokenService};
//!
//! let service = TokenService::new(TokenConfig::new("change-me")).unwrap();
//! let claims = TokenClaims::new("42", "Ada");
//! let token = service.mint_access_token(&claims).unwrap();
//! assert_eq!(service.decode_token(&token).unwrap(), claims);
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access tokens live one minute unless configured otherwise.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 60;

/// Refresh tokens live five days unless a TTL is given.
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 5 * 24 * 3600;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// `exp` is in the past
    #[error("Token expired")]
    Expired,

    /// Signed with another key or tampered with
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Not a decodable token at all
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Decoded, but `user_id` or `username` is missing or empty
    #[error("Token is missing required claims")]
    MissingClaims,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

// ============================================================================
// Claims
// ============================================================================

/// The identity carried by a token (`TokenData` in API terms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
    pub username: String,
}

impl TokenClaims {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// Wire form of the payload.
#[derive(Debug, Serialize)]
struct EncodedClaims<'a> {
    user_id: &'a str,
    username: &'a str,
    exp: i64,
}

/// Payload as read back; claims are optional so that a missing claim is
/// reported as [`TokenError::MissingClaims`] rather than a parse failure.
#[derive(Debug, Deserialize)]
struct DecodedClaims {
    user_id: Option<String>,
    username: Option<String>,
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// JWT `alg` name (HS256, HS384 or HS512)
    pub algorithm: String,
    pub access_token_ttl: TimeDelta,
    pub refresh_token_ttl: TimeDelta,
}

impl TokenConfig {
    /// HS256 with the default lifetimes.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: "HS256".to_string(),
            access_token_ttl: TimeDelta::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            refresh_token_ttl: TimeDelta::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECS),
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

// ============================================================================
// Service
// ============================================================================

/// Stateless token minting/decoding, built once at startup.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: TimeDelta,
    refresh_token_ttl: TimeDelta,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        let algorithm = Algorithm::from_str(&config.algorithm)
            .map_err(|_| TokenError::UnsupportedAlgorithm(config.algorithm.clone()))?;

        // A shared secret only makes sense with the HMAC family
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::UnsupportedAlgorithm(config.algorithm));
        }

        let secret = config.secret.as_bytes();

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        })
    }

    pub fn access_token_ttl(&self) -> TimeDelta {
        self.access_token_ttl
    }

    /// Short-lived token for API access.
    pub fn mint_access_token(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        self.mint(claims, self.access_token_ttl)
    }

    /// Long-lived token; `ttl` falls back to the configured refresh TTL.
    pub fn mint_refresh_token(
        &self,
        claims: &TokenClaims,
        ttl: Option<TimeDelta>,
    ) -> Result<String, TokenError> {
        self.mint(claims, ttl.unwrap_or(self.refresh_token_ttl))
    }

    /// Verify signature and expiry, then extract the identity claims.
    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<DecodedClaims>(token, &self.decoding_key, &validation)?;

        match (data.claims.user_id, data.claims.username) {
            (Some(user_id), Some(username)) if !user_id.is_empty() && !username.is_empty() => {
                Ok(TokenClaims { user_id, username })
            }
            _ => Err(TokenError::MissingClaims),
        }
    }

    fn mint(&self, claims: &TokenClaims, ttl: TimeDelta) -> Result<String, TokenError> {
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("token expiry out of range".to_string()))?
            .timestamp();

        let payload = EncodedClaims {
            user_id: &claims.user_id,
            username: &claims.username,
            exp,
        };

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish_non_exhaustive()
    }
}
