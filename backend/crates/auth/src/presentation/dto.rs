//! API DTOs (Data Transfer Objects)

use chrono::NaiveDate;
use platform::token::TokenClaims;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::UserRecord;

/// Token type label returned with every access token
pub const ACCESS_TYPE_BEARER: &str = "bearer";

// ============================================================================
// Authenticate
// ============================================================================

/// OAuth2 password-grant form (`application/x-www-form-urlencoded`)
///
/// `username` carries the email. The remaining OAuth2 fields are accepted
/// and ignored.
#[derive(Clone, Deserialize)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
    pub grant_type: Option<String>,
    pub scope: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub access_type: String,
}

impl AccessTokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            access_type: ACCESS_TYPE_BEARER.to_string(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub b_day: NaiveDate,
}

/// Public view of a user (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub age: i32,
    pub b_day: NaiveDate,
    pub is_active: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.into_db(),
            name: user.name,
            age: user.age,
            b_day: user.birth_date,
            is_active: user.is_active,
        }
    }
}

// ============================================================================
// Current User
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDataResponse {
    pub user_id: String,
    pub username: String,
}

impl From<TokenClaims> for TokenDataResponse {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}
