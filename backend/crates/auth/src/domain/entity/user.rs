//! User Entity
//!
//! The user record as stored in PostgreSQL and mirrored, as JSON, in the
//! user cache.

use chrono::NaiveDate;
use kernel::id::UserId;
use platform::token::TokenClaims;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::email::Email;

/// User record
///
/// Serialized field names are the cache wire format:
/// `{id, email, name, hashed_password, age, birth_date, is_active}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Unique login identity
    pub email: Email,
    pub name: String,
    /// Argon2id PHC string
    pub hashed_password: String,
    pub age: i32,
    pub birth_date: NaiveDate,
    pub is_active: bool,
}

impl UserRecord {
    /// Create a new, active user with a fresh id
    pub fn new(
        email: Email,
        name: impl Into<String>,
        hashed_password: impl Into<String>,
        age: i32,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            id: UserId::new(),
            email,
            name: name.into(),
            hashed_password: hashed_password.into(),
            age,
            birth_date,
            is_active: true,
        }
    }

    /// Identity embedded in issued tokens
    pub fn token_claims(&self) -> TokenClaims {
        TokenClaims::new(self.id.to_string(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord::new(
            Email::new("a@x.com").unwrap(),
            "Ada",
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
            36,
            NaiveDate::from_ymd_opt(1989, 12, 10).unwrap(),
        )
    }

    #[test]
    fn test_new_user_is_active() {
        assert!(record().is_active);
    }

    #[test]
    fn test_new_user_gets_fresh_v4_id() {
        let a = record();
        let b = record();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.as_uuid().get_version_num(), 4);
        assert_eq!(a.id.to_string().len(), 36);
    }

    #[test]
    fn test_token_claims() {
        let user = record();
        let claims = user.token_claims();
        assert_eq!(claims.user_id, user.id.to_string());
        assert_eq!(claims.username, "Ada");
    }

    #[test]
    fn test_json_shape() {
        let user = record();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["id"], user.id.to_string());
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(value["birth_date"], "1989-12-10");
        assert_eq!(value["is_active"], true);

        let back: UserRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, user);
    }
}
