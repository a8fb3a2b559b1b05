//! User Cache
//!
//! Email-keyed cache of user records in front of the durable store.
//!
//! ## Key layout
//! - `user:<email>`: the record, serialized as a JSON object
//! - `user:<email>:fields`: hash of auxiliary per-user fields (`access_token`, ...)
//!
//! Entries never expire and are not invalidated when the durable record
//! changes; an entry is replaced only by the next `set` for the same email.

use serde_json::Value;

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::CacheStore;
use crate::domain::value_object::email::Email;
use crate::error::{CacheError, CacheResult};

const KEY_PREFIX: &str = "user";

/// Key of the serialized record
pub fn record_key(email: &str) -> String {
    format!("{KEY_PREFIX}:{email}")
}

/// Key of the auxiliary field hash
pub fn fields_key(email: &str) -> String {
    format!("{KEY_PREFIX}:{email}:fields")
}

pub struct UserCache<S> {
    store: S,
}

impl<S> UserCache<S>
where
    S: CacheStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `record` under the email's key, replacing any previous entry.
    ///
    /// Rejected input performs no write.
    pub async fn set(&self, email: &str, record: &Value) -> CacheResult<()> {
        if email.is_empty() {
            return Err(CacheError::EmptyEmail);
        }
        match record {
            Value::Object(map) if !map.is_empty() => {}
            _ => return Err(CacheError::InvalidRecord),
        }

        let payload = serde_json::to_string(record)?;
        self.store.set(&record_key(email), &payload).await
    }

    /// Set one auxiliary field for the email
    pub async fn update_field(&self, email: &str, field: &str, value: &str) -> CacheResult<()> {
        if email.is_empty() {
            return Err(CacheError::EmptyEmail);
        }
        if field.is_empty() {
            return Err(CacheError::EmptyField);
        }

        self.store.hset(&fields_key(email), field, value).await
    }

    /// An empty email is a miss, never an error
    pub async fn get(&self, email: &str) -> CacheResult<Option<Value>> {
        if email.is_empty() {
            return Ok(None);
        }

        match self.store.get(&record_key(email)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn get_field(&self, email: &str, field: &str) -> CacheResult<Option<String>> {
        if email.is_empty() || field.is_empty() {
            return Ok(None);
        }

        self.store.hget(&fields_key(email), field).await
    }

    pub async fn set_user(&self, user: &UserRecord) -> CacheResult<()> {
        let value = serde_json::to_value(user)?;
        self.set(user.email.as_str(), &value).await
    }

    /// Typed read; an entry that no longer matches the record shape is an error
    pub async fn get_user(&self, email: &Email) -> CacheResult<Option<UserRecord>> {
        match self.get(email.as_str()).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}
