//! Repository Traits
//!
//! Interfaces for the durable user store and the key-value cache backend.
//! Implementations live in the infrastructure layer.

use crate::domain::entity::user::UserRecord;
use crate::domain::value_object::email::Email;
use crate::error::{AuthResult, CacheResult};

/// Durable user store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user
    async fn create(&self, user: &UserRecord) -> AuthResult<()>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<UserRecord>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Raw cache backend: string values plus one hash per key.
///
/// Validation and key layout belong to `UserCache`; stores only move bytes.
#[trait_variant::make(CacheStore: Send)]
pub trait LocalCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Overwrite the value at `key`
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Set one field of the hash at `key`, creating the hash if absent
    async fn hset(&self, key: &str, field: &str, value: &str) -> CacheResult<()>;

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>>;
}
