//! Infrastructure Layer
//!
//! Database implementations and cache backends.

pub mod memory;
pub mod postgres;
pub mod redis;

pub use self::memory::MemoryCacheStore;
pub use self::postgres::PgUserRepository;
pub use self::redis::RedisCacheStore;
