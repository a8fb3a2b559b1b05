//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Signed access/refresh tokens (JWT, HMAC)
//! - Random secret generation

pub mod crypto;
pub mod password;
pub mod token;
