//! In-Memory Cache Store
//!
//! Process-local cache for single-instance mode and tests.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::repository::CacheStore;
use crate::error::CacheResult;

#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    values: Arc<DashMap<String, String>>,
    hashes: Arc<DashMap<String, HashMap<String, String>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys, counting hashes
    pub fn len(&self) -> usize {
        self.values.len() + self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn hset(&self, key: &str, field: &str, value: &str) -> CacheResult<()> {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<String>> {
        Ok(self
            .hashes
            .get(key)
            .and_then(|fields| fields.get(field).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_and_hashes_are_separate() {
        let store = MemoryCacheStore::new();
        store.set("k", "v").await.unwrap();
        store.hset("k", "f", "x").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.hget("k", "f").await.unwrap().as_deref(), Some("x"));
        assert_eq!(store.hget("k", "g").await.unwrap(), None);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryCacheStore::new();
        let other = store.clone();
        other.set("k", "v").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
