//! In-memory [`KeyValueStore`] for unit tests.
//!
//! TTLs are bookkept but do not decay on their own; tests that need to
//! exercise expiry either delete the key or rewrite its TTL with
//! [`MemoryStore::set_ttl`]. This keeps every test deterministic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{KeyValueStore, StoreError, Ttl};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl_secs: Option<u64>,
}

/// Deterministic in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the remaining TTL of an existing key, simulating the
    /// passage of time.
    pub fn set_ttl(&self, key: &str, secs: u64) {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        if let Some(entry) = entries.get_mut(key) {
            entry.ttl_secs = Some(secs);
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                ttl_secs: ttl.map(|t| t.as_secs()),
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.remove(key);
        Ok(())
    }

    async fn ttl(&self, key: &str) -> Result<Ttl, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(match entries.get(key) {
            None => Ttl::Missing,
            Some(Entry {
                ttl_secs: None, ..
            }) => Ttl::Persistent,
            Some(Entry {
                ttl_secs: Some(secs),
                ..
            }) => Ttl::Remaining(*secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_del_round_trip() {
        let store = MemoryStore::new();
        store
            .set("k", "v", Some(Duration::from_secs(10)))
            .await
            .expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
        assert_eq!(store.ttl("k").await.expect("ttl"), Ttl::Remaining(10));

        store.del("k").await.expect("del");
        assert_eq!(store.get("k").await.expect("get"), None);
        assert_eq!(store.ttl("k").await.expect("ttl"), Ttl::Missing);
    }

    #[tokio::test]
    async fn set_without_ttl_is_persistent() {
        let store = MemoryStore::new();
        store.set("k", "v", None).await.expect("set");
        assert_eq!(store.ttl("k").await.expect("ttl"), Ttl::Persistent);
    }

    #[tokio::test]
    async fn set_ttl_simulates_decay() {
        let store = MemoryStore::new();
        store
            .set("k", "v", Some(Duration::from_secs(600)))
            .await
            .expect("set");
        store.set_ttl("k", 10);
        assert_eq!(store.ttl("k").await.expect("ttl"), Ttl::Remaining(10));
    }
}
