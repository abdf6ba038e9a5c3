//! Response cache.
//!
//! Keeps the last payload of selected calls in client storage so it can be
//! shown without a round trip. Entries share the storage namespace with the
//! credentials and disappear with them on logout.

use std::sync::Arc;

use lor_session::ClientStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Prefix of every cache key.
pub const CACHE_PREFIX: &str = "cache:";

/// Cached API payloads.
#[derive(Clone)]
pub struct ResponseCache {
    storage: Arc<dyn ClientStorage>,
}

impl ResponseCache {
    /// Creates a cache over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    fn key(name: &str) -> String {
        format!("{CACHE_PREFIX}{name}")
    }

    /// Stores a payload. Failures are logged and otherwise ignored.
    pub fn put<T: Serialize>(&self, name: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(name, "Failed to encode cached response: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&Self::key(name), &json) {
            tracing::warn!(name, "Failed to cache response: {}", e);
        }
    }

    /// Reads a payload. Entries that no longer decode are dropped.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let key = Self::key(name);
        let json = self.storage.get(&key)?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(name, "Dropping stale cache entry: {}", e);
                let _ = self.storage.remove_many(&[key.as_str()]);
                None
            }
        }
    }
}
