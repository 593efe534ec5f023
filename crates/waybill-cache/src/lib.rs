//! In-process caching layer for the Waybill rating engine
//!
//! Provides a key-value cache with TTL and advisory build locks, backing
//! the per-customer rate sheet cache. Values are stored as JSON strings so
//! the same `CacheService` trait can be backed by an external store without
//! changing callers.
//!
//! # Example
//!
//! ```
//! use waybill_cache::MemoryCache;
//! use waybill_core::traits::CacheService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), waybill_core::EngineError> {
//!     let cache = MemoryCache::new();
//!
//!     cache.set("my_key", &"my_value", 60).await?;
//!     let value: Option<String> = cache.get("my_key").await?;
//!     assert_eq!(value, Some("my_value".to_string()));
//!
//!     Ok(())
//! }
//! ```

pub mod keys;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};
use waybill_core::error::EngineError;
use waybill_core::traits::CacheService;

/// Upper bound on how long an acquired lock may be held before other
/// waiters treat it as abandoned
const LOCK_HOLD_SECS: u64 = 60;

/// Poll interval while waiting on a held lock
const LOCK_POLL_MS: u64 = 50;

struct StoredEntry {
    json: String,
    expires_at: Instant,
}

/// In-memory cache with TTL and named advisory locks
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, StoredEntry>>,
    locks: Mutex<HashMap<String, Instant>>,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the named lock once; returns whether it was taken
    fn try_take_lock(&self, key: &str) -> bool {
        let mut locks = self.locks.lock();
        let now = Instant::now();
        match locks.get(key) {
            Some(expiry) if *expiry > now => false,
            _ => {
                locks.insert(key.to_string(), now + Duration::from_secs(LOCK_HOLD_SECS));
                true
            }
        }
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let entries = self.entries.lock();
        let now = Instant::now();
        entries.values().filter(|e| e.expires_at > now).count()
    }

    /// Whether the cache holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, EngineError> {
        let json = {
            let mut entries = self.entries.lock();
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => Some(entry.json.clone()),
                Some(_) => {
                    entries.remove(key);
                    None
                }
                None => None,
            }
        };

        match json {
            Some(json) => {
                let value = serde_json::from_str::<T>(&json).map_err(|e| {
                    error!("Failed to deserialize value for key {}: {}", key, e);
                    EngineError::Serialization(format!("Deserialization failed: {}", e))
                })?;
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), EngineError> {
        debug!("SET {} (TTL: {}s)", key, ttl_secs);

        let json = serde_json::to_string(value).map_err(|e| {
            error!("Failed to serialize value for key {}: {}", key, e);
            EngineError::Serialization(format!("Serialization failed: {}", e))
        })?;

        let mut entries = self.entries.lock();
        entries.insert(
            key.to_string(),
            StoredEntry {
                json,
                expires_at: Instant::now() + Duration::from_secs(ttl_secs),
            },
        );
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<bool, EngineError> {
        debug!("FORGET {}", key);
        let mut entries = self.entries.lock();
        Ok(entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, EngineError> {
        let entries = self.entries.lock();
        Ok(entries
            .get(key)
            .map(|e| e.expires_at > Instant::now())
            .unwrap_or(false))
    }

    async fn lock(&self, key: &str, wait_secs: u64) -> Result<bool, EngineError> {
        let deadline = Instant::now() + Duration::from_secs(wait_secs);

        loop {
            if self.try_take_lock(key) {
                debug!("Lock acquired: {}", key);
                return Ok(true);
            }
            if Instant::now() >= deadline {
                warn!("Lock wait elapsed for {}, proceeding without it", key);
                return Ok(false);
            }
            tokio::time::sleep(Duration::from_millis(LOCK_POLL_MS)).await;
        }
    }

    async fn unlock(&self, key: &str) -> Result<(), EngineError> {
        debug!("Lock released: {}", key);
        let mut locks = self.locks.lock();
        locks.remove(key);
        Ok(())
    }
}
