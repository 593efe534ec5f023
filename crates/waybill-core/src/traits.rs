//! Collaborator traits
//!
//! Abstractions over the external systems the engine consumes: the cache
//! store, rate sheet persistence, and the address book. The engine itself
//! carries no persistence; everything arrives through these seams.

use crate::error::EngineError;
use crate::models::RateSheetEntry;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Key-value cache store with TTL and per-key build locks
///
/// Mirrors the `get`/`remember`/`forget`/`lock` surface the engine needs.
/// Lock acquisition is advisory: a `false` return from `lock` means the
/// bounded wait elapsed and the caller proceeds without mutual exclusion.
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Get a value from cache, deserialized from JSON
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, EngineError>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), EngineError>;

    /// Delete a key; returns whether it existed
    async fn forget(&self, key: &str) -> Result<bool, EngineError>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool, EngineError>;

    /// Acquire a named lock, waiting at most `wait_secs`
    ///
    /// Returns `true` when acquired; `false` when the wait elapsed.
    async fn lock(&self, key: &str, wait_secs: u64) -> Result<bool, EngineError>;

    /// Release a named lock
    async fn unlock(&self, key: &str) -> Result<(), EngineError>;
}

/// Source of raw rate sheet rows for the per-customer cache build
#[async_trait]
pub trait RateSheetSource: Send + Sync {
    /// All rate sheet rows for a customer
    async fn rate_sheets(&self, customer_id: i64) -> Result<Vec<RateSheetEntry>, EngineError>;
}

/// Address book lookups for time-based accessorial exclusions
#[async_trait]
pub trait AddressDirectory: Send + Sync {
    /// Whether the named address is flagged `no_waiting_time`
    async fn no_waiting_time(&self, name: &str) -> Result<bool, EngineError>;
}
