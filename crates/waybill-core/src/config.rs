//! Engine configuration
//!
//! This module provides centralized configuration management using the
//! `config` crate. Every ambient value the engine consumes (default
//! bracket, cache TTLs, lock timeouts, the FTL weight threshold) is
//! represented here explicitly and injected into the pipeline instead of
//! being read from global state.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Bracket name used when a skid rate sheet carries no numeric
    /// piece brackets
    #[serde(default = "default_bracket")]
    pub default_bracket: String,

    /// TTL for the per-customer rate sheet cache in seconds
    #[serde(default = "default_rate_cache_ttl")]
    pub rate_cache_ttl_secs: u64,

    /// Bounded wait for the cache build lock in seconds; after this the
    /// rebuild proceeds without mutual exclusion
    #[serde(default = "default_lock_wait")]
    pub lock_wait_secs: u64,

    /// Chargeable-weight threshold separating LTL from FTL fuel
    /// surcharges, used when the customer has no rule of their own
    #[serde(default = "default_ftl_threshold")]
    pub ftl_weight_threshold: u32,
}

fn default_bracket() -> String {
    "ltl".to_string()
}

fn default_rate_cache_ttl() -> u64 {
    3600
}

fn default_lock_wait() -> u64 {
    10
}

fn default_ftl_threshold() -> u32 {
    10_000
}

impl EngineConfig {
    /// Load configuration from an optional config file and environment
    /// variables with the `WAYBILL_` prefix
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("default_bracket", "ltl")?
            .set_default("rate_cache_ttl_secs", 3600)?
            .set_default("lock_wait_secs", 10)?
            .set_default("ftl_weight_threshold", 10_000)?
            .add_source(File::with_name("config/engine").required(false))
            .add_source(
                Environment::with_prefix("WAYBILL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_bracket: default_bracket(),
            rate_cache_ttl_secs: default_rate_cache_ttl(),
            lock_wait_secs: default_lock_wait(),
            ftl_weight_threshold: default_ftl_threshold(),
        }
    }
}
