//! Per-customer rate sheet cache
//!
//! Raw rate sheet rows are expensive to fetch and awkward to query, so the
//! engine folds them into a `RateSheetCache` structure once per customer:
//! sheets grouped by rate group and destination city, with the bracket
//! names that exist per group collected alongside. `SheetCacheService`
//! owns the build-or-fetch cycle against the cache store, guarded by a
//! per-customer build lock so concurrent quotes do not rebuild in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use waybill_cache::keys::{rate_sheet_key, rate_sheet_lock_key};
use waybill_core::config::EngineConfig;
use waybill_core::error::EngineError;
use waybill_core::models::{RateBracket, RateGroup, RateScope, RateSheetEntry};
use waybill_core::traits::{CacheService, RateSheetSource};

/// One rate sheet as stored in the per-customer cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSheet {
    pub id: i64,
    pub rate_code: Option<String>,
    pub scope: RateScope,
    pub priority_sequence: i32,
    pub min_rate: Decimal,
    pub skid_by_weight: bool,
    pub brackets: Vec<RateBracket>,
}

impl CachedSheet {
    fn from_entry(entry: &RateSheetEntry) -> Self {
        Self {
            id: entry.id,
            rate_code: entry.rate_code.clone(),
            scope: entry.scope,
            priority_sequence: entry.priority_sequence,
            min_rate: entry.min_rate,
            skid_by_weight: entry.skid_by_weight,
            brackets: sort_brackets(entry.brackets()),
        }
    }

    /// Rate for a named bracket, if the sheet carries it
    pub fn bracket_value(&self, name: &str) -> Option<Decimal> {
        self.brackets
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.value)
    }
}

/// Brackets ordered for lookup: `ltl` first, then numeric thresholds
/// ascending, then anything else by name
fn sort_brackets(mut brackets: Vec<RateBracket>) -> Vec<RateBracket> {
    brackets.sort_by(|a, b| {
        let rank = |bracket: &RateBracket| -> (u8, Decimal, String) {
            if bracket.name.eq_ignore_ascii_case("ltl") {
                (0, Decimal::ZERO, String::new())
            } else if let Some(n) = bracket.numeric_name() {
                (1, n, String::new())
            } else {
                (2, Decimal::ZERO, bracket.name.clone())
            }
        };
        rank(a).cmp(&rank(b))
    });
    brackets
}

/// Per-customer rate sheet structure
///
/// Destination cities are normalized (trimmed, uppercased) at build time;
/// lookups must pass cities through the same normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSheetCache {
    groups: HashMap<RateGroup, HashMap<String, Vec<CachedSheet>>>,
    available_brackets: HashMap<RateGroup, Vec<String>>,
    has_skid_by_weight: bool,
}

impl RateSheetCache {
    /// Fold raw rate sheet rows into the grouped structure
    ///
    /// Skid sheets flagged `skid_by_weight` are duplicated into the
    /// synthetic `Skid2` group so they can be resolved by weight bracket;
    /// any such sheet also sets the customer-wide `has_skid_by_weight`
    /// flag that retargets skid lookups.
    pub fn build(entries: &[RateSheetEntry]) -> Self {
        let mut cache = Self::default();

        for entry in entries {
            let city = entry.normalized_city();
            let sheet = CachedSheet::from_entry(entry);

            cache.insert(entry.group, &city, sheet.clone());

            if entry.group == RateGroup::Skid && entry.skid_by_weight {
                cache.has_skid_by_weight = true;
                cache.insert(RateGroup::Skid2, &city, sheet);
            }
        }

        for brackets in cache.available_brackets.values_mut() {
            brackets.sort_by(|a, b| {
                let rank = |name: &str| -> (u8, Decimal) {
                    if name.eq_ignore_ascii_case("ltl") {
                        (0, Decimal::ZERO)
                    } else if let Ok(n) = name.trim().parse::<Decimal>() {
                        (1, n)
                    } else {
                        (2, Decimal::ZERO)
                    }
                };
                rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
            });
            brackets.dedup();
        }

        cache
    }

    fn insert(&mut self, group: RateGroup, city: &str, sheet: CachedSheet) {
        let names = self.available_brackets.entry(group).or_default();
        for bracket in &sheet.brackets {
            let name = bracket.name.to_lowercase();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        self.groups
            .entry(group)
            .or_default()
            .entry(city.to_string())
            .or_default()
            .push(sheet);
    }

    /// Sheets for a group and (normalized) city, highest priority first
    pub fn entries(&self, group: RateGroup, city: &str) -> Vec<&CachedSheet> {
        let mut sheets: Vec<&CachedSheet> = self
            .groups
            .get(&group)
            .and_then(|cities| cities.get(city))
            .map(|sheets| sheets.iter().collect())
            .unwrap_or_default();
        sheets.sort_by(|a, b| b.priority_sequence.cmp(&a.priority_sequence));
        sheets
    }

    /// All sheets in a group regardless of city
    pub fn group_entries(&self, group: RateGroup) -> Vec<&CachedSheet> {
        self.groups
            .get(&group)
            .map(|cities| cities.values().flatten().collect())
            .unwrap_or_default()
    }

    /// Bracket names present anywhere in a group, in lookup order
    pub fn available_brackets(&self, group: RateGroup) -> &[String] {
        self.available_brackets
            .get(&group)
            .map(|names| names.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any skid sheet for this customer bills by weight
    pub fn has_skid_by_weight(&self) -> bool {
        self.has_skid_by_weight
    }

    /// Whether the customer has any sheets at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build-or-fetch service for per-customer rate sheet caches
pub struct SheetCacheService<S, C> {
    source: Arc<S>,
    cache: Arc<C>,
    ttl_secs: u64,
    lock_wait_secs: u64,
}

impl<S, C> SheetCacheService<S, C>
where
    S: RateSheetSource,
    C: CacheService,
{
    pub fn new(source: Arc<S>, cache: Arc<C>, config: &EngineConfig) -> Self {
        Self {
            source,
            cache,
            ttl_secs: config.rate_cache_ttl_secs,
            lock_wait_secs: config.lock_wait_secs,
        }
    }

    /// Cached structure for a customer, building it on miss
    ///
    /// The build is guarded by a per-customer lock with a bounded wait;
    /// if the wait elapses the build proceeds unguarded (duplicate work,
    /// not corruption, since the last writer wins).
    pub async fn get_or_build(&self, customer_id: i64) -> Result<RateSheetCache, EngineError> {
        let key = rate_sheet_key(customer_id);

        if let Some(cached) = self.cache.get::<RateSheetCache>(&key).await? {
            debug!(customer_id, "rate sheet cache hit");
            return Ok(cached);
        }

        let lock_key = rate_sheet_lock_key(customer_id);
        let locked = self.cache.lock(&lock_key, self.lock_wait_secs).await?;
        if !locked {
            warn!(customer_id, "rate sheet build lock wait elapsed, building unguarded");
        }

        // another builder may have finished while we waited on the lock
        if locked {
            if let Some(cached) = self.cache.get::<RateSheetCache>(&key).await? {
                self.cache.unlock(&lock_key).await?;
                return Ok(cached);
            }
        }

        let result = self.build(customer_id, &key).await;

        if locked {
            if let Err(err) = self.cache.unlock(&lock_key).await {
                warn!(customer_id, %err, "failed to release rate sheet build lock");
            }
        }

        result
    }

    async fn build(&self, customer_id: i64, key: &str) -> Result<RateSheetCache, EngineError> {
        let entries = self
            .source
            .rate_sheets(customer_id)
            .await
            .map_err(|err| EngineError::CacheBuild {
                customer_id,
                reason: err.to_string(),
            })?;

        let cache = RateSheetCache::build(&entries);
        debug!(
            customer_id,
            sheets = entries.len(),
            "built rate sheet cache"
        );

        // a write failure degrades to rebuild-per-request, not an error
        if let Err(err) = self.cache.set(key, &cache, self.ttl_secs).await {
            warn!(customer_id, %err, "failed to store rate sheet cache");
        }

        Ok(cache)
    }

    /// Drop a customer's cached structure; the next quote rebuilds it
    pub async fn invalidate(&self, customer_id: i64) -> Result<bool, EngineError> {
        self.cache.forget(&rate_sheet_key(customer_id)).await
    }
}
