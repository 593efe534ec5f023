//! Cache key constants and builders
//!
//! Standardized key naming for cached entities, preventing collisions
//! between the rate sheet cache and its build locks.
//!
//! # Key Patterns
//!
//! - `ratesheet:{customer_id}` - Cached per-customer rate sheet structure
//! - `ratesheet:lock:{customer_id}` - Build lock guarding the rebuild

/// Prefix for cached per-customer rate sheet structures
///
/// Format: `ratesheet:{customer_id}`
pub const RATE_SHEET_PREFIX: &str = "ratesheet";

/// Prefix for rate sheet build locks
///
/// Format: `ratesheet:lock:{customer_id}`
pub const RATE_SHEET_LOCK_PREFIX: &str = "ratesheet:lock";

/// Default TTL for rate sheet caches (1 hour)
pub const RATE_SHEET_TTL_SECS: u64 = 3600;

/// Default bounded wait for the build lock (10 seconds)
pub const BUILD_LOCK_WAIT_SECS: u64 = 10;

/// Build a cache key for a customer's rate sheet structure
pub fn rate_sheet_key(customer_id: i64) -> String {
    format!("{}:{}", RATE_SHEET_PREFIX, customer_id)
}

/// Build the lock key guarding a customer's rate sheet rebuild
pub fn rate_sheet_lock_key(customer_id: i64) -> String {
    format!("{}:{}", RATE_SHEET_LOCK_PREFIX, customer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_sheet_key() {
        assert_eq!(rate_sheet_key(42), "ratesheet:42");
        assert_eq!(rate_sheet_key(0), "ratesheet:0");
    }

    #[test]
    fn test_rate_sheet_lock_key() {
        assert_eq!(rate_sheet_lock_key(42), "ratesheet:lock:42");
    }

    #[test]
    fn test_keys_do_not_collide() {
        assert_ne!(rate_sheet_key(7), rate_sheet_lock_key(7));
    }

    #[test]
    fn test_ttl_constants() {
        assert_eq!(RATE_SHEET_TTL_SECS, 3600);
        assert_eq!(BUILD_LOCK_WAIT_SECS, 10);
    }
}
