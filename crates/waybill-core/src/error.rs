//! Unified error handling for the Waybill rating engine
//!
//! The calculation pipeline is deliberately forgiving: rate lookup misses
//! and malformed per-line inputs produce zero charges, never errors. The
//! variants here cover the failures that must surface to the caller, most
//! importantly a rate-sheet cache build failure (the one hard error the
//! engine is allowed to raise).

use thiserror::Error;

/// Main engine error type
///
/// All errors in the engine should be converted to this type.
#[derive(Error, Debug)]
pub enum EngineError {
    // ==================== Cache Errors ====================
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Rate sheet cache build failed for customer {customer_id}: {reason}")]
    CacheBuild { customer_id: i64, reason: String },

    // ==================== Collaborator Errors ====================
    #[error("Rate sheet source error: {0}")]
    RateSheetSource(String),

    #[error("Address directory error: {0}")]
    AddressDirectory(String),

    // ==================== Input Errors ====================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Returns the error code for structured logging
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::Cache(_) => "cache_error",
            EngineError::CacheBuild { .. } => "cache_build_error",
            EngineError::RateSheetSource(_) => "rate_sheet_source_error",
            EngineError::AddressDirectory(_) => "address_directory_error",
            EngineError::InvalidInput(_) => "invalid_input",
            EngineError::Serialization(_) => "serialization_error",
            EngineError::Config(_) => "config_error",
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EngineError::Cache("down".to_string()).error_code(),
            "cache_error"
        );
        assert_eq!(
            EngineError::CacheBuild {
                customer_id: 7,
                reason: "source unavailable".to_string()
            }
            .error_code(),
            "cache_build_error"
        );
    }

    #[test]
    fn test_cache_build_message() {
        let err = EngineError::CacheBuild {
            customer_id: 42,
            reason: "timeout".to_string(),
        };
        assert!(err.to_string().contains("customer 42"));
    }
}
