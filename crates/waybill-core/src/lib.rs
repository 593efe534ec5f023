//! Waybill Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Waybill freight rating engine. It includes:
//!
//! - Domain models (FreightLine, RateSheetEntry, AccessorialCharge, etc.)
//! - Collaborator traits for the cache store and persistence sources
//! - Unified error handling
//! - Engine configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::EngineConfig;
pub use error::EngineError;

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;
