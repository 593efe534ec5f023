//! Freight rate and charge calculation engine
//!
//! This crate contains the calculation services that turn a shipment's
//! freight lines and a customer's negotiated rate sheets into a final
//! invoice breakdown:
//!
//! - `units` - Weight/dimension normalization with the conversion toggle
//! - `volume` - Volumetric weight and chargeable piece counts
//! - `totals` - Shipment-level aggregation over all freight lines
//! - `sheet_cache` - Per-customer rate sheet cache build and caching
//! - `resolver` - Directional rate lookup with fallback and brackets
//! - `accessorial` - Per-line accessorial charge amounts
//! - `pipeline` - Service charges, fuel surcharge, and taxes
//! - `engine` - The `RatingEngine` front door tying it together
//!
//! All calculators are deterministic pure functions; the only shared state
//! is the injected rate sheet cache.

pub mod accessorial;
pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod sheet_cache;
pub mod totals;
pub mod units;
pub mod volume;

pub use engine::{CustomerContext, RatingEngine};
pub use sheet_cache::{RateSheetCache, SheetCacheService};

/// Calculation constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Pounds to kilograms factor
    ///
    /// Not the exact inverse of `KG_TO_LBS`; both factors are fixed
    /// independently and a round trip is near-identity, not identity.
    pub const LBS_TO_KG: Decimal = dec!(0.453592);

    /// Kilograms to pounds factor
    pub const KG_TO_LBS: Decimal = dec!(2.20462);

    /// Centimetres to inches factor
    pub const CM_TO_INCH: Decimal = dec!(0.393701);

    /// Inches to centimetres factor
    pub const INCH_TO_CM: Decimal = dec!(2.54);

    /// Height forced onto stackable lines for volume-weight purposes
    pub const STACKABLE_HEIGHT: Decimal = dec!(102);

    /// Volumetric divisor when the effective dimension unit is inches
    pub const VOLUME_DIVISOR_IN: Decimal = dec!(172);

    /// Volumetric divisor when the effective dimension unit is centimetres
    pub const VOLUME_DIVISOR_CM: Decimal = dec!(6000);

    /// Oversize limit for length and width, inches
    pub const OVERSIZE_LIMIT: Decimal = dec!(48);

    /// Oversize limit for height, inches
    pub const OVERSIZE_HEIGHT_LIMIT: Decimal = dec!(82);
}
