//! Accessorial charge models
//!
//! An accessorial is a potential extra charge on a shipment (tailgate,
//! waiting time, fuel-linked extras, etc.). Definitions are shared across
//! customers with per-customer overrides applied through a pivot row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessorial charge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessorialType {
    /// Flat amount per unit
    #[default]
    FixedPrice,
    /// Percentage of (or flat addition to) the freight rate; participates
    /// in the fuel surcharge base
    FuelBased,
    /// Percentage of or multiplier on the freight rate
    TransportBased,
    /// Billed from pickup/delivery waiting minutes
    TimeBased,
    ProductBase,
    PackageBased,
}

impl fmt::Display for AccessorialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessorialType::FixedPrice => "fixed_price",
            AccessorialType::FuelBased => "fuel_based",
            AccessorialType::TransportBased => "transport_based",
            AccessorialType::TimeBased => "time_based",
            AccessorialType::ProductBase => "product_base",
            AccessorialType::PackageBased => "package_based",
        };
        write!(f, "{}", s)
    }
}

/// How the `rate` field is interpreted for rate-linked types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    #[default]
    Fixed,
    Percentage,
}

/// Unit of the `free_time` allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Minute,
    Hour,
}

/// An accessorial charge definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessorialCharge {
    /// Definition id; a missing id short-circuits the calculation to zero
    pub accessorial_id: Option<i64>,

    /// Charge type
    pub charge_type: AccessorialType,

    /// Rate (amount, percentage, or per-minute price by type)
    pub rate: Decimal,

    /// Minimum billable amount (0 = no minimum)
    pub min: Decimal,

    /// Maximum billable amount (0 = no maximum)
    pub max: Decimal,

    /// Free waiting-time allowance per leg, in `time_unit`
    pub free_time: Decimal,

    /// Base amount added before per-minute billing (time-based only)
    pub base_amount: Decimal,

    /// Interpretation of `rate` for rate-linked types
    pub amount_type: AmountType,

    /// Unit of `free_time`
    pub time_unit: TimeUnit,
}

impl Default for AccessorialCharge {
    fn default() -> Self {
        Self {
            accessorial_id: None,
            charge_type: AccessorialType::FixedPrice,
            rate: Decimal::ZERO,
            min: Decimal::ZERO,
            max: Decimal::ZERO,
            free_time: Decimal::ZERO,
            base_amount: Decimal::ZERO,
            amount_type: AmountType::Fixed,
            time_unit: TimeUnit::Minute,
        }
    }
}

/// Customer-specific override pivot row
///
/// Only the populated fields replace the shared definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessorialOverride {
    pub rate: Option<Decimal>,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub free_time: Option<Decimal>,
    pub base_amount: Option<Decimal>,
}

impl AccessorialCharge {
    /// Apply a customer override pivot row onto this definition
    pub fn with_overrides(&self, overrides: Option<&AccessorialOverride>) -> AccessorialCharge {
        let mut merged = self.clone();
        if let Some(o) = overrides {
            if let Some(rate) = o.rate {
                merged.rate = rate;
            }
            if let Some(min) = o.min {
                merged.min = min;
            }
            if let Some(max) = o.max {
                merged.max = max;
            }
            if let Some(free_time) = o.free_time {
                merged.free_time = free_time;
            }
            if let Some(base_amount) = o.base_amount {
                merged.base_amount = base_amount;
            }
        }
        merged
    }
}

/// Per-order accessorial input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessorialSelection {
    /// Which definition this selection references
    pub accessorial_id: Option<i64>,

    /// Whether the charge applies to this order
    pub is_included: bool,

    /// Quantity entered on the order
    pub qty: Decimal,
}

impl Default for AccessorialSelection {
    fn default() -> Self {
        Self {
            accessorial_id: None,
            is_included: false,
            qty: Decimal::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accessorial_type_serde() {
        let json = serde_json::to_string(&AccessorialType::FuelBased).unwrap();
        assert_eq!(json, "\"fuel_based\"");

        let back: AccessorialType = serde_json::from_str("\"time_based\"").unwrap();
        assert_eq!(back, AccessorialType::TimeBased);
    }

    #[test]
    fn test_with_overrides_replaces_populated_fields() {
        let charge = AccessorialCharge {
            accessorial_id: Some(1),
            rate: dec!(25.00),
            min: dec!(10.00),
            free_time: dec!(30),
            ..Default::default()
        };

        let overrides = AccessorialOverride {
            rate: Some(dec!(18.00)),
            free_time: Some(dec!(45)),
            ..Default::default()
        };

        let merged = charge.with_overrides(Some(&overrides));
        assert_eq!(merged.rate, dec!(18.00));
        assert_eq!(merged.free_time, dec!(45));
        // untouched fields survive
        assert_eq!(merged.min, dec!(10.00));
    }

    #[test]
    fn test_with_overrides_none() {
        let charge = AccessorialCharge {
            rate: dec!(25.00),
            ..Default::default()
        };
        let merged = charge.with_overrides(None);
        assert_eq!(merged.rate, dec!(25.00));
    }
}
