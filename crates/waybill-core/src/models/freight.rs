//! Freight line models
//!
//! A freight line describes one physical item or group on a shipment as
//! entered by the dispatcher: piece count, weight, dimensions, and the unit
//! systems they were entered in. Lines are immutable once submitted and
//! consumed read-only by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Freight type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FreightType {
    /// Palletized freight, billed by piece count (or weight when the
    /// customer's rate sheets are flagged skid-by-weight)
    #[default]
    Skid,
    /// Loose boxed freight, billed by weight
    Box,
    /// Documents and small parcels, billed by weight
    Envelope,
}

impl fmt::Display for FreightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreightType::Skid => write!(f, "skid"),
            FreightType::Box => write!(f, "box"),
            FreightType::Envelope => write!(f, "envelope"),
        }
    }
}

impl FreightType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skid" | "pallet" => Some(FreightType::Skid),
            "box" | "carton" => Some(FreightType::Box),
            "envelope" | "document" => Some(FreightType::Envelope),
            _ => None,
        }
    }
}

/// Weight unit of a freight line as entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Kg => write!(f, "kg"),
        }
    }
}

/// Dimension unit of a freight line as entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    In,
    Cm,
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionUnit::In => write!(f, "in"),
            DimensionUnit::Cm => write!(f, "cm"),
        }
    }
}

/// One physical freight item or group on a shipment
///
/// Missing numeric fields default to zero and units default to lbs/inches,
/// matching the defaults applied at form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightLine {
    /// Freight type
    pub freight_type: FreightType,

    /// Number of physical pieces (>= 1)
    pub pieces: i64,

    /// Total weight for the line, in `weight_unit`
    pub weight: Decimal,

    /// Unit the weight was entered in
    pub weight_unit: WeightUnit,

    /// Length, in `dimension_unit`
    pub length: Decimal,

    /// Width, in `dimension_unit`
    pub width: Decimal,

    /// Height, in `dimension_unit`
    pub height: Decimal,

    /// Unit the dimensions were entered in
    pub dimension_unit: DimensionUnit,

    /// Whether pieces can be stacked
    pub is_stackable: bool,

    /// Conversion toggle; routes the weight through a kg round trip and
    /// flips the effective dimension unit for volume-weight purposes
    pub has_unit_conversion: bool,
}

impl Default for FreightLine {
    fn default() -> Self {
        Self {
            freight_type: FreightType::Skid,
            pieces: 1,
            weight: Decimal::ZERO,
            weight_unit: WeightUnit::Lbs,
            length: Decimal::ZERO,
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            dimension_unit: DimensionUnit::In,
            is_stackable: false,
            has_unit_conversion: false,
        }
    }
}

/// Canonical internal representation of a freight line
///
/// Always expressed in pounds and inches regardless of input units.
/// Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedFreight {
    pub weight_lbs: Decimal,
    pub length_in: Decimal,
    pub width_in: Decimal,
    pub height_in: Decimal,
    pub pieces: i64,
    pub is_stackable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_freight_type_parsing() {
        assert_eq!(FreightType::from_str("SKID"), Some(FreightType::Skid));
        assert_eq!(FreightType::from_str("box"), Some(FreightType::Box));
        assert_eq!(
            FreightType::from_str("envelope"),
            Some(FreightType::Envelope)
        );
        assert_eq!(FreightType::from_str("crate"), None);
    }

    #[test]
    fn test_freight_line_defaults() {
        let line = FreightLine::default();
        assert_eq!(line.pieces, 1);
        assert_eq!(line.weight_unit, WeightUnit::Lbs);
        assert_eq!(line.dimension_unit, DimensionUnit::In);
        assert!(!line.has_unit_conversion);
    }

    #[test]
    fn test_freight_line_serde_round_trip() {
        let line = FreightLine {
            freight_type: FreightType::Box,
            pieces: 3,
            weight: dec!(120.5),
            weight_unit: WeightUnit::Kg,
            dimension_unit: DimensionUnit::Cm,
            ..Default::default()
        };

        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"box\""));
        assert!(json.contains("\"kg\""));

        let back: FreightLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pieces, 3);
        assert_eq!(back.weight, dec!(120.5));
    }
}
