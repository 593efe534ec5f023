//! Shipment-level totals
//!
//! Aggregate of all freight lines on an order, produced by the totals
//! aggregator and consumed by the rate resolver and charge pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate totals over all freight lines in a shipment
///
/// Invariant: `total_chargeable_weight >= total_actual_weight`. The
/// aggregator accumulates raw per-line volume weight into
/// `total_chargeable_weight` and applies the actual-weight floor only
/// after the loop, so intermediate values may be below the floor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentTotals {
    /// Sum of entered line weights
    pub total_actual_weight: Decimal,

    /// Sum of per-line volumetric weights, untouched by the floor
    pub pure_total_volume_weight: Decimal,

    /// Billing-relevant weight, floored at `total_actual_weight`
    pub total_chargeable_weight: Decimal,

    /// Sum of physical piece counts
    pub total_pieces: i64,

    /// Sum of chargeable piece counts for skid lines
    pub total_chargeable_pieces: i64,

    /// Sum of chargeable weight for non-skid lines
    pub box_weight: Decimal,

    /// Equals `total_actual_weight` when the shipment has skid lines
    pub skid_weight: Decimal,

    /// Volume weight expressed in kilograms
    pub weight_in_kg: Decimal,

    /// Shipment contains at least one skid line
    pub has_skid_type: bool,

    /// Shipment contains at least one weight-billed (non-skid) line
    pub has_weight_type: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_default() {
        let totals = ShipmentTotals::default();
        assert_eq!(totals.total_actual_weight, Decimal::ZERO);
        assert_eq!(totals.total_pieces, 0);
        assert!(!totals.has_skid_type);
    }

    #[test]
    fn test_totals_serde_round_trip() {
        let totals = ShipmentTotals {
            total_actual_weight: dec!(1200),
            total_chargeable_weight: dec!(1607.44),
            total_chargeable_pieces: 2,
            has_skid_type: true,
            ..Default::default()
        };

        let json = serde_json::to_string(&totals).unwrap();
        let back: ShipmentTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_chargeable_weight, dec!(1607.44));
        assert!(back.has_skid_type);
    }
}
