//! Unit normalization
//!
//! Converts freight weight/dimension inputs into the canonical internal
//! representation (pounds, inches). The conversion toggle routes the
//! weight through a kg round trip even when the input is already in
//! lbs/in; the round trip is numerically near-identity because the two
//! factors are not exact inverses, and that behavior is intentional.

use rust_decimal::Decimal;
use waybill_core::models::{DimensionUnit, FreightLine, NormalizedFreight, WeightUnit};

use crate::constants::{CM_TO_INCH, KG_TO_LBS, LBS_TO_KG};

/// Normalize a freight line to pounds and inches
pub fn normalize(freight: &FreightLine) -> NormalizedFreight {
    let mut weight = freight.weight;
    let mut working_unit = freight.weight_unit;

    if freight.has_unit_conversion {
        match (freight.weight_unit, freight.dimension_unit) {
            (WeightUnit::Kg, DimensionUnit::Cm) => {
                weight *= KG_TO_LBS;
                working_unit = WeightUnit::Lbs;
            }
            (WeightUnit::Lbs, DimensionUnit::In) => {
                // the toggle always routes through a kg round trip
                weight *= LBS_TO_KG;
                weight *= KG_TO_LBS;
                working_unit = WeightUnit::Lbs;
            }
            _ => {}
        }
    }

    // whatever unit the toggle left us in, internal bookkeeping is lbs
    if working_unit == WeightUnit::Kg {
        weight *= KG_TO_LBS;
    }

    let (length_in, width_in, height_in) = match freight.dimension_unit {
        DimensionUnit::In => (freight.length, freight.width, freight.height),
        DimensionUnit::Cm => (
            freight.length * CM_TO_INCH,
            freight.width * CM_TO_INCH,
            freight.height * CM_TO_INCH,
        ),
    };

    NormalizedFreight {
        weight_lbs: weight,
        length_in,
        width_in,
        height_in,
        pieces: freight.pieces,
        is_stackable: freight.is_stackable,
    }
}

/// Convert pounds to kilograms with the engine's fixed factor
pub fn lbs_to_kg(weight: Decimal) -> Decimal {
    weight * LBS_TO_KG
}

/// Convert kilograms to pounds with the engine's fixed factor
pub fn kg_to_lbs(weight: Decimal) -> Decimal {
    weight * KG_TO_LBS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lbs_in_without_toggle_is_identity() {
        let line = FreightLine {
            weight: dec!(150),
            length: dec!(48),
            width: dec!(40),
            height: dec!(60),
            ..Default::default()
        };

        let normalized = normalize(&line);
        assert_eq!(normalized.weight_lbs, dec!(150));
        assert_eq!(normalized.length_in, dec!(48));
        assert_eq!(normalized.width_in, dec!(40));
        assert_eq!(normalized.height_in, dec!(60));
    }

    #[test]
    fn test_kg_converts_to_lbs() {
        let line = FreightLine {
            weight: dec!(100),
            weight_unit: WeightUnit::Kg,
            ..Default::default()
        };

        let normalized = normalize(&line);
        assert_eq!(normalized.weight_lbs, dec!(220.462));
    }

    #[test]
    fn test_toggle_kg_cm_converts_once() {
        let line = FreightLine {
            weight: dec!(100),
            weight_unit: WeightUnit::Kg,
            dimension_unit: DimensionUnit::Cm,
            has_unit_conversion: true,
            ..Default::default()
        };

        // single kg->lbs pass; the final pass must not re-apply
        let normalized = normalize(&line);
        assert_eq!(normalized.weight_lbs, dec!(220.462));
    }

    #[test]
    fn test_toggle_lbs_in_round_trip_is_near_identity() {
        let line = FreightLine {
            weight: dec!(100),
            has_unit_conversion: true,
            ..Default::default()
        };

        let normalized = normalize(&line);
        let diff = (normalized.weight_lbs - dec!(100)).abs();
        assert!(diff < dec!(0.1), "round trip drifted by {}", diff);
        // the round trip is not exactly identity
        assert_ne!(normalized.weight_lbs, dec!(100));
    }

    #[test]
    fn test_toggle_with_mismatched_units_leaves_weight_to_final_pass() {
        // kg weight with inch dimensions: neither toggle arm fires, the
        // final kg->lbs pass still runs
        let line = FreightLine {
            weight: dec!(50),
            weight_unit: WeightUnit::Kg,
            dimension_unit: DimensionUnit::In,
            has_unit_conversion: true,
            ..Default::default()
        };

        let normalized = normalize(&line);
        assert_eq!(normalized.weight_lbs, dec!(110.231));
    }

    #[test]
    fn test_cm_dimensions_convert_unconditionally() {
        let line = FreightLine {
            weight: dec!(10),
            length: dec!(100),
            width: dec!(50),
            height: dec!(25),
            dimension_unit: DimensionUnit::Cm,
            ..Default::default()
        };

        let normalized = normalize(&line);
        assert_eq!(normalized.length_in, dec!(39.3701));
        assert_eq!(normalized.width_in, dec!(19.68505));
        assert_eq!(normalized.height_in, dec!(9.842525));
    }

    #[test]
    fn test_round_trip_tolerance() {
        let original = dec!(250);
        let back = kg_to_lbs(lbs_to_kg(original));
        assert!((back - original).abs() < dec!(0.1));
    }
}
