//! Volumetric weight and chargeable piece counts
//!
//! The volume-weight conversion here is toggle-aware in its own right and
//! distinct from the normalization in `units`: the toggle flips the
//! effective dimension unit (and with it the divisor) rather than feeding
//! off the normalized values.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use waybill_core::models::{DimensionUnit, FreightLine, WeightUnit};

use crate::constants::{
    CM_TO_INCH, OVERSIZE_HEIGHT_LIMIT, OVERSIZE_LIMIT, STACKABLE_HEIGHT, VOLUME_DIVISOR_CM,
    VOLUME_DIVISOR_IN,
};

/// Volumetric (dimensional) weight for one freight line
///
/// pieces x (L x W x H / divisor), divisor 172 for inch dimensions and
/// 6000 for centimetres, rounded to 2 decimals. A stackable line's height
/// is overridden to 102 in the current working unit before multiplying.
pub fn volume_weight(freight: &FreightLine) -> Decimal {
    let mut length = freight.length;
    let mut width = freight.width;
    let mut height = freight.height;
    let mut effective_unit = freight.dimension_unit;

    if freight.has_unit_conversion {
        match (freight.weight_unit, freight.dimension_unit) {
            (WeightUnit::Kg, DimensionUnit::Cm) => {
                length *= CM_TO_INCH;
                width *= CM_TO_INCH;
                height *= CM_TO_INCH;
                effective_unit = DimensionUnit::In;
            }
            (WeightUnit::Lbs, DimensionUnit::In) => {
                length /= CM_TO_INCH;
                width /= CM_TO_INCH;
                height /= CM_TO_INCH;
                effective_unit = DimensionUnit::Cm;
            }
            _ => {}
        }
    }

    if freight.is_stackable {
        height = STACKABLE_HEIGHT;
    }

    let divisor = match effective_unit {
        DimensionUnit::In => VOLUME_DIVISOR_IN,
        DimensionUnit::Cm => VOLUME_DIVISOR_CM,
    };

    (Decimal::from(freight.pieces) * length * width * height / divisor).round_dp(2)
}

/// Chargeable piece count derived from the line's dimensions
///
/// Oversize doubling and stackable doubling do not stack: an oversize
/// line takes the length-derived count (doubled again for oversize width
/// or height), and only a non-oversize stackable line doubles.
pub fn pieces_from_size(freight: &FreightLine) -> i64 {
    let to_inches = |d: Decimal| -> Decimal {
        match freight.dimension_unit {
            DimensionUnit::In => d.ceil(),
            DimensionUnit::Cm => (d * CM_TO_INCH).ceil(),
        }
    };

    let length = to_inches(freight.length);
    let width = to_inches(freight.width);
    let height = to_inches(freight.height);
    let pieces = Decimal::from(freight.pieces);

    let mut base = pieces;
    if length > OVERSIZE_LIMIT || width > OVERSIZE_LIMIT || height > OVERSIZE_HEIGHT_LIMIT {
        base = (length / OVERSIZE_LIMIT).ceil() * pieces;
        if width > OVERSIZE_LIMIT || height > OVERSIZE_HEIGHT_LIMIT {
            base *= dec!(2);
        }
    } else if freight.is_stackable {
        base *= dec!(2);
    }

    base.to_i64().unwrap_or(freight.pieces)
}

/// Chargeable piece count derived from the line's weight
///
/// A rule of N pounds per piece converts the entered weight to pieces,
/// rounding any fractional remainder up. A rule of zero or less leaves
/// the entered piece count untouched.
pub fn pieces_from_weight(freight: &FreightLine, rule: Decimal) -> i64 {
    if rule <= Decimal::ZERO {
        return freight.pieces;
    }
    (freight.weight / rule).ceil().to_i64().unwrap_or(freight.pieces)
}

/// Billing-relevant weight for one line
///
/// Compares the entered (pre-normalization) weight against the volume
/// weight; the displayed weight stays in the unit the user entered.
pub fn chargeable_weight(freight: &FreightLine) -> Decimal {
    freight.weight.max(volume_weight(freight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::MathematicalOps;
    use waybill_core::models::FreightType;

    fn line(pieces: i64, l: i64, w: i64, h: i64) -> FreightLine {
        FreightLine {
            freight_type: FreightType::Skid,
            pieces,
            length: Decimal::from(l),
            width: Decimal::from(w),
            height: Decimal::from(h),
            ..Default::default()
        }
    }

    #[test]
    fn test_volume_weight_inches() {
        // 2 x (48 x 40 x 72) / 172
        let freight = line(2, 48, 40, 72);
        assert_eq!(volume_weight(&freight), dec!(1607.44));
    }

    #[test]
    fn test_volume_weight_centimetres() {
        let freight = FreightLine {
            pieces: 1,
            length: dec!(120),
            width: dec!(100),
            height: dec!(100),
            dimension_unit: DimensionUnit::Cm,
            ..Default::default()
        };
        // 120 x 100 x 100 / 6000 = 200
        assert_eq!(volume_weight(&freight), dec!(200.00));
    }

    #[test]
    fn test_volume_weight_stackable_overrides_height() {
        let mut freight = line(1, 48, 40, 60);
        freight.is_stackable = true;
        // height forced to 102: 48 x 40 x 102 / 172
        assert_eq!(volume_weight(&freight), dec!(1138.60));
    }

    #[test]
    fn test_volume_weight_toggle_flips_divisor() {
        // kg/cm with the toggle: dimensions go to inches, divisor 172
        let freight = FreightLine {
            pieces: 1,
            weight_unit: WeightUnit::Kg,
            length: dec!(100),
            width: dec!(100),
            height: dec!(100),
            dimension_unit: DimensionUnit::Cm,
            has_unit_conversion: true,
            ..Default::default()
        };

        let expected = (dec!(100) * CM_TO_INCH).powi(3) / dec!(172);
        assert_eq!(volume_weight(&freight), expected.round_dp(2));
    }

    #[test]
    fn test_pieces_from_size_oversize_length() {
        // 96 long: ceil(96/48) = 2
        assert_eq!(pieces_from_size(&line(1, 96, 40, 72)), 2);
    }

    #[test]
    fn test_pieces_from_size_stackable_standard_box() {
        let mut freight = line(1, 48, 40, 72);
        freight.is_stackable = true;
        assert_eq!(pieces_from_size(&freight), 2);
    }

    #[test]
    fn test_pieces_from_size_oversize_and_stackable() {
        // oversize doubling wins; stackable does not double again
        let mut freight = line(1, 96, 60, 90);
        freight.is_stackable = true;
        assert_eq!(pieces_from_size(&freight), 4);
    }

    #[test]
    fn test_pieces_from_size_standard_box() {
        assert_eq!(pieces_from_size(&line(1, 48, 40, 72)), 1);
    }

    #[test]
    fn test_pieces_from_size_oversize_width_only() {
        // width > 48: length-derived base then doubled
        assert_eq!(pieces_from_size(&line(1, 40, 60, 72)), 2);
    }

    #[test]
    fn test_pieces_from_weight() {
        let mut freight = line(1, 48, 40, 72);
        freight.weight = dec!(1001);
        assert_eq!(pieces_from_weight(&freight, dec!(1000)), 2);

        freight.weight = dec!(1000);
        assert_eq!(pieces_from_weight(&freight, dec!(1000)), 1);
    }

    #[test]
    fn test_pieces_from_weight_rule_disabled() {
        let mut freight = line(3, 48, 40, 72);
        freight.weight = dec!(5000);
        assert_eq!(pieces_from_weight(&freight, Decimal::ZERO), 3);
        assert_eq!(pieces_from_weight(&freight, dec!(-10)), 3);
    }

    #[test]
    fn test_chargeable_weight_takes_max() {
        let mut freight = line(2, 48, 40, 72);
        freight.weight = dec!(500);
        // volume 1607.44 dominates
        assert_eq!(chargeable_weight(&freight), dec!(1607.44));

        freight.weight = dec!(2000);
        assert_eq!(chargeable_weight(&freight), dec!(2000));
    }
}
