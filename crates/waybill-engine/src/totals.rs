//! Shipment totals aggregation
//!
//! Sums per-line results across all freight lines into shipment-level
//! totals. The aggregate chargeable weight accumulates raw per-line
//! volume weight (not the per-line max) and is floored to the actual
//! weight only after the loop; for mixed shipments this differs from a
//! per-line max-then-sum and is preserved deliberately.

use rust_decimal::Decimal;
use waybill_core::models::{FreightLine, FreightType, ShipmentTotals, WeightUnit};

use crate::constants::LBS_TO_KG;
use crate::volume;

/// Aggregate all freight lines into shipment totals
///
/// `weight_to_pieces_rule` is the customer's pounds-per-piece conversion
/// rule; `None` or a non-positive value disables it.
pub fn order_totals(
    lines: &[FreightLine],
    weight_to_pieces_rule: Option<Decimal>,
) -> ShipmentTotals {
    let mut totals = ShipmentTotals::default();
    let mut total_volume = Decimal::ZERO;

    for line in lines {
        let actual = line.weight;
        let volume = volume::volume_weight(line);
        let chargeable = actual.max(volume);

        totals.total_actual_weight += actual;
        total_volume += volume;
        totals.pure_total_volume_weight += volume;
        // the aggregate sums raw volume weight, not the per-line max
        totals.total_chargeable_weight += volume;
        totals.total_pieces += line.pieces;

        match line.freight_type {
            FreightType::Skid => {
                let mut pieces = line.pieces;
                if let Some(rule) = weight_to_pieces_rule {
                    if rule > Decimal::ZERO {
                        pieces = pieces.max(volume::pieces_from_weight(line, rule));
                    }
                }
                pieces = pieces.max(volume::pieces_from_size(line));
                totals.total_chargeable_pieces += pieces;
                totals.has_skid_type = true;
            }
            FreightType::Box | FreightType::Envelope => {
                totals.box_weight += chargeable;
                totals.has_weight_type = true;
            }
        }

        totals.weight_in_kg += match line.weight_unit {
            WeightUnit::Kg => volume,
            WeightUnit::Lbs => volume * LBS_TO_KG,
        };
    }

    if total_volume < totals.total_actual_weight {
        totals.total_chargeable_weight = totals.total_actual_weight;
    }
    if totals.has_skid_type {
        totals.skid_weight = totals.total_actual_weight;
    }

    totals.total_actual_weight = totals.total_actual_weight.round_dp(2);
    totals.pure_total_volume_weight = totals.pure_total_volume_weight.round_dp(2);
    totals.total_chargeable_weight = totals.total_chargeable_weight.round_dp(2);
    totals.box_weight = totals.box_weight.round_dp(2);
    totals.skid_weight = totals.skid_weight.round_dp(2);
    totals.weight_in_kg = totals.weight_in_kg.round_dp(2);

    totals
}
