//! Accessorial charge amounts
//!
//! Computes the billable amount for one accessorial selection against its
//! (override-merged) definition. Time-based accessorials bill from the
//! recorded pickup/delivery waiting minutes; every other type is driven by
//! the order quantity and, for rate-linked types, the freight rate.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use tracing::warn;

use waybill_core::models::{AccessorialCharge, AccessorialSelection, AccessorialType, AmountType, TimeUnit};

/// Waiting-time inputs for time-based accessorials
///
/// Times are the raw `HH:MM` strings from the order form; the
/// `no_waiting` flags come from the address book and zero out a leg.
#[derive(Debug, Clone, Default)]
pub struct WaitingInputs {
    pub pickup_in: Option<String>,
    pub pickup_out: Option<String>,
    pub delivery_in: Option<String>,
    pub delivery_out: Option<String>,
    pub pickup_no_waiting: bool,
    pub delivery_no_waiting: bool,
}

/// Waiting minutes between an arrival and departure time
///
/// `"00:00"` is the form's not-recorded sentinel and counts as absent.
/// A departure before the arrival, or a malformed time, yields zero.
pub fn waiting_minutes(time_in: Option<&str>, time_out: Option<&str>) -> i64 {
    let (time_in, time_out) = match (time_in, time_out) {
        (Some(a), Some(b)) if a != "00:00" && b != "00:00" => (a, b),
        _ => return 0,
    };

    let parse = |s: &str| -> Option<NaiveTime> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    };

    match (parse(time_in), parse(time_out)) {
        (Some(arrival), Some(departure)) => (departure - arrival).num_minutes().max(0),
        _ => {
            warn!(time_in, time_out, "unparseable waiting time, billing zero");
            0
        }
    }
}

fn billable_leg_minutes(minutes: i64, free_minutes: Decimal) -> Decimal {
    (Decimal::from(minutes) - free_minutes).max(Decimal::ZERO)
}

/// Billable amount for one accessorial selection
///
/// Returns zero for selections that are not included, carry a
/// non-positive quantity, or reference no definition. The min/max clamps
/// apply last, each only when set above zero.
pub fn calculate(
    charge: &AccessorialCharge,
    selection: &AccessorialSelection,
    freight_rate: Decimal,
    waiting: &WaitingInputs,
) -> Decimal {
    if !selection.is_included || selection.qty <= Decimal::ZERO || charge.accessorial_id.is_none() {
        return Decimal::ZERO;
    }

    let qty = selection.qty;
    let mut amount = match charge.charge_type {
        AccessorialType::FixedPrice => charge.rate * qty,
        AccessorialType::FuelBased => {
            let per_unit = match charge.amount_type {
                AmountType::Percentage => charge.rate / Decimal::ONE_HUNDRED * freight_rate,
                AmountType::Fixed => charge.rate,
            };
            per_unit * qty
        }
        AccessorialType::TransportBased => {
            let per_unit = match charge.amount_type {
                AmountType::Percentage => charge.rate / Decimal::ONE_HUNDRED * freight_rate,
                AmountType::Fixed => charge.rate * freight_rate,
            };
            per_unit * qty
        }
        AccessorialType::TimeBased => {
            // waiting time bills per leg against the free allowance,
            // independent of the order quantity
            let free_minutes = match charge.time_unit {
                TimeUnit::Hour => charge.free_time * Decimal::from(60),
                TimeUnit::Minute => charge.free_time,
            };

            let pickup = if waiting.pickup_no_waiting {
                Decimal::ZERO
            } else {
                billable_leg_minutes(
                    waiting_minutes(waiting.pickup_in.as_deref(), waiting.pickup_out.as_deref()),
                    free_minutes,
                )
            };
            let delivery = if waiting.delivery_no_waiting {
                Decimal::ZERO
            } else {
                billable_leg_minutes(
                    waiting_minutes(
                        waiting.delivery_in.as_deref(),
                        waiting.delivery_out.as_deref(),
                    ),
                    free_minutes,
                )
            };

            charge.base_amount + charge.rate * (pickup + delivery)
        }
        AccessorialType::ProductBase | AccessorialType::PackageBased => charge.rate * qty,
    };

    if charge.min > Decimal::ZERO && amount < charge.min {
        amount = charge.min;
    }
    if charge.max > Decimal::ZERO && amount > charge.max {
        amount = charge.max;
    }

    amount.round_dp(2)
}
