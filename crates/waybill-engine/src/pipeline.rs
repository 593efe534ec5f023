//! Charge pipeline
//!
//! Takes the resolved base freight rate and layers the remaining charges
//! in order: service-type adjustments (rush markup, direct replacement),
//! accessorials and flat service charges, the fuel surcharge, and finally
//! provincial and federal taxes.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use waybill_core::config::EngineConfig;
use waybill_core::models::{
    fuel, AccessorialCharge, AccessorialType, ChargeBreakdown, Customer, FormState,
    FuelSurchargePeriod, ServiceType, ShipmentTotals, VehicleRate,
};

use crate::accessorial::{self, WaitingInputs};

/// Everything the pipeline needs to turn a base rate into a breakdown
pub struct PipelineInput<'a> {
    pub totals: &'a ShipmentTotals,
    pub customer: &'a Customer,
    pub form: &'a FormState,
    /// Resolver output; ignored when the form carries a manual rate
    pub base_rate: Decimal,
    /// Override-merged accessorial definitions for this customer
    pub accessorials: &'a [AccessorialCharge],
    pub fuel_periods: &'a [FuelSurchargePeriod],
    pub vehicle_rates: &'a [VehicleRate],
    pub waiting: &'a WaitingInputs,
    pub ship_date: NaiveDate,
    pub config: &'a EngineConfig,
}

/// Run the full charge pipeline
pub fn compute(input: &PipelineInput<'_>) -> ChargeBreakdown {
    if input.form.no_charges {
        return ChargeBreakdown::default();
    }

    let mut breakdown = ChargeBreakdown::default();

    breakdown.base_freight_rate = if input.form.manual_charges {
        input.form.freight_rate_amount
    } else {
        input.base_rate
    };

    let mut current = breakdown.base_freight_rate;
    match input.form.service_type {
        ServiceType::Regular => {}
        ServiceType::Rush => {
            let mut rush = input.customer.rush_percentage / Decimal::ONE_HUNDRED * current;
            if input.customer.rush_minimum > Decimal::ZERO && rush < input.customer.rush_minimum {
                rush = input.customer.rush_minimum;
            }
            breakdown.rush_charge = rush.round_dp(2);
            current += breakdown.rush_charge;
        }
        ServiceType::Direct => {
            // direct service replaces the freight rate outright
            breakdown.direct_charge = direct_charge(
                input.customer,
                input.vehicle_rates,
                &input.form.direct_vehicle_ids,
                input.form.direct_km,
            );
            current = breakdown.direct_charge;
        }
    }
    breakdown.modified_freight_rate = current.round_dp(2);

    let definitions: HashMap<i64, &AccessorialCharge> = input
        .accessorials
        .iter()
        .filter_map(|c| c.accessorial_id.map(|id| (id, c)))
        .collect();

    let mut accessorial_total = Decimal::ZERO;
    let mut fuel_based_total = Decimal::ZERO;
    for selection in &input.form.accessorials {
        let Some(charge) = selection.accessorial_id.and_then(|id| definitions.get(&id)) else {
            continue;
        };
        let amount = accessorial::calculate(charge, selection, current, input.waiting);
        accessorial_total += amount;
        if charge.charge_type == AccessorialType::FuelBased {
            fuel_based_total += amount;
        }
    }

    for line in &input.form.service_charges {
        accessorial_total += (line.qty * line.amount).round_dp(2);
    }
    breakdown.accessorial_total = accessorial_total.round_dp(2);

    breakdown.fuel_surcharge = if input.form.manual_fuel_surcharges {
        input.form.fuel_surcharge_amount.round_dp(2)
    } else {
        fuel_surcharge(input, current + fuel_based_total)
    };

    breakdown.sub_total =
        (breakdown.modified_freight_rate + breakdown.fuel_surcharge + breakdown.accessorial_total)
            .round_dp(2);

    if !input.customer.tax_exempt {
        let (pst_rate, gst_rate) = input.customer.province.tax_rates();
        breakdown.pst = (breakdown.sub_total * pst_rate / Decimal::ONE_HUNDRED).round_dp(2);
        breakdown.gst = (breakdown.sub_total * gst_rate / Decimal::ONE_HUNDRED).round_dp(2);
    }

    breakdown.grand_total = (breakdown.sub_total + breakdown.pst + breakdown.gst).round_dp(2);
    debug!(
        sub_total = %breakdown.sub_total,
        grand_total = %breakdown.grand_total,
        "charge pipeline complete"
    );

    breakdown
}

/// Direct service charge over the selected vehicle types
///
/// Customer-negotiated rows win exclusively: if any selected vehicle has
/// a row for this customer, base rows are ignored for the whole order.
fn direct_charge(
    customer: &Customer,
    rates: &[VehicleRate],
    vehicle_ids: &[i32],
    km: Decimal,
) -> Decimal {
    let customer_has_rows = rates.iter().any(|r| {
        r.customer_id == Some(customer.id) && vehicle_ids.contains(&r.vehicle_type_id)
    });

    let mut total = Decimal::ZERO;
    for id in vehicle_ids {
        let row = rates.iter().find(|r| {
            r.vehicle_type_id == *id
                && if customer_has_rows {
                    r.customer_id == Some(customer.id)
                } else {
                    r.customer_id.is_none()
                }
        });
        if let Some(row) = row {
            total += row.rate * km;
        }
    }
    total.round_dp(2)
}

/// Fuel surcharge over the freight rate plus fuel-based accessorials
fn fuel_surcharge(input: &PipelineInput<'_>, base: Decimal) -> Decimal {
    let threshold = input
        .customer
        .fuel_surcharge_rule
        .filter(|rule| *rule > Decimal::ZERO)
        .unwrap_or_else(|| Decimal::from(input.config.ftl_weight_threshold));
    let is_ltl = input.totals.total_chargeable_weight < threshold;

    let pct = if input.customer.fuel_surcharges_other {
        if is_ltl {
            input.customer.other_ltl_fuel_surcharge
        } else {
            input.customer.other_ftl_fuel_surcharge
        }
    } else {
        let Some(period) = fuel::active_period(input.fuel_periods, input.ship_date) else {
            return Decimal::ZERO;
        };
        let published = if is_ltl {
            period.ltl_surcharge
        } else {
            period.ftl_surcharge
        };
        published * input.customer.fuel_surcharge_pct / Decimal::ONE_HUNDRED
    };

    (pct / Decimal::ONE_HUNDRED * base).round_dp(2)
}
