//! Customer and vehicle-rate models
//!
//! The customer record carries the negotiated rules the engine consumes:
//! weight-to-pieces conversion, fuel surcharge configuration, rush/direct
//! service parameters, and the tax exemption flag.

use crate::models::province::Province;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer record as consumed by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Pounds per chargeable skid piece; 0/None disables the rule
    pub weight_to_pieces_rule: Option<Decimal>,

    /// Chargeable-weight threshold separating LTL from FTL fuel
    /// surcharges; None falls back to the engine default
    pub fuel_surcharge_rule: Option<Decimal>,

    /// Use the customer's own fuel surcharge percentages instead of the
    /// published period values
    pub fuel_surcharges_other: bool,

    /// Customer LTL fuel percentage, used when `fuel_surcharges_other`
    pub other_ltl_fuel_surcharge: Decimal,

    /// Customer FTL fuel percentage, used when `fuel_surcharges_other`
    pub other_ftl_fuel_surcharge: Decimal,

    /// Base fuel percentage multiplied against the published period value
    pub fuel_surcharge_pct: Decimal,

    /// No provincial or federal tax applied when set
    pub tax_exempt: bool,

    /// Rush service markup percentage
    pub rush_percentage: Decimal,

    /// Rush charge floor (0 = no floor)
    pub rush_minimum: Decimal,

    /// Province used for the tax table
    pub province: Province,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            weight_to_pieces_rule: None,
            fuel_surcharge_rule: None,
            fuel_surcharges_other: false,
            other_ltl_fuel_surcharge: Decimal::ZERO,
            other_ftl_fuel_surcharge: Decimal::ZERO,
            fuel_surcharge_pct: Decimal::ONE_HUNDRED,
            tax_exempt: false,
            rush_percentage: Decimal::ZERO,
            rush_minimum: Decimal::ZERO,
            province: Province::ON,
        }
    }
}

/// Per-kilometre vehicle rate for direct service
///
/// Rows with a `customer_id` are customer-negotiated; rows without are the
/// base rates. The pipeline picks exactly one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRate {
    /// Vehicle type this rate prices
    pub vehicle_type_id: i32,

    /// Owning customer, None for base rates
    pub customer_id: Option<i64>,

    /// Rate per kilometre
    pub rate: Decimal,
}

/// Address book record, consulted for time-based accessorial exclusions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressBookEntry {
    pub name: String,
    pub no_waiting_time: bool,
}
