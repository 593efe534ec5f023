//! Order form state and charge breakdown
//!
//! `FormState` carries everything the dispatcher entered on the order
//! form that affects charges; defaults are applied at construction, not
//! scattered across call sites.

use crate::models::accessorial::AccessorialSelection;
use crate::models::freight::FreightLine;
use crate::models::totals::ShipmentTotals;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service level selected on the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Regular,
    Rush,
    Direct,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Regular => write!(f, "regular"),
            ServiceType::Rush => write!(f, "rush"),
            ServiceType::Direct => write!(f, "direct"),
        }
    }
}

/// A flat extra charge line entered on the order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceChargeLine {
    pub qty: Decimal,
    pub amount: Decimal,
}

/// Typed order form state consumed by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormState {
    /// Service level
    pub service_type: ServiceType,

    /// All charges forced to zero
    pub no_charges: bool,

    /// Freight rate entered manually, skipping the resolver
    pub manual_charges: bool,

    /// Manual freight rate amount (used with `manual_charges`)
    pub freight_rate_amount: Decimal,

    /// Fuel surcharge entered manually, skipping the computation
    pub manual_fuel_surcharges: bool,

    /// Manual fuel surcharge amount (used with `manual_fuel_surcharges`)
    pub fuel_surcharge_amount: Decimal,

    /// Kilometres for direct service
    pub direct_km: Decimal,

    /// Vehicle types selected for direct service
    pub direct_vehicle_ids: Vec<i32>,

    /// Accessorial selections on the order
    pub accessorials: Vec<AccessorialSelection>,

    /// Flat extra charge lines
    pub service_charges: Vec<ServiceChargeLine>,

    /// Pickup address name, for waiting-time exclusion lookups
    pub pickup_address: Option<String>,

    /// Delivery address name, for waiting-time exclusion lookups
    pub delivery_address: Option<String>,

    /// Pickup arrival time, `HH:MM` ("00:00" means not recorded)
    pub pickup_time_in: Option<String>,

    /// Pickup departure time
    pub pickup_time_out: Option<String>,

    /// Delivery arrival time
    pub delivery_time_in: Option<String>,

    /// Delivery departure time
    pub delivery_time_out: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            service_type: ServiceType::Regular,
            no_charges: false,
            manual_charges: false,
            freight_rate_amount: Decimal::ZERO,
            manual_fuel_surcharges: false,
            fuel_surcharge_amount: Decimal::ZERO,
            direct_km: Decimal::ZERO,
            direct_vehicle_ids: Vec::new(),
            accessorials: Vec::new(),
            service_charges: Vec::new(),
            pickup_address: None,
            delivery_address: None,
            pickup_time_in: None,
            pickup_time_out: None,
            delivery_time_in: None,
            delivery_time_out: None,
        }
    }
}

/// The shipment to be rated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub freight_lines: Vec<FreightLine>,
    pub origin_city: String,
    pub destination_city: String,
    /// Effective date for fuel surcharge period selection
    pub ship_date: NaiveDate,
    pub form: FormState,
}

/// Final invoice breakdown returned to the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    /// Resolver output (or the manual override)
    pub base_freight_rate: Decimal,

    /// Additive rush markup
    pub rush_charge: Decimal,

    /// Direct service charge that replaced the freight rate
    pub direct_charge: Decimal,

    /// Freight rate after service charges
    pub modified_freight_rate: Decimal,

    /// Fuel surcharge
    pub fuel_surcharge: Decimal,

    /// All accessorial and flat service charges
    pub accessorial_total: Decimal,

    /// Rate + fuel + accessorials
    pub sub_total: Decimal,

    /// Provincial tax
    pub pst: Decimal,

    /// Federal tax
    pub gst: Decimal,

    /// Invoice total
    pub grand_total: Decimal,
}

/// Engine output: totals plus the charge breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentQuote {
    pub totals: ShipmentTotals,
    pub breakdown: ChargeBreakdown,
}
