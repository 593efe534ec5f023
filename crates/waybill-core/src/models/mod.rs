//! Domain models for the Waybill rating engine

pub mod accessorial;
pub mod customer;
pub mod freight;
pub mod fuel;
pub mod order;
pub mod province;
pub mod ratesheet;
pub mod totals;

pub use accessorial::{
    AccessorialCharge, AccessorialOverride, AccessorialSelection, AccessorialType, AmountType,
    TimeUnit,
};
pub use customer::{AddressBookEntry, Customer, VehicleRate};
pub use freight::{DimensionUnit, FreightLine, FreightType, NormalizedFreight, WeightUnit};
pub use fuel::{active_period, FuelSurchargePeriod};
pub use order::{
    ChargeBreakdown, FormState, QuoteRequest, ServiceChargeLine, ServiceType, ShipmentQuote,
};
pub use province::Province;
pub use ratesheet::{RateBracket, RateGroup, RateScope, RateSheetEntry};
pub use totals::ShipmentTotals;
