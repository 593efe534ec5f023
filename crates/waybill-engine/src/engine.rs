//! Rating engine front door
//!
//! `RatingEngine` wires the calculators together behind one call: totals
//! aggregation, the cached rate sheet lookup, waiting-time resolution
//! against the address book, and the charge pipeline. Customer-scoped
//! reference data (fuel periods, vehicle rates, accessorial definitions
//! and overrides) arrives pre-fetched in a `CustomerContext` so the
//! engine stays free of persistence concerns.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use waybill_core::config::EngineConfig;
use waybill_core::models::{
    AccessorialCharge, AccessorialOverride, ChargeBreakdown, Customer, FormState,
    FuelSurchargePeriod, QuoteRequest, ShipmentQuote, VehicleRate,
};
use waybill_core::traits::{AddressDirectory, CacheService, RateSheetSource};
use waybill_core::EngineResult;

use crate::accessorial::WaitingInputs;
use crate::pipeline::{self, PipelineInput};
use crate::sheet_cache::SheetCacheService;
use crate::{resolver, totals};

/// Customer-scoped reference data for one quote
#[derive(Debug, Clone, Default)]
pub struct CustomerContext {
    pub customer: Customer,
    pub fuel_periods: Vec<FuelSurchargePeriod>,
    pub vehicle_rates: Vec<VehicleRate>,
    /// Shared accessorial definitions
    pub accessorials: Vec<AccessorialCharge>,
    /// Customer override pivot rows, keyed by accessorial id
    pub accessorial_overrides: HashMap<i64, AccessorialOverride>,
}

/// The rating engine
pub struct RatingEngine<S, C, A> {
    sheets: SheetCacheService<S, C>,
    addresses: Arc<A>,
    config: EngineConfig,
}

impl<S, C, A> RatingEngine<S, C, A>
where
    S: RateSheetSource,
    C: CacheService,
    A: AddressDirectory,
{
    pub fn new(source: Arc<S>, cache: Arc<C>, addresses: Arc<A>, config: EngineConfig) -> Self {
        Self {
            sheets: SheetCacheService::new(source, cache, &config),
            addresses,
            config,
        }
    }

    /// Rate a shipment end to end
    pub async fn quote(
        &self,
        request: &QuoteRequest,
        context: &CustomerContext,
    ) -> EngineResult<ShipmentQuote> {
        let totals = totals::order_totals(
            &request.freight_lines,
            context.customer.weight_to_pieces_rule,
        );

        if request.form.no_charges {
            debug!(customer_id = context.customer.id, "no-charges order");
            return Ok(ShipmentQuote {
                totals,
                breakdown: ChargeBreakdown::default(),
            });
        }

        // the rate sheet lookup is skipped entirely for manual rates
        let base_rate = if request.form.manual_charges {
            request.form.freight_rate_amount
        } else {
            let cache = self.sheets.get_or_build(context.customer.id).await?;
            resolver::shipment_rate(
                &cache,
                &totals,
                &request.origin_city,
                &request.destination_city,
                &self.config,
            )
        };

        let waiting = self.resolve_waiting(&request.form).await;
        let accessorials = merge_overrides(&context.accessorials, &context.accessorial_overrides);

        let breakdown = pipeline::compute(&PipelineInput {
            totals: &totals,
            customer: &context.customer,
            form: &request.form,
            base_rate,
            accessorials: &accessorials,
            fuel_periods: &context.fuel_periods,
            vehicle_rates: &context.vehicle_rates,
            waiting: &waiting,
            ship_date: request.ship_date,
            config: &self.config,
        });

        Ok(ShipmentQuote { totals, breakdown })
    }

    /// Drop a customer's cached rate sheets after a rate change
    pub async fn invalidate_rate_sheets(&self, customer_id: i64) -> EngineResult<bool> {
        self.sheets.invalidate(customer_id).await
    }

    /// Waiting-time exclusion flags from the address book
    ///
    /// A directory failure degrades to billing the leg rather than
    /// failing the quote.
    async fn resolve_waiting(&self, form: &FormState) -> WaitingInputs {
        let mut waiting = WaitingInputs {
            pickup_in: form.pickup_time_in.clone(),
            pickup_out: form.pickup_time_out.clone(),
            delivery_in: form.delivery_time_in.clone(),
            delivery_out: form.delivery_time_out.clone(),
            ..Default::default()
        };

        if let Some(name) = form.pickup_address.as_deref() {
            waiting.pickup_no_waiting = match self.addresses.no_waiting_time(name).await {
                Ok(flag) => flag,
                Err(err) => {
                    warn!(address = name, %err, "address book lookup failed");
                    false
                }
            };
        }
        if let Some(name) = form.delivery_address.as_deref() {
            waiting.delivery_no_waiting = match self.addresses.no_waiting_time(name).await {
                Ok(flag) => flag,
                Err(err) => {
                    warn!(address = name, %err, "address book lookup failed");
                    false
                }
            };
        }

        waiting
    }
}

fn merge_overrides(
    definitions: &[AccessorialCharge],
    overrides: &HashMap<i64, AccessorialOverride>,
) -> Vec<AccessorialCharge> {
    definitions
        .iter()
        .map(|charge| {
            let pivot = charge.accessorial_id.and_then(|id| overrides.get(&id));
            charge.with_overrides(pivot)
        })
        .collect()
}
