//! End-to-end quote scenarios against the full engine

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use waybill_cache::MemoryCache;
use waybill_core::config::EngineConfig;
use waybill_core::error::EngineError;
use waybill_core::models::{
    Customer, FormState, FreightLine, FreightType, FuelSurchargePeriod, QuoteRequest, RateBracket,
    RateGroup, RateSheetEntry, ServiceType,
};
use waybill_core::traits::{AddressDirectory, RateSheetSource};
use waybill_engine::{CustomerContext, RatingEngine};

struct StubSheets {
    entries: Vec<RateSheetEntry>,
    calls: AtomicUsize,
}

#[async_trait]
impl RateSheetSource for StubSheets {
    async fn rate_sheets(&self, _customer_id: i64) -> Result<Vec<RateSheetEntry>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }
}

struct StubAddresses {
    no_waiting: Vec<String>,
}

#[async_trait]
impl AddressDirectory for StubAddresses {
    async fn no_waiting_time(&self, name: &str) -> Result<bool, EngineError> {
        Ok(self.no_waiting.iter().any(|n| n == name))
    }
}

fn toronto_skid_sheet() -> RateSheetEntry {
    RateSheetEntry {
        id: 1,
        customer_id: 7,
        group: RateGroup::Skid,
        destination_city: "TORONTO".to_string(),
        min_rate: dec!(50),
        meta: vec![RateBracket {
            name: "1000".to_string(),
            value: dec!(45),
        }],
        ..Default::default()
    }
}

fn engine(
    entries: Vec<RateSheetEntry>,
) -> (
    RatingEngine<StubSheets, MemoryCache, StubAddresses>,
    Arc<StubSheets>,
) {
    let source = Arc::new(StubSheets {
        entries,
        calls: AtomicUsize::new(0),
    });
    let addresses = Arc::new(StubAddresses {
        no_waiting: Vec::new(),
    });
    let engine = RatingEngine::new(
        Arc::clone(&source),
        Arc::new(MemoryCache::new()),
        addresses,
        EngineConfig::default(),
    );
    (engine, source)
}

fn request() -> QuoteRequest {
    QuoteRequest {
        freight_lines: vec![FreightLine {
            freight_type: FreightType::Skid,
            pieces: 1,
            weight: dec!(1200),
            length: dec!(48),
            width: dec!(40),
            height: dec!(60),
            ..Default::default()
        }],
        origin_city: "Mississauga".to_string(),
        destination_city: "Toronto".to_string(),
        ship_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        form: FormState::default(),
    }
}

fn context() -> CustomerContext {
    CustomerContext {
        customer: Customer {
            id: 7,
            name: "Acme Freight".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_single_skid_quote() {
    let (engine, _) = engine(vec![toronto_skid_sheet()]);
    let quote = engine.quote(&request(), &context()).await.unwrap();

    // actual weight dominates the 669.77 volume weight
    assert_eq!(quote.totals.total_chargeable_weight, dec!(1200.00));
    assert_eq!(quote.totals.total_chargeable_pieces, 1);

    // 45 x 1 skid floored to the 50 minimum
    assert_eq!(quote.breakdown.base_freight_rate, dec!(50.00));
    assert_eq!(quote.breakdown.sub_total, dec!(50.00));
    assert_eq!(quote.breakdown.pst, dec!(4.00));
    assert_eq!(quote.breakdown.gst, dec!(2.50));
    assert_eq!(quote.breakdown.grand_total, dec!(56.50));
}

#[tokio::test]
async fn test_no_charges_order() {
    let (engine, source) = engine(vec![toronto_skid_sheet()]);
    let mut request = request();
    request.form.no_charges = true;

    let quote = engine.quote(&request, &context()).await.unwrap();

    // totals still computed, charges all zero, no rate sheet fetch
    assert_eq!(quote.totals.total_actual_weight, dec!(1200.00));
    assert_eq!(quote.breakdown.grand_total, Decimal::ZERO);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rush_with_fuel_surcharge() {
    let (engine, _) = engine(vec![toronto_skid_sheet()]);

    let mut request = request();
    request.form.service_type = ServiceType::Rush;

    let mut context = context();
    context.customer.rush_percentage = dec!(10);
    context.fuel_periods = vec![FuelSurchargePeriod {
        id: 1,
        from_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        to_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        ltl_surcharge: dec!(20),
        ftl_surcharge: dec!(30),
    }];

    let quote = engine.quote(&request, &context).await.unwrap();

    assert_eq!(quote.breakdown.rush_charge, dec!(5.00));
    assert_eq!(quote.breakdown.modified_freight_rate, dec!(55.00));
    // LTL shipment: 20% of 55
    assert_eq!(quote.breakdown.fuel_surcharge, dec!(11.00));
    assert_eq!(quote.breakdown.sub_total, dec!(66.00));
    assert_eq!(quote.breakdown.pst, dec!(5.28));
    assert_eq!(quote.breakdown.gst, dec!(3.30));
    assert_eq!(quote.breakdown.grand_total, dec!(74.58));
}

#[tokio::test]
async fn test_manual_rate_skips_rate_sheets() {
    let (engine, source) = engine(Vec::new());

    let mut request = request();
    request.form.manual_charges = true;
    request.form.freight_rate_amount = dec!(175);

    let quote = engine.quote(&request, &context()).await.unwrap();

    assert_eq!(quote.breakdown.base_freight_rate, dec!(175));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rate_sheet_cache_reused_until_invalidated() {
    let (engine, source) = engine(vec![toronto_skid_sheet()]);
    let request = request();
    let context = context();

    engine.quote(&request, &context).await.unwrap();
    engine.quote(&request, &context).await.unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    assert!(engine.invalidate_rate_sheets(7).await.unwrap());
    engine.quote(&request, &context).await.unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unknown_lane_quotes_zero_rate() {
    let (engine, _) = engine(vec![toronto_skid_sheet()]);

    let mut request = request();
    request.origin_city = "Winnipeg".to_string();
    request.destination_city = "Calgary".to_string();

    let quote = engine.quote(&request, &context()).await.unwrap();
    assert_eq!(quote.breakdown.base_freight_rate, Decimal::ZERO);
    assert_eq!(quote.breakdown.grand_total, Decimal::ZERO);
}

#[tokio::test]
async fn test_accessorial_override_applied() {
    let (engine, _) = engine(vec![toronto_skid_sheet()]);

    let mut request = request();
    request.form.accessorials = vec![waybill_core::models::AccessorialSelection {
        accessorial_id: Some(3),
        is_included: true,
        qty: Decimal::ONE,
    }];

    let mut context = context();
    context.accessorials = vec![waybill_core::models::AccessorialCharge {
        accessorial_id: Some(3),
        rate: dec!(45),
        ..Default::default()
    }];
    let mut overrides = HashMap::new();
    overrides.insert(
        3,
        waybill_core::models::AccessorialOverride {
            rate: Some(dec!(35)),
            ..Default::default()
        },
    );
    context.accessorial_overrides = overrides;

    let quote = engine.quote(&request, &context).await.unwrap();
    assert_eq!(quote.breakdown.accessorial_total, dec!(35.00));
    assert_eq!(quote.breakdown.sub_total, dec!(85.00));
}
