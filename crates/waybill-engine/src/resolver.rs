//! Directional rate resolution
//!
//! Resolves a shipment's base freight rate from the per-customer cache:
//!
//! - Bracket selection (piece-count brackets for skid sheets, the weight
//!   ladder for weight and skid2 sheets)
//! - Forward lookup at the origin city with a paired return sheet at the
//!   destination matched by rate code, taking the higher of the two
//! - Reverse lookup mirroring the forward pass (skid buckets only)
//! - One-sided sheets standing on their own when no pairing exists
//! - Cross-bucket compensation when one bucket of a mixed shipment
//!   resolves to nothing

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use waybill_core::config::EngineConfig;
use waybill_core::models::{RateGroup, RateScope, ShipmentTotals};

use crate::sheet_cache::{CachedSheet, RateSheetCache};

/// Weight bracket name for a chargeable weight
///
/// The ladder is inclusive on the lower bound of each thousand band and
/// deliberately leaves [999, 1000) falling through to `ltl`, matching the
/// historical rate sheet layout.
pub fn weight_bracket(weight: Decimal) -> &'static str {
    if weight > Decimal::ONE && weight < dec!(499) {
        "ltl"
    } else if weight >= dec!(499) && weight < dec!(999) {
        "500"
    } else if weight >= dec!(1000) && weight < dec!(2000) {
        "1000"
    } else if weight >= dec!(2000) && weight < dec!(3000) {
        "2000"
    } else if weight >= dec!(3000) && weight < dec!(4000) {
        "3000"
    } else if weight >= dec!(4000) && weight < dec!(5000) {
        "4000"
    } else if weight >= dec!(5000) {
        "5000"
    } else {
        "ltl"
    }
}

/// Bracket name to resolve for a group
///
/// Skid sheets are keyed by piece count: the largest numeric bracket not
/// exceeding the chargeable piece count wins, a shipment below the
/// smallest bracket takes the smallest, and a customer with no numeric
/// skid brackets falls back to the configured default. Weight and skid2
/// sheets always use the weight ladder.
pub fn bracket_for(
    cache: &RateSheetCache,
    group: RateGroup,
    pieces: i64,
    weight: Decimal,
    default_bracket: &str,
) -> String {
    match group {
        RateGroup::Skid => {
            let mut numeric: Vec<Decimal> = cache
                .available_brackets(group)
                .iter()
                .filter_map(|name| name.trim().parse::<Decimal>().ok())
                .collect();
            numeric.sort();

            if numeric.is_empty() {
                return default_bracket.to_string();
            }

            let pieces = Decimal::from(pieces);
            let chosen = numeric
                .iter()
                .rev()
                .find(|threshold| **threshold <= pieces)
                .unwrap_or(&numeric[0]);
            chosen.normalize().to_string()
        }
        RateGroup::Weight | RateGroup::Skid2 => weight_bracket(weight).to_string(),
    }
}

/// Extend a per-bracket rate to the shipment quantity and apply the floor
fn final_rate(
    sheet: &CachedSheet,
    raw: Decimal,
    pieces: i64,
    weight: Decimal,
    group: RateGroup,
) -> Decimal {
    let extended = if group == RateGroup::Skid && !sheet.skid_by_weight {
        raw * Decimal::from(pieces)
    } else {
        // weight-driven sheets price per hundredweight
        raw * weight / Decimal::ONE_HUNDRED
    };
    extended.max(sheet.min_rate)
}

/// Rate one sheet yields for a bracket
///
/// A sheet that carries the bracket with a positive value extends it to
/// the shipment; a sheet without it still answers with its minimum rate
/// when one is set.
fn sheet_rate(
    sheet: &CachedSheet,
    bracket: &str,
    pieces: i64,
    weight: Decimal,
    group: RateGroup,
) -> Decimal {
    match sheet.bracket_value(bracket) {
        Some(value) if value > Decimal::ZERO => final_rate(sheet, value, pieces, weight, group),
        _ if sheet.min_rate > Decimal::ZERO => sheet.min_rate,
        _ => Decimal::ZERO,
    }
}

/// Highest-priority sheet at a city that yields a rate
///
/// Falls back to the highest-priority sheet even when it yields zero, so
/// the caller can still pair on its rate code.
fn lookup_at<'a>(
    cache: &'a RateSheetCache,
    group: RateGroup,
    city: &str,
    bracket: &str,
    pieces: i64,
    weight: Decimal,
) -> Option<(Decimal, &'a CachedSheet)> {
    let sheets = cache.entries(group, city);
    let mut first: Option<(Decimal, &CachedSheet)> = None;

    for sheet in sheets {
        let rate = sheet_rate(sheet, bracket, pieces, weight, group);
        if rate > Decimal::ZERO {
            return Some((rate, sheet));
        }
        if first.is_none() {
            first = Some((rate, sheet));
        }
    }

    first
}

/// Paired return rate at a city for a rate code
///
/// Candidates sharing the code are preferred external-first, then by
/// priority. Returns whether any paired sheet exists alongside the rate
/// the best candidate yields.
fn paired_return(
    cache: &RateSheetCache,
    group: RateGroup,
    city: &str,
    rate_code: &str,
    bracket: &str,
    pieces: i64,
    weight: Decimal,
) -> (bool, Decimal) {
    let mut candidates: Vec<&CachedSheet> = cache
        .entries(group, city)
        .into_iter()
        .filter(|sheet| {
            sheet
                .rate_code
                .as_deref()
                .is_some_and(|code| code.eq_ignore_ascii_case(rate_code))
        })
        .collect();

    if candidates.is_empty() {
        return (false, Decimal::ZERO);
    }

    candidates.sort_by_key(|sheet| sheet.scope != RateScope::External);

    for sheet in &candidates {
        let rate = sheet_rate(sheet, bracket, pieces, weight, group);
        if rate > Decimal::ZERO {
            return (true, rate);
        }
    }

    (true, Decimal::ZERO)
}

fn normalize_city(city: &str) -> String {
    city.trim().to_uppercase()
}

/// Resolve the rate for one bucket of a shipment
///
/// Skid lookups retarget to the synthetic skid2 group when the customer
/// has any skid-by-weight sheet; the weight group never takes the reverse
/// pass, so an unpaired weight sheet at the destination yields nothing.
pub fn find_rate(
    cache: &RateSheetCache,
    group: RateGroup,
    origin: &str,
    destination: &str,
    pieces: i64,
    weight: Decimal,
    default_bracket: &str,
) -> Decimal {
    let group = if group == RateGroup::Skid && cache.has_skid_by_weight() {
        RateGroup::Skid2
    } else {
        group
    };

    let origin = normalize_city(origin);
    let destination = normalize_city(destination);
    let bracket = bracket_for(cache, group, pieces, weight, default_bracket);
    debug!(%group, %origin, %destination, %bracket, "resolving rate");

    let forward = lookup_at(cache, group, &origin, &bracket, pieces, weight);
    if let Some((fwd_rate, sheet)) = forward {
        if let Some(code) = sheet.rate_code.as_deref() {
            let (paired, ret_rate) =
                paired_return(cache, group, &destination, code, &bracket, pieces, weight);
            if paired {
                return fwd_rate.max(ret_rate);
            }
        }
    }

    if group == RateGroup::Weight {
        return forward.map(|(rate, _)| rate).unwrap_or(Decimal::ZERO);
    }

    let backward = lookup_at(cache, group, &destination, &bracket, pieces, weight);
    if let Some((bwd_rate, sheet)) = backward {
        if let Some(code) = sheet.rate_code.as_deref() {
            let (paired, ret_rate) =
                paired_return(cache, group, &origin, code, &bracket, pieces, weight);
            if paired {
                return bwd_rate.max(ret_rate);
            }
        }
    }

    // one-sided sheets stand on their own
    if let Some((rate, _)) = forward {
        return rate;
    }
    if let Some((rate, _)) = backward {
        return rate;
    }

    Decimal::ZERO
}

/// Base freight rate for the whole shipment
///
/// Each freight bucket resolves independently; a bucket that resolves to
/// effectively nothing borrows from the other, with the skid side taking
/// the weight rate spread per piece and the weight side taking the skid
/// rate multiplied back out.
pub fn shipment_rate(
    cache: &RateSheetCache,
    totals: &ShipmentTotals,
    origin: &str,
    destination: &str,
    config: &EngineConfig,
) -> Decimal {
    let mut skid_rate = Decimal::ZERO;
    let mut weight_rate = Decimal::ZERO;

    if totals.has_skid_type {
        skid_rate = find_rate(
            cache,
            RateGroup::Skid,
            origin,
            destination,
            totals.total_chargeable_pieces,
            totals.skid_weight,
            &config.default_bracket,
        );
    }
    if totals.has_weight_type {
        weight_rate = find_rate(
            cache,
            RateGroup::Weight,
            origin,
            destination,
            totals.total_pieces,
            totals.box_weight,
            &config.default_bracket,
        );
    }

    // compensation reads the original lookup values, not each other's
    // adjusted results
    let looked_up_skid = skid_rate;
    let looked_up_weight = weight_rate;
    let pieces = Decimal::from(totals.total_chargeable_pieces);

    if totals.has_skid_type && skid_rate < Decimal::ONE && pieces > Decimal::ZERO {
        skid_rate = looked_up_weight / pieces;
    }
    if totals.has_weight_type && weight_rate < Decimal::ONE {
        weight_rate = looked_up_skid * pieces;
    }

    (skid_rate + weight_rate).round_dp(2)
}
