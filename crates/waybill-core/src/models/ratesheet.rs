//! Rate sheet models
//!
//! A rate sheet row is one negotiated rate for a customer and destination
//! city, carrying an ordered set of bracket/rate pairs. Rows are consumed
//! only during the per-customer cache build.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rate group enumeration
///
/// Raw rows carry `Skid` or `Weight`; `Skid2` is a synthetic bucket the
/// cache build duplicates skid-by-weight sheets into, so those sheets are
/// queryable by weight bracket instead of piece count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateGroup {
    #[default]
    Skid,
    Weight,
    Skid2,
}

impl fmt::Display for RateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateGroup::Skid => write!(f, "skid"),
            RateGroup::Weight => write!(f, "weight"),
            RateGroup::Skid2 => write!(f, "skid2"),
        }
    }
}

/// Internal/External flag
///
/// Marks whether an entry represents an externally quoted or internally
/// negotiated rate; used as a tie-break during return-rate resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum RateScope {
    #[default]
    Internal,
    External,
}

/// One named rate tier within a rate sheet
///
/// Bracket names are either the literal `ltl`, a numeric weight threshold,
/// or a piece-count threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBracket {
    pub name: String,
    pub value: Decimal,
}

impl RateBracket {
    /// Numeric threshold of the bracket name, if any
    pub fn numeric_name(&self) -> Option<Decimal> {
        self.name.trim().parse::<Decimal>().ok()
    }
}

/// One negotiated rate sheet row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSheetEntry {
    /// Unique identifier
    pub id: i64,

    /// Owning customer
    pub customer_id: i64,

    /// Rate group (`Skid` or `Weight` on raw rows)
    pub group: RateGroup,

    /// Skid rates billed by weight instead of piece count
    pub skid_by_weight: bool,

    /// Destination city this sheet prices
    pub destination_city: String,

    /// Pairs an origin row with its corresponding return row
    pub rate_code: Option<String>,

    /// Internal/External tie-break flag
    pub scope: RateScope,

    /// Higher wins within a city
    pub priority_sequence: i32,

    /// Minimum rate floor
    pub min_rate: Decimal,

    /// LTL rate column; prepended to `meta` as an implicit bracket when set
    pub ltl: Option<Decimal>,

    /// Ordered bracket/rate pairs
    pub meta: Vec<RateBracket>,
}

impl RateSheetEntry {
    /// Destination city normalized for matching
    pub fn normalized_city(&self) -> String {
        self.destination_city.trim().to_uppercase()
    }

    /// Bracket pairs with the implicit `ltl` bracket prepended when the
    /// ltl column is set
    pub fn brackets(&self) -> Vec<RateBracket> {
        let mut brackets = Vec::with_capacity(self.meta.len() + 1);
        if let Some(ltl) = self.ltl {
            brackets.push(RateBracket {
                name: "ltl".to_string(),
                value: ltl,
            });
        }
        brackets.extend(self.meta.iter().cloned());
        brackets
    }
}

impl Default for RateSheetEntry {
    fn default() -> Self {
        Self {
            id: 0,
            customer_id: 0,
            group: RateGroup::Skid,
            skid_by_weight: false,
            destination_city: String::new(),
            rate_code: None,
            scope: RateScope::Internal,
            priority_sequence: 0,
            min_rate: Decimal::ZERO,
            ltl: None,
            meta: Vec::new(),
        }
    }
}
