//! Fuel surcharge period model
//!
//! Published fuel surcharge percentages are defined over date ranges. The
//! active period for an order is the most recent period containing the
//! order's effective date; when no period contains it, the most recent
//! period overall (highest id) is used.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One published fuel surcharge period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelSurchargePeriod {
    /// Unique identifier
    pub id: i64,

    /// First day the period applies
    pub from_date: NaiveDate,

    /// Last day the period applies
    pub to_date: NaiveDate,

    /// LTL surcharge percentage
    pub ltl_surcharge: Decimal,

    /// FTL surcharge percentage
    pub ftl_surcharge: Decimal,
}

impl FuelSurchargePeriod {
    /// Whether the period contains the given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}

/// Select the active period for an effective date
///
/// Most recent period containing the date wins; with none matching, the
/// most recent period overall (highest id) is returned.
pub fn active_period(
    periods: &[FuelSurchargePeriod],
    date: NaiveDate,
) -> Option<&FuelSurchargePeriod> {
    periods
        .iter()
        .filter(|p| p.contains(date))
        .max_by_key(|p| (p.from_date, p.id))
        .or_else(|| periods.iter().max_by_key(|p| p.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn period(id: i64, from: (i32, u32, u32), to: (i32, u32, u32)) -> FuelSurchargePeriod {
        FuelSurchargePeriod {
            id,
            from_date: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            to_date: NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
            ltl_surcharge: dec!(20),
            ftl_surcharge: dec!(25),
        }
    }

    #[test]
    fn test_active_period_containing_date() {
        let periods = vec![
            period(1, (2024, 1, 1), (2024, 1, 31)),
            period(2, (2024, 2, 1), (2024, 2, 29)),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        assert_eq!(active_period(&periods, date).unwrap().id, 2);
    }

    #[test]
    fn test_active_period_prefers_most_recent_overlap() {
        let periods = vec![
            period(1, (2024, 1, 1), (2024, 3, 31)),
            period(2, (2024, 2, 1), (2024, 2, 29)),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        // later from_date wins among overlapping periods
        assert_eq!(active_period(&periods, date).unwrap().id, 2);
    }

    #[test]
    fn test_active_period_falls_back_to_latest() {
        let periods = vec![
            period(1, (2024, 1, 1), (2024, 1, 31)),
            period(2, (2024, 2, 1), (2024, 2, 29)),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(active_period(&periods, date).unwrap().id, 2);
    }

    #[test]
    fn test_active_period_empty() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(active_period(&[], date).is_none());
    }
}
