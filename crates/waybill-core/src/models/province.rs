//! Canadian provinces and the static sales-tax table

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Province or territory of the billing address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Province {
    #[default]
    ON,
    BC,
    AB,
    SK,
    MB,
    QC,
    NB,
    NS,
    PE,
    NL,
    YT,
    NT,
    NU,
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Province {
    /// Parse from a two-letter code or full name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ON" | "ONTARIO" => Some(Province::ON),
            "BC" | "BRITISH COLUMBIA" => Some(Province::BC),
            "AB" | "ALBERTA" => Some(Province::AB),
            "SK" | "SASKATCHEWAN" => Some(Province::SK),
            "MB" | "MANITOBA" => Some(Province::MB),
            "QC" | "QUEBEC" => Some(Province::QC),
            "NB" | "NEW BRUNSWICK" => Some(Province::NB),
            "NS" | "NOVA SCOTIA" => Some(Province::NS),
            "PE" | "PEI" | "PRINCE EDWARD ISLAND" => Some(Province::PE),
            "NL" | "NEWFOUNDLAND AND LABRADOR" => Some(Province::NL),
            "YT" | "YUKON" => Some(Province::YT),
            "NT" | "NORTHWEST TERRITORIES" => Some(Province::NT),
            "NU" | "NUNAVUT" => Some(Province::NU),
            _ => None,
        }
    }

    /// Provincial and federal tax percentages as `(pst, gst)`
    pub fn tax_rates(&self) -> (Decimal, Decimal) {
        match self {
            Province::ON => (dec!(8), dec!(5)),
            Province::BC => (dec!(7), dec!(5)),
            Province::AB => (dec!(0), dec!(5)),
            Province::SK => (dec!(6), dec!(5)),
            Province::MB => (dec!(7), dec!(5)),
            Province::QC => (dec!(9.975), dec!(5)),
            Province::NB | Province::NS | Province::PE | Province::NL => (dec!(10), dec!(5)),
            Province::YT | Province::NT | Province::NU => (dec!(0), dec!(5)),
        }
    }
}
