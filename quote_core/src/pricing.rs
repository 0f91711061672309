//! # Pricing Inputs
//!
//! Stock lengths, extrusion profiles, and the [`PriceTable`] that every quote
//! is computed from.
//!
//! ## JSON Example
//!
//! The 2040 price map is keyed by stock length in millimeters:
//!
//! ```json
//! {
//!   "price_2020": 7.5,
//!   "price_2040_by_length": {
//!     "400": 6.75, "600": 8.75, "800": 12.5,
//!     "1000": 12.5, "1220": 15.0, "1500": 19.75
//!   },
//!   "steel_price_per_ft": 5.75,
//!   "donor_cost": 150.0,
//!   "misc_addon_pct": 0.0,
//!   "base_profit": 250.0,
//!   "profit_per_sqft": 45.0,
//!   "plasma_unit_cost": 0.0
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreResult, QuoteError};
use crate::units::{Inches, Millimeters};

/// Standard extrusion stock length.
///
/// Variants are declared in ascending order; `Ord` follows length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StandardLength {
    #[serde(rename = "400")]
    L400,
    #[serde(rename = "600")]
    L600,
    #[serde(rename = "800")]
    L800,
    #[serde(rename = "1000")]
    L1000,
    #[serde(rename = "1220")]
    L1220,
    #[serde(rename = "1500")]
    L1500,
}

impl StandardLength {
    /// All stock lengths, strictly ascending
    pub const ALL: [StandardLength; 6] = [
        StandardLength::L400,
        StandardLength::L600,
        StandardLength::L800,
        StandardLength::L1000,
        StandardLength::L1220,
        StandardLength::L1500,
    ];

    /// Longest available stock
    pub const LONGEST: StandardLength = StandardLength::L1500;

    /// Length in millimeters
    pub fn mm(&self) -> u32 {
        match self {
            StandardLength::L400 => 400,
            StandardLength::L600 => 600,
            StandardLength::L800 => 800,
            StandardLength::L1000 => 1000,
            StandardLength::L1220 => 1220,
            StandardLength::L1500 => 1500,
        }
    }

    /// Length in inches
    pub fn inches(&self) -> f64 {
        Inches::from(Millimeters(f64::from(self.mm()))).value()
    }
}

impl fmt::Display for StandardLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm", self.mm())
    }
}

/// Aluminum extrusion profile family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    /// 20 x 20 mm V-slot
    #[serde(rename = "2020")]
    P2020,
    /// 20 x 40 mm V-slot, used for long gantry spans
    #[serde(rename = "2040")]
    P2040,
}

impl Profile {
    /// Display name (e.g., "2040")
    pub fn display_name(&self) -> &'static str {
        match self {
            Profile::P2020 => "2020",
            Profile::P2040 => "2040",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Every price a quote run depends on.
///
/// Built once per request by the presentation layer and passed by reference
/// into the calculator. Nothing in here is mutated during a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    /// Price per piece of 2020 extrusion (same at every stock length)
    pub price_2020: f64,

    /// Price per piece of 2040 extrusion, by stock length
    pub price_2040_by_length: BTreeMap<StandardLength, f64>,

    /// Steel tube price per foot
    pub steel_price_per_ft: f64,

    /// Donor CNC kit (motors, electronics, wiring, plates)
    pub donor_cost: f64,

    /// Surcharge on material cost for bolts, nuts, paint, etc. (percent)
    pub misc_addon_pct: f64,

    /// Fixed profit added to every build
    pub base_profit: f64,

    /// Additional profit per square foot of nominal working area
    pub profit_per_sqft: f64,

    /// Cost of the selected plasma unit, zero when none is included
    #[serde(default)]
    pub plasma_unit_cost: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable {
            price_2020: 7.50,
            price_2040_by_length: default_2040_prices(),
            steel_price_per_ft: 5.75,
            donor_cost: 150.0,
            misc_addon_pct: 0.0,
            base_profit: 250.0,
            profit_per_sqft: 45.0,
            plasma_unit_cost: 0.0,
        }
    }
}

/// Stock 2040 prices per piece
pub fn default_2040_prices() -> BTreeMap<StandardLength, f64> {
    BTreeMap::from([
        (StandardLength::L400, 6.75),
        (StandardLength::L600, 8.75),
        (StandardLength::L800, 12.50),
        (StandardLength::L1000, 12.50),
        (StandardLength::L1220, 15.00),
        (StandardLength::L1500, 19.75),
    ])
}

impl PriceTable {
    /// Return a copy with the plasma unit cost set
    pub fn with_plasma_unit_cost(mut self, cost: f64) -> Self {
        self.plasma_unit_cost = cost;
        self
    }

    /// 2040 price for a stock length, if one is configured
    pub fn price_2040(&self, length: StandardLength) -> Option<f64> {
        self.price_2040_by_length.get(&length).copied()
    }

    /// Validate every price.
    ///
    /// All numeric fields must be finite and non-negative, and every standard
    /// length needs a 2040 price. Calculations do not call this themselves;
    /// an unvalidated table still quotes, it just reports warnings.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("price_2020", self.price_2020),
            ("steel_price_per_ft", self.steel_price_per_ft),
            ("donor_cost", self.donor_cost),
            ("misc_addon_pct", self.misc_addon_pct),
            ("base_profit", self.base_profit),
            ("profit_per_sqft", self.profit_per_sqft),
            ("plasma_unit_cost", self.plasma_unit_cost),
        ];
        for (field, value) in fields {
            check_non_negative(field, value)?;
        }

        for length in StandardLength::ALL {
            match self.price_2040(length) {
                Some(price) => {
                    check_non_negative(&format!("price_2040_by_length.{}", length.mm()), price)?
                }
                None => {
                    return Err(QuoteError::missing_field(format!(
                        "price_2040_by_length.{}",
                        length.mm()
                    )))
                }
            }
        }

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::invalid_input(
            field,
            value.to_string(),
            "Price must be a finite, non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_lengths_strictly_ascending() {
        for pair in StandardLength::ALL.windows(2) {
            assert!(pair[0].mm() < pair[1].mm());
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(StandardLength::ALL.last(), Some(&StandardLength::LONGEST));
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(PriceTable::default().validate().is_ok());
    }

    #[test]
    fn test_missing_2040_length_fails_validation() {
        let mut prices = PriceTable::default();
        prices.price_2040_by_length.remove(&StandardLength::L800);
        let err = prices.validate().unwrap_err();
        assert_eq!(err, QuoteError::missing_field("price_2040_by_length.800"));
    }

    #[test]
    fn test_negative_price_fails_validation() {
        let prices = PriceTable {
            donor_cost: -1.0,
            ..PriceTable::default()
        };
        let err = prices.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_nan_fails_validation() {
        let prices = PriceTable::default().with_plasma_unit_cost(f64::NAN);
        assert!(prices.validate().is_err());
    }

    #[test]
    fn test_json_keys_are_millimeters() {
        let json = serde_json::to_string(&PriceTable::default()).unwrap();
        assert!(json.contains("\"1220\":15.0"));
        assert!(json.contains("\"400\":6.75"));

        let roundtrip: PriceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, PriceTable::default());
    }

    #[test]
    fn test_plasma_unit_cost_optional_in_json() {
        let json = r#"{
            "price_2020": 7.5,
            "price_2040_by_length": {"400": 6.75},
            "steel_price_per_ft": 5.75,
            "donor_cost": 150.0,
            "misc_addon_pct": 0.0,
            "base_profit": 250.0,
            "profit_per_sqft": 45.0
        }"#;
        let prices: PriceTable = serde_json::from_str(json).unwrap();
        assert_eq!(prices.plasma_unit_cost, 0.0);
        assert_eq!(prices.price_2040(StandardLength::L400), Some(6.75));
        assert_eq!(prices.price_2040(StandardLength::L600), None);
    }
}
