//! # Quote Calculation
//!
//! Aggregates the selected parts and overhead into a build cost, applies the
//! area-based profit formula, and rounds the sell price up to the next $10.
//!
//! ## Pricing Formula
//!
//! ```text
//! base material = extrusions + steel + donor kit + plasma unit + misc electronics
//! total cost    = base material × (1 + misc% / 100)
//! profit target = base profit + nominal area (ft²) × profit per ft²
//! sell price    = ceil((total cost + profit target) / 10) × 10
//! profit        = sell price − total cost
//! ```
//!
//! Profit is priced on the catalog's nominal area, not the (usually larger)
//! area the chosen stock lengths actually allow.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::machines::MachineConfig;
//! use quote_core::pricing::PriceTable;
//! use quote_core::quote::compute_quote;
//!
//! let config = MachineConfig::find("2 x 2 ft").unwrap();
//! let quote = compute_quote(&config, &PriceTable::default());
//! assert_eq!(quote.sell_price, 710.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::QuoteWarning;
use crate::machines::MachineConfig;
use crate::parts::{select_extrusion_parts, select_steel_parts, PartLine, SteelLine};
use crate::pricing::PriceTable;
use crate::units::{Feet, Inches};

/// Fixed cost for miscellaneous electronics on every machine
pub const MISC_ELECTRONICS_COST: f64 = 30.0;

/// Sell prices are rounded up to a multiple of this
pub const PRICE_ROUNDING_INCREMENT: f64 = 10.0;

/// Headline figures for one machine configuration.
///
/// ## JSON Example
///
/// ```json
/// {
///   "config_name": "2 x 2 ft",
///   "area_sqft": 4.0,
///   "total_cost": 279.28125,
///   "profit": 430.71875,
///   "sell_price": 710.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Catalog name of the machine
    pub config_name: String,
    /// Nominal working area (ft²)
    pub area_sqft: f64,
    /// Build cost including misc add-on
    pub total_cost: f64,
    /// Profit after rounding the sell price
    pub profit: f64,
    /// Customer price, always a multiple of 10
    pub sell_price: f64,
}

impl QuoteResult {
    /// Profit as a percentage of the sell price
    pub fn margin_pct(&self) -> f64 {
        margin_pct(self.profit, self.sell_price)
    }
}

/// Every figure behind a quote, as shown on the full quote screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub config_name: String,

    /// Extrusion parts list
    pub extrusion_parts: Vec<PartLine>,
    /// Steel frame parts list
    pub steel_parts: Vec<SteelLine>,
    /// Total feet of steel tube
    pub total_steel_ft: f64,

    pub extrusion_cost: f64,
    pub steel_cost: f64,
    pub donor_cost: f64,
    pub misc_electronics_cost: f64,
    pub plasma_unit_cost: f64,
    /// Sum of the material lines above
    pub base_material_cost: f64,
    /// Misc % surcharge on base material
    pub misc_cost: f64,
    pub total_cost: f64,

    /// Nominal working area used for pricing (ft²)
    pub area_sqft: f64,
    /// base profit + area × profit per ft²
    pub profit_target: f64,
    /// total cost + profit target, before rounding
    pub raw_sell_price: f64,
    pub sell_price: f64,
    /// sell price − total cost
    pub profit: f64,
    pub margin_pct: f64,

    /// Working area the chosen stock allows (in)
    pub actual_x_work_in: f64,
    pub actual_y_work_in: f64,
    /// Same, in feet rounded to two decimals
    pub actual_x_ft: f64,
    pub actual_y_ft: f64,

    /// Non-fatal issues found while building the quote
    pub warnings: Vec<QuoteWarning>,
}

impl QuoteBreakdown {
    /// Reduce to the headline figures
    pub fn summary(&self) -> QuoteResult {
        QuoteResult {
            config_name: self.config_name.clone(),
            area_sqft: self.area_sqft,
            total_cost: self.total_cost,
            profit: self.profit,
            sell_price: self.sell_price,
        }
    }
}

/// Round a price up to the next multiple of 10.
///
/// Values already on a multiple of 10 are unchanged.
pub fn round_up_to_ten(value: f64) -> f64 {
    (value / PRICE_ROUNDING_INCREMENT).ceil() * PRICE_ROUNDING_INCREMENT
}

/// Profit margin in percent, or 0 when there is no sell price.
pub fn margin_pct(profit: f64, sell_price: f64) -> f64 {
    if sell_price > 0.0 {
        profit / sell_price * 100.0
    } else {
        0.0
    }
}

/// Build the full quote for one configuration.
///
/// # Arguments
///
/// * `config` - Machine configuration from the catalog
/// * `prices` - Prices for this run
///
/// Never fails; pricing gaps are reported in [`QuoteBreakdown::warnings`].
pub fn build_quote(config: &MachineConfig, prices: &PriceTable) -> QuoteBreakdown {
    let extrusions = select_extrusion_parts(config.x_work_in, config.y_work_in, prices);
    let steel = select_steel_parts(config.x_work_in, config.y_work_in, prices);

    let base_material_cost = extrusions.total_cost
        + steel.total_cost
        + prices.donor_cost
        + prices.plasma_unit_cost
        + MISC_ELECTRONICS_COST;
    let misc_cost = base_material_cost * (prices.misc_addon_pct / 100.0);
    let total_cost = base_material_cost + misc_cost;

    let area_sqft = config.nominal_area_sqft();
    let profit_target = prices.base_profit + area_sqft * prices.profit_per_sqft;
    let raw_sell_price = total_cost + profit_target;
    let sell_price = round_up_to_ten(raw_sell_price);
    let profit = sell_price - total_cost;

    debug!(
        config = config.name,
        total_cost,
        raw_sell_price,
        sell_price,
        "computed quote"
    );

    QuoteBreakdown {
        config_name: config.name.to_string(),
        extrusion_parts: extrusions.parts,
        steel_parts: steel.parts,
        total_steel_ft: steel.total_length_ft,
        extrusion_cost: extrusions.total_cost,
        steel_cost: steel.total_cost,
        donor_cost: prices.donor_cost,
        misc_electronics_cost: MISC_ELECTRONICS_COST,
        plasma_unit_cost: prices.plasma_unit_cost,
        base_material_cost,
        misc_cost,
        total_cost,
        area_sqft,
        profit_target,
        raw_sell_price,
        sell_price,
        profit,
        margin_pct: margin_pct(profit, sell_price),
        actual_x_work_in: extrusions.actual_x_work_in,
        actual_y_work_in: extrusions.actual_y_work_in,
        actual_x_ft: Feet::from(Inches(extrusions.actual_x_work_in)).rounded().value(),
        actual_y_ft: Feet::from(Inches(extrusions.actual_y_work_in)).rounded().value(),
        warnings: extrusions.warnings,
    }
}

/// Compute the headline quote for one configuration.
pub fn compute_quote(config: &MachineConfig, prices: &PriceTable) -> QuoteResult {
    build_quote(config, prices).summary()
}

/// Quote every catalog configuration with the same prices.
///
/// Results are ordered by nominal area, smallest first. Configurations with
/// equal area keep catalog order.
pub fn compare_all_configs(prices: &PriceTable) -> Vec<QuoteResult> {
    let mut results: Vec<QuoteResult> = MachineConfig::ALL
        .iter()
        .map(|config| compute_quote(config, prices))
        .collect();
    results.sort_by(|a, b| a.area_sqft.total_cmp(&b.area_sqft));
    results
}

/// Price spread across a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub lowest_price: f64,
    pub highest_price: f64,
    pub average_price: f64,
}

impl ComparisonSummary {
    /// Summarize sell prices; `None` for an empty run
    pub fn from_results(results: &[QuoteResult]) -> Option<ComparisonSummary> {
        if results.is_empty() {
            return None;
        }
        let prices = results.iter().map(|r| r.sell_price);
        let lowest_price = prices.clone().fold(f64::INFINITY, f64::min);
        let highest_price = prices.clone().fold(f64::NEG_INFINITY, f64::max);
        let average_price = prices.sum::<f64>() / results.len() as f64;
        Some(ComparisonSummary {
            lowest_price,
            highest_price,
            average_price,
        })
    }
}
