//! `prices` command - write or show the price table

use std::path::{Path, PathBuf};

use quote_core::errors::{CoreResult, QuoteError};
use quote_core::file_io::save_price_table;
use quote_core::pdf::format_currency;
use quote_core::pricing::{PriceTable, StandardLength};

use crate::args::{GlobalOpts, PricesCommands};
use crate::commands::{display, print_json, prices_with_plasma_unit};

/// Written by `prices init` when `--prices` is not given
pub const DEFAULT_PRICES_FILE: &str = "prices.json";

pub fn run(cmd: PricesCommands, global: &GlobalOpts) -> CoreResult<()> {
    match cmd {
        PricesCommands::Init { force } => {
            let path = global
                .prices
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRICES_FILE));
            init(&path, force)?;
            println!("Wrote default prices to {}", display(&path));
            Ok(())
        }
        PricesCommands::Show => {
            let prices = prices_with_plasma_unit(global)?;
            if global.json {
                return print_json(&prices);
            }
            print!("{}", describe(&prices));
            Ok(())
        }
    }
}

fn init(path: &Path, force: bool) -> CoreResult<()> {
    if path.exists() && !force {
        return Err(QuoteError::file_error(
            "write",
            display(path),
            "file already exists (use --force to overwrite)",
        ));
    }
    save_price_table(&PriceTable::default(), path)
}

fn describe(prices: &PriceTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("2020 extrusion (any length): {}\n", format_currency(prices.price_2020)));
    out.push_str("2040 extrusion:\n");
    for length in StandardLength::ALL {
        let price = prices
            .price_2040(length)
            .map(format_currency)
            .unwrap_or_else(|| "missing".to_string());
        out.push_str(&format!("  {:>4} mm: {}\n", length.mm(), price));
    }
    out.push_str(&format!("Steel per foot:   {}\n", format_currency(prices.steel_price_per_ft)));
    out.push_str(&format!("Donor kit:        {}\n", format_currency(prices.donor_cost)));
    out.push_str(&format!("Plasma unit:      {}\n", format_currency(prices.plasma_unit_cost)));
    out.push_str(&format!("Misc add-on:      {:.1}%\n", prices.misc_addon_pct));
    out.push_str(&format!("Base profit:      {}\n", format_currency(prices.base_profit)));
    out.push_str(&format!("Profit per ft²:   {}\n", format_currency(prices.profit_per_sqft)));
    out
}
