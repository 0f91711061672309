//! Subcommand handlers and the setup they share

pub mod compare;
pub mod configs;
pub mod prices;
pub mod quote;
pub mod units;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use quote_core::errors::{CoreResult, QuoteError, QuoteWarning};
use quote_core::file_io::{self, JsonFileStore};
use quote_core::plasma_units::PlasmaUnitCatalog;
use quote_core::pricing::PriceTable;

use crate::args::GlobalOpts;

/// Price table for this run: the `--prices` file if given, built-in
/// defaults otherwise. Either way the table is validated.
pub fn load_prices(global: &GlobalOpts) -> CoreResult<PriceTable> {
    let prices = match &global.prices {
        Some(path) => {
            debug!(path = %path.display(), "loading price table");
            file_io::load_price_table(path)?
        }
        None => PriceTable::default(),
    };
    prices.validate()?;
    Ok(prices)
}

/// Open the plasma unit list, reporting a load failure on stderr.
pub fn open_catalog(global: &GlobalOpts) -> PlasmaUnitCatalog<JsonFileStore> {
    let (catalog, warning) = PlasmaUnitCatalog::open(JsonFileStore::new(&global.units_file));
    if let Some(w) = warning {
        print_warning(&w);
    }
    catalog
}

/// Price table with the `--plasma-unit` selection folded in.
pub fn prices_with_plasma_unit(global: &GlobalOpts) -> CoreResult<PriceTable> {
    let prices = load_prices(global)?;
    if global.plasma_unit.is_none() {
        return Ok(prices);
    }
    let catalog = open_catalog(global);
    let cost = catalog.select(global.plasma_unit.as_deref())?;
    Ok(prices.with_plasma_unit_cost(cost))
}

pub fn print_warning(warning: &QuoteWarning) {
    eprintln!("warning: {}", warning);
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| QuoteError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

pub(crate) fn display(path: &Path) -> String {
    path.display().to_string()
}
