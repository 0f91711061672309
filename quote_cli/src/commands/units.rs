//! `units` command - manage the plasma unit list

use serde::Serialize;

use quote_core::errors::CoreResult;
use quote_core::pdf::format_currency;

use crate::args::{GlobalOpts, UnitsCommands};
use crate::commands::{open_catalog, print_json, print_warning};
use crate::output::units_table;

#[derive(Serialize)]
struct UnitRow<'a> {
    name: &'a str,
    cost: f64,
}

pub fn run(cmd: UnitsCommands, global: &GlobalOpts) -> CoreResult<()> {
    let mut catalog = open_catalog(global);

    match cmd {
        UnitsCommands::List => {
            if global.json {
                let rows: Vec<UnitRow> = catalog.iter().map(|(name, cost)| UnitRow { name, cost }).collect();
                return print_json(&rows);
            }
            if catalog.is_empty() {
                println!("No plasma units saved.");
            } else {
                println!("{}", units_table(catalog.iter()));
            }
        }
        UnitsCommands::Add { name, cost } => {
            if let Some(w) = catalog.add(&name, cost)? {
                print_warning(&w);
            }
            println!("Added {} ({})", name.trim(), format_currency(cost));
        }
        UnitsCommands::Remove { name } => {
            let removal = catalog.remove(&name);
            if let Some(w) = &removal.warning {
                print_warning(w);
            }
            match removal.removed {
                Some(_) => println!("Removed {}", name.trim()),
                None => println!("No plasma unit named '{}'", name.trim()),
            }
        }
    }
    Ok(())
}
