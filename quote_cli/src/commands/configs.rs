//! `configs` command - list the machine catalog

use serde::Serialize;

use quote_core::errors::CoreResult;
use quote_core::machines::MachineConfig;

use crate::args::GlobalOpts;
use crate::commands::print_json;
use crate::output::configs_table;

#[derive(Serialize)]
struct ConfigRow {
    name: &'static str,
    x_work_in: f64,
    y_work_in: f64,
    nominal_area_sqft: f64,
}

pub fn run(global: &GlobalOpts) -> CoreResult<()> {
    if global.json {
        let rows: Vec<ConfigRow> = MachineConfig::ALL
            .iter()
            .map(|c| ConfigRow {
                name: c.name,
                x_work_in: c.x_work_in,
                y_work_in: c.y_work_in,
                nominal_area_sqft: c.nominal_area_sqft(),
            })
            .collect();
        return print_json(&rows);
    }

    println!("{}", configs_table(&MachineConfig::ALL));
    Ok(())
}
