//! `compare` command - quote every configuration

use serde::Serialize;

use quote_core::errors::CoreResult;
use quote_core::quote::{compare_all_configs, ComparisonSummary, QuoteResult};

use crate::args::GlobalOpts;
use crate::commands::{print_json, prices_with_plasma_unit};
use crate::output::comparison_report;

#[derive(Serialize)]
struct ComparisonJson<'a> {
    results: &'a [QuoteResult],
    summary: Option<ComparisonSummary>,
}

pub fn run(global: &GlobalOpts) -> CoreResult<()> {
    let prices = prices_with_plasma_unit(global)?;
    let results = compare_all_configs(&prices);

    if global.json {
        return print_json(&ComparisonJson {
            results: &results,
            summary: ComparisonSummary::from_results(&results),
        });
    }

    print!("{}", comparison_report(&results));
    Ok(())
}
