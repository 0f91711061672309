//! `quote` command - full quote for one configuration

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use quote_core::errors::CoreResult;
use quote_core::file_io::write_atomic;
use quote_core::machines::MachineConfig;
use quote_core::pdf::{quote_file_name, render_quote_pdf, QuoteDocument};
use quote_core::quote::{build_quote, QuoteBreakdown};

use crate::args::{GlobalOpts, QuoteArgs};
use crate::commands::{display, print_json, print_warning, prices_with_plasma_unit};
use crate::output::breakdown_report;

pub fn run(args: QuoteArgs, global: &GlobalOpts) -> CoreResult<()> {
    let config = MachineConfig::find(&args.config)?;
    let prices = prices_with_plasma_unit(global)?;
    let breakdown = build_quote(&config, &prices);

    for warning in &breakdown.warnings {
        print_warning(warning);
    }

    if global.json {
        print_json(&breakdown)?;
    } else {
        print!("{}", breakdown_report(&breakdown, global.plasma_unit.as_deref()));
    }

    if let Some(target) = &args.pdf {
        let today = Local::now().date_naive();
        let path = write_pdf(&args.customer, &breakdown, target, today)?;
        eprintln!("Wrote {}", display(&path));
    }
    Ok(())
}

/// Resolve where the PDF goes: a directory gets the default file name.
fn pdf_path(target: &Path, customer: &str, date: NaiveDate) -> PathBuf {
    if target.is_dir() {
        target.join(quote_file_name(customer, date))
    } else {
        target.to_path_buf()
    }
}

fn write_pdf(customer: &str, breakdown: &QuoteBreakdown, target: &Path, date: NaiveDate) -> CoreResult<PathBuf> {
    let doc = QuoteDocument::from_breakdown(customer, breakdown, date);
    let bytes = render_quote_pdf(&doc)?;
    let path = pdf_path(target, &doc.customer_name, date);
    write_atomic(&bytes, &path)?;
    info!(path = %path.display(), bytes = bytes.len(), "quote pdf written");
    Ok(path)
}
