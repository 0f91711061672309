//! # Kerf CLI
//!
//! Command-line front end for `quote_core`: list the machine catalog, quote
//! one configuration or all of them, write a customer PDF, and keep the
//! plasma unit list and price table on disk.

mod args;
mod commands;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use args::{Cli, Commands};
use quote_core::errors::QuoteError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let global = cli.global;
    logging::init(global.verbose);

    let result = match cli.command {
        Commands::Configs => commands::configs::run(&global),
        Commands::Quote(args) => commands::quote::run(args, &global),
        Commands::Compare => commands::compare::run(&global),
        Commands::Units(cmd) => commands::units::run(cmd, &global),
        Commands::Prices(cmd) => commands::prices::run(cmd, &global),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, global.json);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &QuoteError, json: bool) {
    if json {
        let body = json!({ "code": error.error_code(), "error": error });
        eprintln!("{}", body);
    } else {
        eprintln!("Error: {}", error);
    }
}
