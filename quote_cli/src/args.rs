//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quote_cli")]
#[command(author, version, about = "Kerf - CNC/plasma build quoting tool")]
#[command(long_about = "Price a CNC/plasma machine build: parts list, build cost, area-based profit, and a customer PDF quote.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Price table JSON file (built-in defaults when omitted)
    #[arg(long, global = true)]
    pub prices: Option<PathBuf>,

    /// Plasma unit list
    #[arg(long, global = true, default_value = quote_core::file_io::PLASMA_UNITS_FILE)]
    pub units_file: PathBuf,

    /// Include this plasma unit's cost in quotes
    #[arg(long, global = true)]
    pub plasma_unit: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the machine configurations that can be quoted
    Configs,

    /// Quote one machine configuration
    Quote(QuoteArgs),

    /// Quote every configuration side by side
    Compare,

    /// Manage the plasma unit list
    #[command(subcommand)]
    Units(UnitsCommands),

    /// Manage the price table file
    #[command(subcommand)]
    Prices(PricesCommands),
}

#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// Configuration name, e.g. "2 x 3 ft"
    pub config: String,

    /// Customer name printed on the PDF
    #[arg(long, short = 'c', default_value = "")]
    pub customer: String,

    /// Write a PDF quote to this file, or into this directory
    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum UnitsCommands {
    /// List plasma units
    List,

    /// Add or replace a plasma unit
    Add {
        /// Unit name
        name: String,
        /// Unit cost ($)
        cost: f64,
    },

    /// Remove a plasma unit
    Remove {
        /// Unit name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PricesCommands {
    /// Write the default price table to the --prices file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective price table
    Show,
}
