//! # quote_core - CNC/Plasma Build Quoting Engine
//!
//! `quote_core` is the computational heart of Kerf. Given a machine size from
//! the catalog and a table of prices, it picks stock extrusion lengths and
//! profiles, sizes the steel frame, and prices the build with an area-based
//! profit formula. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from inputs to results; quotes are
//!   recomputed on every request, never stored
//! - **Degrade, don't fail**: Pricing gaps come back as warnings next to a
//!   complete quote
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::machines::MachineConfig;
//! use quote_core::pricing::PriceTable;
//! use quote_core::quote::{build_quote, compare_all_configs};
//!
//! let config = MachineConfig::find("2 x 2 ft").unwrap();
//! let breakdown = build_quote(&config, &PriceTable::default());
//! assert_eq!(breakdown.sell_price, 710.0);
//!
//! let all = compare_all_configs(&PriceTable::default());
//! assert_eq!(all.len(), 10);
//! ```
//!
//! ## Modules
//!
//! - [`machines`] - Closed catalog of machine sizes
//! - [`pricing`] - Stock lengths, profiles, and the price table
//! - [`parts`] - Extrusion and steel parts selection
//! - [`quote`] - Cost, profit, and sell price calculation
//! - [`plasma_units`] - Named plasma-unit price list
//! - [`file_io`] - Atomic JSON persistence
//! - [`pdf`] - Customer quote PDF rendering
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error and warning types

pub mod errors;
pub mod file_io;
pub mod machines;
pub mod parts;
pub mod pdf;
pub mod plasma_units;
pub mod pricing;
pub mod quote;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CoreResult, QuoteError, QuoteWarning};
pub use file_io::JsonFileStore;
pub use machines::MachineConfig;
pub use plasma_units::{PlasmaUnitCatalog, PlasmaUnitStore};
pub use pricing::{PriceTable, Profile, StandardLength};
pub use quote::{build_quote, compare_all_configs, compute_quote, QuoteBreakdown, QuoteResult};
