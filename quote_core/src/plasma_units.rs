//! # Plasma Unit Catalog
//!
//! A small named-price list of plasma cutters that can be bundled into a
//! quote. The catalog lives in memory; every mutation is flushed in full to
//! a [`PlasmaUnitStore`].
//!
//! Store failures never lose data already in memory: a failed load starts
//! the catalog empty, and a failed save is handed back as a
//! [`QuoteWarning`] while the in-memory entry stands.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::plasma_units::{MemoryStore, PlasmaUnitCatalog};
//!
//! let (mut catalog, warning) = PlasmaUnitCatalog::open(MemoryStore::default());
//! assert!(warning.is_none());
//!
//! catalog.add("Hypertherm 45XP", 1850.0).unwrap();
//! assert_eq!(catalog.get("Hypertherm 45XP"), Some(1850.0));
//!
//! catalog.remove("Hypertherm 45XP");
//! assert_eq!(catalog.get("Hypertherm 45XP"), None);
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::errors::{CoreResult, QuoteError, QuoteWarning};

/// Name → cost mapping as persisted
pub type PlasmaUnitMap = BTreeMap<String, f64>;

/// Durable backing for the plasma-unit catalog.
pub trait PlasmaUnitStore {
    /// Read the full mapping. A store with nothing saved yet returns an
    /// empty map, not an error.
    fn load(&self) -> CoreResult<PlasmaUnitMap>;

    /// Replace the stored mapping with `units`.
    fn save(&self, units: &PlasmaUnitMap) -> CoreResult<()>;
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    units: RefCell<PlasmaUnitMap>,
}

impl MemoryStore {
    /// Create a store pre-populated with `units`
    pub fn with_units(units: PlasmaUnitMap) -> Self {
        MemoryStore {
            units: RefCell::new(units),
        }
    }

    /// Snapshot of what has been saved
    pub fn saved(&self) -> PlasmaUnitMap {
        self.units.borrow().clone()
    }
}

impl PlasmaUnitStore for MemoryStore {
    fn load(&self) -> CoreResult<PlasmaUnitMap> {
        Ok(self.units.borrow().clone())
    }

    fn save(&self, units: &PlasmaUnitMap) -> CoreResult<()> {
        *self.units.borrow_mut() = units.clone();
        Ok(())
    }
}

/// Outcome of a [`PlasmaUnitCatalog::remove`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    /// Cost of the removed unit, `None` if it was not in the catalog
    pub removed: Option<f64>,
    /// Set when the removal could not be persisted
    pub warning: Option<QuoteWarning>,
}

/// Named plasma units and their costs.
#[derive(Debug)]
pub struct PlasmaUnitCatalog<S: PlasmaUnitStore> {
    units: PlasmaUnitMap,
    store: S,
}

impl<S: PlasmaUnitStore> PlasmaUnitCatalog<S> {
    /// Load the catalog from `store`.
    ///
    /// An unreadable or corrupt store yields an empty catalog plus a
    /// warning. Entries with negative or non-finite costs are dropped.
    pub fn open(store: S) -> (Self, Option<QuoteWarning>) {
        let (units, warning) = match store.load() {
            Ok(loaded) => (sanitize(loaded), None),
            Err(e) => {
                warn!(error = %e, "could not load plasma units; starting empty");
                (PlasmaUnitMap::new(), Some(QuoteWarning::from_store_error("load", &e)))
            }
        };
        info!(count = units.len(), "plasma unit catalog opened");
        (PlasmaUnitCatalog { units, store }, warning)
    }

    /// Add a unit, replacing any existing unit with the same name.
    ///
    /// The name is trimmed. A blank name or a negative cost is rejected and
    /// leaves the catalog untouched. On success, returns a warning if the
    /// change could not be saved.
    pub fn add(&mut self, name: &str, cost: f64) -> CoreResult<Option<QuoteWarning>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuoteError::invalid_input(
                "name",
                name,
                "Plasma unit name cannot be empty",
            ));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(QuoteError::invalid_input(
                "cost",
                cost.to_string(),
                "Plasma unit cost must be a finite, non-negative number",
            ));
        }

        self.units.insert(name.to_string(), cost);
        info!(name, cost, "plasma unit added");
        Ok(self.flush())
    }

    /// Remove a unit by name. Removing an unknown name is a no-op and does
    /// not touch the store.
    pub fn remove(&mut self, name: &str) -> Removal {
        match self.units.remove(name.trim()) {
            Some(cost) => {
                info!(name = name.trim(), "plasma unit removed");
                Removal {
                    removed: Some(cost),
                    warning: self.flush(),
                }
            }
            None => Removal {
                removed: None,
                warning: None,
            },
        }
    }

    /// Cost of a unit, if present
    pub fn get(&self, name: &str) -> Option<f64> {
        self.units.get(name.trim()).copied()
    }

    /// Cost to add to a quote for an optional selection.
    ///
    /// `None` means no plasma unit and costs nothing; an unknown name is an
    /// error.
    pub fn select(&self, name: Option<&str>) -> CoreResult<f64> {
        match name {
            None => Ok(0.0),
            Some(name) => self
                .get(name)
                .ok_or_else(|| QuoteError::plasma_unit_not_found(name.trim())),
        }
    }

    /// Units in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.units.iter().map(|(name, cost)| (name.as_str(), *cost))
    }

    /// Unit names in order
    pub fn names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush(&self) -> Option<QuoteWarning> {
        match self.store.save(&self.units) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "could not save plasma units; keeping in-memory state");
                Some(QuoteWarning::from_store_error("save", &e))
            }
        }
    }
}

fn sanitize(units: PlasmaUnitMap) -> PlasmaUnitMap {
    units
        .into_iter()
        .filter(|(name, cost)| {
            let keep = cost.is_finite() && *cost >= 0.0 && !name.trim().is_empty();
            if !keep {
                warn!(name = name.as_str(), cost = *cost, "dropping invalid plasma unit entry");
            }
            keep
        })
        .map(|(name, cost)| (name.trim().to_string(), cost))
        .collect()
}
