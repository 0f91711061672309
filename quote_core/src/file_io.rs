//! # File I/O Module
//!
//! JSON persistence for the two files the quoting tool keeps on disk:
//!
//! - the plasma-unit list (`plasma_units.json`), a flat `{ "name": cost }` object
//! - an optional price table, so a shop's prices survive between runs
//!
//! All writes are atomic: write to `.tmp`, fsync, rename over the target.
//! A crash mid-save leaves the previous file intact.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::JsonFileStore;
//! use quote_core::plasma_units::PlasmaUnitCatalog;
//!
//! let store = JsonFileStore::new("plasma_units.json");
//! let (mut catalog, warning) = PlasmaUnitCatalog::open(store);
//! if let Some(w) = warning {
//!     eprintln!("warning: {}", w);
//! }
//! catalog.add("Hypertherm 45XP", 1850.0)?;
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::{CoreResult, QuoteError};
use crate::plasma_units::{PlasmaUnitMap, PlasmaUnitStore};
use crate::pricing::PriceTable;

/// Default file name for the plasma-unit list
pub const PLASMA_UNITS_FILE: &str = "plasma_units.json";

/// Plasma-unit store backed by a JSON file.
///
/// A file that does not exist yet loads as an empty catalog.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        JsonFileStore::new(PLASMA_UNITS_FILE)
    }
}

impl PlasmaUnitStore for JsonFileStore {
    fn load(&self) -> CoreResult<PlasmaUnitMap> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no plasma unit file yet");
            return Ok(PlasmaUnitMap::new());
        }
        load_json(&self.path)
    }

    fn save(&self, units: &PlasmaUnitMap) -> CoreResult<()> {
        save_json(units, &self.path)
    }
}

/// Save a price table as pretty JSON.
pub fn save_price_table(prices: &PriceTable, path: &Path) -> CoreResult<()> {
    save_json(prices, path)
}

/// Load a price table from JSON.
///
/// The table is returned as written; call [`PriceTable::validate`] before
/// quoting from it.
pub fn load_price_table(path: &Path) -> CoreResult<PriceTable> {
    load_json(path)
}

/// Serialize `value` as pretty JSON and write it atomically to `path`.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> CoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| QuoteError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(json.as_bytes(), path)
}

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let mut file = File::open(path).map_err(|e| {
        QuoteError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        QuoteError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Write bytes to `path` via a temporary file and rename.
///
/// The save process:
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
pub fn write_atomic(bytes: &[u8], path: &Path) -> CoreResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

/// `quote.pdf` -> `quote.pdf.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plasma_units::PlasmaUnitCatalog;
    use crate::pricing::StandardLength;
    use tempfile::TempDir;

    #[test]
    fn test_tmp_path_generation() {
        let path = Path::new("/path/to/plasma_units.json");
        assert_eq!(tmp_path_for(path), Path::new("/path/to/plasma_units.json.tmp"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("plasma_units.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_store_writes_flat_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plasma_units.json");
        let store = JsonFileStore::new(&path);

        let units = PlasmaUnitMap::from([("Cut50".to_string(), 320.0)]);
        store.save(&units).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "Cut50": 320.0 }));
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_catalog_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plasma_units.json");

        let (mut catalog, _) = PlasmaUnitCatalog::open(JsonFileStore::new(&path));
        catalog.add("Unit A", 500.0).unwrap();
        catalog.add("Unit B", 750.0).unwrap();
        catalog.remove("Unit A");
        drop(catalog);

        let (reopened, warning) = PlasmaUnitCatalog::open(JsonFileStore::new(&path));
        assert!(warning.is_none());
        assert_eq!(reopened.get("Unit A"), None);
        assert_eq!(reopened.get("Unit B"), Some(750.0));
    }

    #[test]
    fn test_corrupt_file_opens_empty_with_warning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plasma_units.json");
        fs::write(&path, "{ not json").unwrap();

        let (catalog, warning) = PlasmaUnitCatalog::open(JsonFileStore::new(&path));
        assert!(catalog.is_empty());
        assert!(warning.is_some());
    }

    #[test]
    fn test_unwritable_location_warns_on_add() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist, so the temp file cannot be created
        let path = dir.path().join("missing").join("plasma_units.json");

        let (mut catalog, _) = PlasmaUnitCatalog::open(JsonFileStore::new(&path));
        let warning = catalog.add("Unit A", 500.0).unwrap();
        assert!(warning.is_some());
        assert_eq!(catalog.get("Unit A"), Some(500.0));
    }

    #[test]
    fn test_price_table_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.json");

        let mut prices = PriceTable::default();
        prices.price_2040_by_length.insert(StandardLength::L1220, 16.25);
        save_price_table(&prices, &path).unwrap();

        let loaded = load_price_table(&path).unwrap();
        assert_eq!(loaded, prices);
    }

    #[test]
    fn test_load_missing_price_table_is_file_error() {
        let dir = TempDir::new().unwrap();
        let err = load_price_table(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
