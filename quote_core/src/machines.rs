//! Machine Configurations
//!
//! The closed catalog of machine sizes that can be quoted. Each entry names a
//! nominal working area; the parts selector turns that into stock lengths and
//! the quote calculator prices profit off the nominal area.
//!
//! ## Naming
//!
//! - "400" in a name means 400 mm (15.75")
//! - "2 ft", "3 ft", "4 ft" are 24", 36", 48"

use serde::Serialize;

use crate::errors::{CoreResult, QuoteError};
use crate::units::{Feet, Inches, SqFt};

/// A named target working area.
///
/// The catalog is fixed at compile time, so configurations are only ever
/// serialized (for JSON output), never read back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MachineConfig {
    /// Display label (e.g., "2 x 3 ft")
    pub name: &'static str,
    /// Target working area along X in inches
    pub x_work_in: f64,
    /// Target working area along Y in inches
    pub y_work_in: f64,
}

impl MachineConfig {
    const fn new(name: &'static str, x_work_in: f64, y_work_in: f64) -> Self {
        MachineConfig {
            name,
            x_work_in,
            y_work_in,
        }
    }

    /// All catalog configurations, smallest X first
    pub const ALL: [MachineConfig; 10] = [
        MachineConfig::new("400 x 400 mm", 15.75, 15.75),
        MachineConfig::new("400 x 2 ft", 15.75, 24.0),
        MachineConfig::new("400 x 3 ft", 15.75, 36.0),
        MachineConfig::new("400 x 4 ft", 15.75, 48.0),
        MachineConfig::new("2 x 2 ft", 24.0, 24.0),
        MachineConfig::new("2 x 3 ft", 24.0, 36.0),
        MachineConfig::new("2 x 4 ft", 24.0, 48.0),
        MachineConfig::new("3 x 3 ft", 36.0, 36.0),
        MachineConfig::new("3 x 4 ft", 36.0, 48.0),
        MachineConfig::new("4 x 4 ft", 48.0, 48.0),
    ];

    /// Look up a configuration by its exact display name
    pub fn find(name: &str) -> CoreResult<MachineConfig> {
        Self::ALL
            .iter()
            .find(|config| config.name == name)
            .copied()
            .ok_or_else(|| QuoteError::config_not_found(name))
    }

    /// Nominal X dimension in feet
    pub fn nominal_x_ft(&self) -> f64 {
        Feet::from(Inches(self.x_work_in)).value()
    }

    /// Nominal Y dimension in feet
    pub fn nominal_y_ft(&self) -> f64 {
        Feet::from(Inches(self.y_work_in)).value()
    }

    /// Nominal working area in square feet (what profit is priced on)
    pub fn nominal_area_sqft(&self) -> f64 {
        let area: SqFt = Feet(self.nominal_x_ft()) * Feet(self.nominal_y_ft());
        area.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_entries_with_unique_names() {
        let mut names: Vec<&str> = MachineConfig::ALL.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_all_dimensions_positive() {
        for config in MachineConfig::ALL {
            assert!(config.x_work_in > 0.0, "{} has non-positive X", config.name);
            assert!(config.y_work_in > 0.0, "{} has non-positive Y", config.name);
        }
    }

    #[test]
    fn test_find() {
        let config = MachineConfig::find("2 x 3 ft").unwrap();
        assert_eq!(config.x_work_in, 24.0);
        assert_eq!(config.y_work_in, 36.0);
    }

    #[test]
    fn test_find_unknown() {
        let err = MachineConfig::find("10 x 10 ft").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_NOT_FOUND");
    }

    #[test]
    fn test_nominal_area() {
        let config = MachineConfig::find("2 x 2 ft").unwrap();
        assert!((config.nominal_area_sqft() - 4.0).abs() < 1e-12);

        let small = MachineConfig::find("400 x 400 mm").unwrap();
        // 15.75" = 1.3125 ft
        assert!((small.nominal_area_sqft() - 1.722_656_25).abs() < 1e-9);
    }
}
