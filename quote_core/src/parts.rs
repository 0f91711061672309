//! # Parts Selection
//!
//! Turns a target working area into purchasable parts: V-slot extrusions cut
//! from standard stock lengths, and steel frame tube priced by the foot.
//!
//! ## Mechanical Offsets
//!
//! Each member is longer than the working dimension it spans. The offsets
//! below are the clearance/overlap added to the raw working dimension:
//!
//! | Member                 | Offset  |
//! |------------------------|---------|
//! | Y-axis rail (2020)     | 6.0"    |
//! | X-axis frame (2020)    | 3.5"    |
//! | Gantry beam            | 5.25"   |
//! | Steel tube X           | 5.25"   |
//! | Steel tube Y           | 6.0"    |
//!
//! ## Length Selection
//!
//! Extrusions are bought in fixed stock lengths. The selector picks the
//! shortest stock that is at least the required length; if nothing is long
//! enough it falls back to the longest stock and records a warning.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::parts::{choose_standard_length, select_extrusion_parts};
//! use quote_core::pricing::{PriceTable, Profile, StandardLength};
//!
//! // 30" = 762 mm -> 800 mm stock
//! assert_eq!(choose_standard_length(30.0), StandardLength::L800);
//!
//! let selection = select_extrusion_parts(24.0, 24.0, &PriceTable::default());
//! assert_eq!(selection.parts[2].profile, Profile::P2040);
//! assert!((selection.total_cost - 42.50).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::QuoteWarning;
use crate::pricing::{PriceTable, Profile, StandardLength};
use crate::units::{Feet, Inches, Millimeters};

/// Y-axis rail length beyond the Y working dimension (in)
pub const Y_RAIL_OFFSET_IN: f64 = 6.0;

/// X-axis 2020 frame rail length beyond the X working dimension (in)
pub const X_FRAME_OFFSET_2020_IN: f64 = 3.5;

/// Gantry beam length beyond the X working dimension (in)
pub const GANTRY_OFFSET_IN: f64 = 5.25;

/// Steel X tube length beyond the X working dimension (in)
pub const X_FRAME_OFFSET_STEEL_IN: f64 = 5.25;

/// Steel Y tube length beyond the Y working dimension (in)
pub const Y_FRAME_OFFSET_STEEL_IN: f64 = 6.0;

/// Gantry spans at or above this length (in) need the stiffer 2040 profile
pub const GANTRY_2040_THRESHOLD_IN: f64 = 29.0;

/// Steel frame tube cross-section
pub const STEEL_TUBE_SIZE: &str = "1.5\" x 1.5\"";

/// One extrusion line on the parts list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLine {
    /// What the part is for (e.g., "Gantry beam")
    pub description: String,
    /// Extrusion profile
    pub profile: Profile,
    /// Chosen stock length
    pub length_mm: u32,
    /// Chosen stock length in inches
    pub length_in: f64,
    /// Pieces to buy
    pub quantity: u32,
    /// Price per piece
    pub unit_price: f64,
    /// unit_price × quantity
    pub line_total: f64,
}

impl PartLine {
    fn new(description: &str, profile: Profile, length: StandardLength, quantity: u32, unit_price: f64) -> Self {
        PartLine {
            description: description.to_string(),
            profile,
            length_mm: length.mm(),
            length_in: length.inches(),
            quantity,
            unit_price,
            line_total: unit_price * f64::from(quantity),
        }
    }
}

/// One steel tube line on the parts list.
///
/// Steel is cut from continuous stock and priced by total length, so there
/// is no per-piece price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelLine {
    /// What the tube is for (e.g., "Steel tube X")
    pub description: String,
    /// Cross-section label
    pub size: String,
    /// Cut length in inches
    pub length_in: f64,
    /// Cut length in feet
    pub length_ft: f64,
    /// Pieces to cut
    pub quantity: u32,
}

impl SteelLine {
    fn new(description: &str, length_in: f64, quantity: u32) -> Self {
        SteelLine {
            description: description.to_string(),
            size: STEEL_TUBE_SIZE.to_string(),
            length_in,
            length_ft: Feet::from(Inches(length_in)).value(),
            quantity,
        }
    }

    /// Total feet of tube for this line
    pub fn total_length_ft(&self) -> f64 {
        self.length_ft * f64::from(self.quantity)
    }
}

/// Extrusions chosen for a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrusionSelection {
    /// Y rails, X frame rails, gantry beam (in that order)
    pub parts: Vec<PartLine>,
    /// Sum of all line totals
    pub total_cost: f64,
    /// X working area the chosen gantry actually allows (in)
    pub actual_x_work_in: f64,
    /// Y working area the chosen rails actually allow (in)
    pub actual_y_work_in: f64,
    /// Pricing gaps and stock overflows found while selecting
    pub warnings: Vec<QuoteWarning>,
}

/// Steel frame tube for a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSelection {
    /// X tubes then Y tubes
    pub parts: Vec<SteelLine>,
    /// Total feet of tube across all lines
    pub total_length_ft: f64,
    /// total_length_ft × steel price per foot
    pub total_cost: f64,
}

/// Pick the shortest standard stock length that covers `required_in`.
///
/// Falls back to the longest stock when nothing is long enough.
pub fn choose_standard_length(required_in: f64) -> StandardLength {
    let required_mm = Millimeters::from(Inches(required_in)).value();
    StandardLength::ALL
        .iter()
        .copied()
        .find(|length| f64::from(length.mm()) >= required_mm)
        .unwrap_or(StandardLength::LONGEST)
}

/// Profile needed for a gantry of the given required length.
///
/// Below 29" a 2020 is stiff enough; at 29" and above it must be a 2040.
pub fn gantry_profile(required_gantry_in: f64) -> Profile {
    if required_gantry_in < GANTRY_2040_THRESHOLD_IN {
        Profile::P2020
    } else {
        Profile::P2040
    }
}

/// Choose stock for one member, recording a warning if it overflows.
fn choose_for_part(part: &str, required_in: f64, warnings: &mut Vec<QuoteWarning>) -> StandardLength {
    let length = choose_standard_length(required_in);
    let required_mm = Millimeters::from(Inches(required_in)).value();
    if required_mm > f64::from(length.mm()) {
        warn!(part, required_mm, chosen_mm = length.mm(), "required length exceeds longest stock");
        warnings.push(QuoteWarning::StockOverflow {
            part: part.to_string(),
            required_mm,
            chosen_mm: length.mm(),
        });
    } else {
        debug!(part, required_in, chosen_mm = length.mm(), "selected stock length");
    }
    length
}

/// Select and price the extrusions for a working area.
///
/// # Arguments
///
/// * `x_work_in` - Target X working dimension (in)
/// * `y_work_in` - Target Y working dimension (in)
/// * `prices` - Price table (only the extrusion prices are used)
///
/// A missing 2040 price does not fail the selection: the gantry line is
/// priced at zero and a [`QuoteWarning::MissingPrice`] is returned.
pub fn select_extrusion_parts(x_work_in: f64, y_work_in: f64, prices: &PriceTable) -> ExtrusionSelection {
    let mut warnings = Vec::new();

    let required_y_rail_in = y_work_in + Y_RAIL_OFFSET_IN;
    let required_x_frame_in = x_work_in + X_FRAME_OFFSET_2020_IN;
    let required_gantry_in = x_work_in + GANTRY_OFFSET_IN;

    let y_rail = choose_for_part("Y-axis rail", required_y_rail_in, &mut warnings);
    let x_frame = choose_for_part("X-axis frame rail", required_x_frame_in, &mut warnings);
    let gantry = choose_for_part("Gantry beam", required_gantry_in, &mut warnings);

    let profile = gantry_profile(required_gantry_in);
    let gantry_unit_price = match profile {
        Profile::P2020 => prices.price_2020,
        Profile::P2040 => prices.price_2040(gantry).unwrap_or_else(|| {
            warn!(length_mm = gantry.mm(), "no 2040 price configured; gantry priced at zero");
            warnings.push(QuoteWarning::MissingPrice {
                part: "Gantry beam".to_string(),
                profile: profile.display_name().to_string(),
                length_mm: gantry.mm(),
            });
            0.0
        }),
    };

    let parts = vec![
        PartLine::new("Y-axis rail", Profile::P2020, y_rail, 2, prices.price_2020),
        PartLine::new("X-axis frame rail", Profile::P2020, x_frame, 2, prices.price_2020),
        PartLine::new("Gantry beam", profile, gantry, 1, gantry_unit_price),
    ];
    let total_cost = parts.iter().map(|p| p.line_total).sum();

    ExtrusionSelection {
        parts,
        total_cost,
        actual_x_work_in: gantry.inches() - GANTRY_OFFSET_IN,
        actual_y_work_in: y_rail.inches() - Y_RAIL_OFFSET_IN,
        warnings,
    }
}

/// Size and price the steel frame tube for a working area.
pub fn select_steel_parts(x_work_in: f64, y_work_in: f64, prices: &PriceTable) -> SteelSelection {
    let parts = vec![
        SteelLine::new("Steel tube X", x_work_in + X_FRAME_OFFSET_STEEL_IN, 2),
        SteelLine::new("Steel tube Y", y_work_in + Y_FRAME_OFFSET_STEEL_IN, 2),
    ];
    let total_length_ft: f64 = parts.iter().map(SteelLine::total_length_ft).sum();

    SteelSelection {
        parts,
        total_length_ft,
        total_cost: total_length_ft * prices.steel_price_per_ft,
    }
}
