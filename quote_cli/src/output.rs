//! Table formatting for quote output

use quote_core::machines::MachineConfig;
use quote_core::pdf::format_currency;
use quote_core::quote::{ComparisonSummary, QuoteBreakdown, QuoteResult};
use tabled::{builder::Builder, settings::Style};

fn render(builder: Builder) -> String {
    builder.build().with(Style::rounded()).to_string()
}

/// Catalog listing with nominal sizes
pub fn configs_table(configs: &[MachineConfig]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Configuration", "X (ft)", "Y (ft)", "Area (ft²)"]);
    for config in configs {
        builder.push_record([
            config.name.to_string(),
            format!("{:.2}", config.nominal_x_ft()),
            format!("{:.2}", config.nominal_y_ft()),
            format!("{:.2}", config.nominal_area_sqft()),
        ]);
    }
    render(builder)
}

/// Full quote: summary, parts lists, and other components
pub fn breakdown_report(b: &QuoteBreakdown, plasma_unit: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str("SUMMARY\n");
    out.push_str(&format!("  Configuration:                {}\n", b.config_name));
    out.push_str(&format!(
        "  Actual working area:          {:.2} ft × {:.2} ft\n",
        b.actual_x_ft, b.actual_y_ft
    ));
    out.push_str(&format!("  Nominal area used for pricing: {:.2} ft²\n\n", b.area_sqft));

    let mut costs = Builder::default();
    costs.push_record(["Item", "Amount"]);
    costs.push_record(["Extrusion cost".to_string(), format_currency(b.extrusion_cost)]);
    costs.push_record(["Steel cost".to_string(), format_currency(b.steel_cost)]);
    costs.push_record(["Donor kit cost".to_string(), format_currency(b.donor_cost)]);
    costs.push_record(["Misc electronics".to_string(), format_currency(b.misc_electronics_cost)]);
    if let Some(name) = plasma_unit.filter(|_| b.plasma_unit_cost > 0.0) {
        costs.push_record([format!("Plasma unit ({})", name), format_currency(b.plasma_unit_cost)]);
    }
    costs.push_record(["Misc add-on".to_string(), format_currency(b.misc_cost)]);
    costs.push_record(["Total build cost".to_string(), format_currency(b.total_cost)]);
    costs.push_record(["Sell price".to_string(), format_currency(b.sell_price)]);
    costs.push_record(["Profit".to_string(), format_currency(b.profit)]);
    costs.push_record(["Actual margin".to_string(), format!("{:.1}%", b.margin_pct)]);
    out.push_str(&render(costs));
    out.push_str("\n\nEXTRUSION PARTS\n");

    let mut extrusions = Builder::default();
    extrusions.push_record([
        "Description",
        "Profile",
        "Length (mm)",
        "Length (in)",
        "Qty",
        "Unit price",
        "Line total",
    ]);
    for part in &b.extrusion_parts {
        extrusions.push_record([
            part.description.clone(),
            part.profile.to_string(),
            part.length_mm.to_string(),
            format!("{:.2}", part.length_in),
            part.quantity.to_string(),
            format_currency(part.unit_price),
            format_currency(part.line_total),
        ]);
    }
    out.push_str(&render(extrusions));
    out.push_str("\n\nSTEEL FRAME PARTS\n");

    let mut steel = Builder::default();
    steel.push_record(["Description", "Size", "Length (in)", "Length (ft)", "Qty"]);
    for part in &b.steel_parts {
        steel.push_record([
            part.description.clone(),
            part.size.clone(),
            format!("{:.2}", part.length_in),
            format!("{:.3}", part.length_ft),
            part.quantity.to_string(),
        ]);
    }
    out.push_str(&render(steel));
    out.push_str(&format!(
        "\nTotal steel length: {:.3} ft  Steel cost: {}\n\n",
        b.total_steel_ft,
        format_currency(b.steel_cost)
    ));

    out.push_str("DONOR KIT / OTHER MAJOR COMPONENTS\n");
    let mut other = Builder::default();
    other.push_record(["Item", "Cost"]);
    other.push_record([
        "Donor CNC kit (electronics, motors, wiring, plates, etc.)".to_string(),
        format_currency(b.donor_cost),
    ]);
    other.push_record(["Misc electronics".to_string(), format_currency(b.misc_electronics_cost)]);
    if let Some(name) = plasma_unit.filter(|_| b.plasma_unit_cost > 0.0) {
        other.push_record([format!("Plasma unit: {}", name), format_currency(b.plasma_unit_cost)]);
    }
    out.push_str(&render(other));
    out.push('\n');

    out
}

/// Side-by-side comparison of every configuration
pub fn comparison_report(results: &[QuoteResult]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Configuration", "Area (ft²)", "Total cost", "Profit", "Sale price"]);
    for r in results {
        builder.push_record([
            r.config_name.clone(),
            format!("{:.2}", r.area_sqft),
            format_currency(r.total_cost),
            format_currency(r.profit),
            format_currency(r.sell_price),
        ]);
    }
    let mut out = render(builder);
    out.push('\n');

    if let Some(summary) = ComparisonSummary::from_results(results) {
        out.push_str(&format!(
            "Lowest: ${:.0}  Highest: ${:.0}  Average: ${:.0}\n",
            summary.lowest_price, summary.highest_price, summary.average_price
        ));
    }
    out
}

/// Plasma unit listing
pub fn units_table<'a>(units: impl Iterator<Item = (&'a str, f64)>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Plasma unit", "Cost"]);
    for (name, cost) in units {
        builder.push_record([name.to_string(), format_currency(cost)]);
    }
    render(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::pricing::PriceTable;
    use quote_core::quote::{build_quote, compare_all_configs};

    #[test]
    fn test_breakdown_report_sections() {
        let config = MachineConfig::find("2 x 2 ft").unwrap();
        let breakdown = build_quote(&config, &PriceTable::default());
        let report = breakdown_report(&breakdown, None);

        assert!(report.contains("EXTRUSION PARTS"));
        assert!(report.contains("Gantry beam"));
        assert!(report.contains("$710.00"));
        assert!(report.contains("9.875 ft"));
        assert!(!report.contains("Plasma unit"));
    }

    #[test]
    fn test_breakdown_report_lists_plasma_unit() {
        let config = MachineConfig::find("2 x 2 ft").unwrap();
        let prices = PriceTable::default().with_plasma_unit_cost(500.0);
        let breakdown = build_quote(&config, &prices);
        let report = breakdown_report(&breakdown, Some("Cut50"));
        assert!(report.contains("Plasma unit: Cut50"));
    }

    #[test]
    fn test_comparison_report_summary_line() {
        let results = compare_all_configs(&PriceTable::default());
        let report = comparison_report(&results);
        assert!(report.contains("400 x 400 mm"));
        assert!(report.contains("Lowest: $"));
    }
}
