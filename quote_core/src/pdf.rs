//! # PDF Quote Module
//!
//! Renders the customer-facing quote document using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Quote data is injected via placeholder replacement before compilation
//! - The feature sections under "SPECIFICATIONS" are fixed text describing the machine
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use quote_core::machines::MachineConfig;
//! use quote_core::pdf::{quote_file_name, render_quote_pdf, QuoteDocument};
//! use quote_core::pricing::PriceTable;
//! use quote_core::quote::build_quote;
//!
//! let config = MachineConfig::find("2 x 3 ft").unwrap();
//! let breakdown = build_quote(&config, &PriceTable::default());
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//!
//! let doc = QuoteDocument::from_breakdown("Acme Fabrication", &breakdown, date);
//! let pdf_bytes = render_quote_pdf(&doc).unwrap();
//! std::fs::write(quote_file_name(&doc.customer_name, date), pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{CoreResult, QuoteError};
use crate::quote::QuoteBreakdown;

/// Customer name used when none is given
pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";

// ============================================================================
// Quote Document
// ============================================================================

/// Everything printed on a customer quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub customer_name: String,
    pub config_name: String,
    /// Actual working area X, feet rounded to 2 decimals
    pub actual_x_ft: f64,
    /// Actual working area Y, feet rounded to 2 decimals
    pub actual_y_ft: f64,
    pub sell_price: f64,
    pub date: NaiveDate,
}

impl QuoteDocument {
    /// Build the document for a computed quote.
    ///
    /// A blank customer name becomes "Customer".
    pub fn from_breakdown(customer_name: &str, breakdown: &QuoteBreakdown, date: NaiveDate) -> Self {
        let customer_name = match customer_name.trim() {
            "" => DEFAULT_CUSTOMER_NAME.to_string(),
            name => name.to_string(),
        };
        QuoteDocument {
            customer_name,
            config_name: breakdown.config_name.clone(),
            actual_x_ft: breakdown.actual_x_ft,
            actual_y_ft: breakdown.actual_y_ft,
            sell_price: breakdown.sell_price,
            date,
        }
    }
}

// ============================================================================
// Machine Feature Sections
// ============================================================================

/// A bullet with optional sub-bullets
struct FeatureItem {
    text: &'static str,
    children: &'static [&'static str],
}

const fn item(text: &'static str) -> FeatureItem {
    FeatureItem { text, children: &[] }
}

struct FeatureSection {
    title: &'static str,
    items: &'static [FeatureItem],
}

const FEATURE_SECTIONS: [FeatureSection; 6] = [
    FeatureSection {
        title: "Motion System",
        items: &[
            item("Drive Type: Belt-driven X and Y axes"),
            item("Linear Motion: V-wheel system on aluminum V-slot extrusions"),
            item("Maximum Travel Speed: ~10,000 mm/min motion capability"),
            item("Motor Type: NEMA 17 stepper motors"),
            item("Microstepping: Up to 1/32 depending on controller configuration"),
        ],
    },
    FeatureSection {
        title: "Controller & Electronics",
        items: &[
            item("Mainboard: 32-bit GRBL-based motion controller"),
            item("Firmware: Standard GRBL (configured for plasma torch on/off control)"),
            FeatureItem {
                text: "Supported Communication:",
                children: &[
                    "USB connection to PC",
                    "Wi-Fi (if included in your configuration)",
                    "Offline job execution using MicroSD/TF card",
                ],
            },
            item("Power Input: 12V DC motion system supply"),
            item("Torch Control Output: Isolated relay output for plasma \"torch fire\" signal"),
            FeatureItem {
                text: "Safety Interlocks:",
                children: &["Emergency stop button"],
            },
        ],
    },
    FeatureSection {
        title: "Software Compatibility",
        items: &[
            FeatureItem {
                text: "Compatible Control Software:",
                children: &[
                    "LaserGRBL",
                    "OpenBuilds CONTROL",
                    "Universal G-Code Sender (UGS)",
                    "Any GRBL-compatible sender",
                ],
            },
            item("G-Code Support: Standard GRBL G-code for 2-axis plasma cutting"),
            item("Design File Support: SVG, DXF, PNG/JPG (converted to paths), AI (via converters)"),
        ],
    },
    FeatureSection {
        title: "User Interface",
        items: &[
            item("Touch Display (Optional): 3.5\" color LCD for offline control"),
            item("Offline Operation: Supported via MicroSD card"),
        ],
    },
    FeatureSection {
        title: "Structural System",
        items: &[
            item("Frame Construction: Aluminum V-slot extrusion framework"),
            item("Gantry System: Reinforced aluminum crossbeam with adjustable carriage"),
            item("Torch Mounting: Custom fixed or adjustable plasma torch holder"),
        ],
    },
    FeatureSection {
        title: "Plasma System Integration",
        items: &[
            item("Torch Trigger: Dry-contact relay output compatible with most pilot-arc or blowback torch systems"),
            item("Signal Isolation: Relay isolator protects controller from arc interference"),
            item("Grounding Requirements: Dedicated ground recommended for plasma cutting"),
            item("Z-Axis Setup: Manual or fixed-height torch mount (motorized Z optional upgrade)"),
        ],
    },
];

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, loaded once per process
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
    /// Date reported to the document
    today: NaiveDate,
}

impl PdfWorld {
    fn new(source: String, today: NaiveDate) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
            today,
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        Datetime::from_ymd(
            self.today.year(),
            u8::try_from(self.today.month()).ok()?,
            u8::try_from(self.today.day()).ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the customer quote
const QUOTE_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
)

#set text(font: "Libertinus Serif", size: 11pt)

#show heading.where(level: 2): it => block(above: 14pt, below: 10pt)[
  #text(size: 14pt, fill: rgb("#333333"), weight: "bold")[#it.body]
]

#text(size: 24pt, fill: rgb("#1f77b4"), weight: "bold")[QUOTE]

#v(18pt)

*Customer:* {{CUSTOMER}} \
*Date:* {{DATE}} \
*Configuration:* {{CONFIG}} \
*Working Area:* {{X_FT}} ft × {{Y_FT}} ft

#v(20pt)

#text(size: 18pt, weight: "bold")[Total Price: {{PRICE}}]

#v(28pt)

== SPECIFICATIONS

{{FEATURE_SECTIONS}}
"##;

// ============================================================================
// Rendering Functions
// ============================================================================

/// Render a quote document to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(QuoteError::RenderFailed)` - If Typst compilation or export fails
pub fn render_quote_pdf(doc: &QuoteDocument) -> CoreResult<Vec<u8>> {
    let source = quote_source(doc);

    let world = PdfWorld::new(source, doc.date);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render_failed(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        QuoteError::render_failed(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    info!(
        customer = doc.customer_name.as_str(),
        config = doc.config_name.as_str(),
        bytes = pdf_bytes.len(),
        "rendered quote PDF"
    );
    Ok(pdf_bytes)
}

/// Fill the template with document data
fn quote_source(doc: &QuoteDocument) -> String {
    fill_template(
        QUOTE_TEMPLATE,
        &[
            ("CUSTOMER", escape_typst(&doc.customer_name)),
            ("DATE", doc.date.format("%B %d, %Y").to_string()),
            ("CONFIG", escape_typst(&doc.config_name)),
            ("X_FT", format!("{:.2}", doc.actual_x_ft)),
            ("Y_FT", format!("{:.2}", doc.actual_y_ft)),
            ("PRICE", escape_typst(&format_currency(doc.sell_price))),
            ("FEATURE_SECTIONS", feature_sections_typst()),
        ],
    )
}

/// Replace `{{KEY}}` placeholders in one pass over the template.
///
/// Substituted values are never scanned again, so placeholder text inside a
/// value is kept literally. Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn feature_sections_typst() -> String {
    let mut out = String::new();
    for section in &FEATURE_SECTIONS {
        out.push_str(&format!("== {}\n\n", escape_typst(section.title)));
        for entry in section.items {
            out.push_str(&format!("- {}\n", escape_typst(entry.text)));
            for child in entry.children {
                out.push_str(&format!("  - {}\n", escape_typst(child)));
            }
        }
        out.push_str("\n#v(8pt)\n\n");
    }
    out
}

/// Escape special Typst characters in text placed into markup
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '~' | '/' | '=' | '+'
            | '-' | '"' | '\'' => format!("\\{}", c),
            _ => c.to_string(),
        })
        .collect()
}

/// Format a dollar amount with thousands separators (e.g., "$1,210.00").
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// File name for a customer's quote, e.g. `Quote_Acme_Fab_20250314.pdf`.
///
/// Keeps letters, digits, space, `-` and `_`; anything else becomes `_`,
/// then spaces become `_`.
pub fn quote_file_name(customer_name: &str, date: NaiveDate) -> String {
    let safe: String = customer_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace(' ', "_");
    format!("Quote_{}_{}.pdf", safe, date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machines::MachineConfig;
    use crate::pricing::PriceTable;
    use crate::quote::build_quote;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn sample_doc(customer: &str) -> QuoteDocument {
        let config = MachineConfig::find("2 x 2 ft").unwrap();
        let breakdown = build_quote(&config, &PriceTable::default());
        QuoteDocument::from_breakdown(customer, &breakdown, sample_date())
    }

    #[test]
    fn test_document_from_breakdown() {
        let doc = sample_doc("Acme Fabrication");
        assert_eq!(doc.customer_name, "Acme Fabrication");
        assert_eq!(doc.config_name, "2 x 2 ft");
        assert_eq!(doc.actual_x_ft, 2.19);
        assert_eq!(doc.actual_y_ft, 2.12);
        assert_eq!(doc.sell_price, 710.0);
    }

    #[test]
    fn test_blank_customer_defaults() {
        assert_eq!(sample_doc("   ").customer_name, "Customer");
    }

    #[test]
    fn test_source_contains_quote_data() {
        let source = quote_source(&sample_doc("Acme Fabrication"));
        assert!(source.contains("*Customer:* Acme Fabrication"));
        assert!(source.contains("*Date:* March 14, 2025"));
        assert!(source.contains("2.19 ft × 2.12 ft"));
        assert!(source.contains("Total Price: \\$710.00"));
        assert!(source.contains("== Plasma System Integration"));
        assert!(source.contains("  - Emergency stop button"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_source_escapes_customer() {
        let source = quote_source(&sample_doc("#set *bold* $x$"));
        assert!(source.contains("\\#set \\*bold\\* \\$x\\$"));
    }

    #[test]
    fn test_placeholder_in_customer_name_kept_literally() {
        let source = quote_source(&sample_doc("Bob {{PRICE}} Co"));
        let line = source
            .lines()
            .find(|l| l.starts_with("*Customer:*"))
            .unwrap();
        assert!(line.contains("Bob {{PRICE}} Co"), "customer line: {line}");
        assert!(!line.contains("710"));
        assert!(source.contains("*Configuration:* 2 x 2 ft"));
    }

    #[test]
    fn test_fill_template_single_pass() {
        let values = [("A", "{{B}}".to_string()), ("B", "b".to_string())];
        assert_eq!(fill_template("{{A}}-{{B}}", &values), "{{B}}-b");
        assert_eq!(fill_template("{{C}} {{A", &values), "{{C}} {{A");
        assert_eq!(fill_template("no placeholders", &values), "no placeholders");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(710.0), "$710.00");
        assert_eq!(format_currency(1210.0), "$1,210.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn test_quote_file_name() {
        assert_eq!(
            quote_file_name("Acme Fab, Inc.", sample_date()),
            "Quote_Acme_Fab__Inc__20250314.pdf"
        );
        assert_eq!(
            quote_file_name("jo-smith_shop", sample_date()),
            "Quote_jo-smith_shop_20250314.pdf"
        );
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_quote_pdf(&sample_doc("Test Customer"));

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
