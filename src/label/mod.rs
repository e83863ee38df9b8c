//! # Label Composer
//!
//! Builds the HTML fragment for one printable product label.
//!
//! A label is a fixed-size box holding, top to bottom:
//!
//! ```text
//! ┌──────────────────────────┐
//! │   logo / company name    │  optional
//! │   ▌▌▌▌ ▌▌ ▌▌▌ ▌ ▌▌▌ ▌▌   │  symbol placeholder
//! │      MRP: ₹2,399.5       │  show_price
//! │   PE/PJ02-2399-AGZKO     │  show_sku
//! │    Pendant - Pj Gems     │  show_category / show_manufacturer
//! └──────────────────────────┘
//! ```
//!
//! The symbol itself is not rendered here. The fragment carries
//! [`QR_PLACEHOLDER`] or [`BARCODE_PLACEHOLDER`], which the print
//! orchestrator replaces with a rasterized data URL.

mod template;

pub use template::{BarcodeFormat, PrintTemplate};

use serde::{Deserialize, Serialize};

use crate::payload::ProductPayload;
use crate::sku::ProductBarcodes;

/// Replaced with the QR image source.
pub const QR_PLACEHOLDER: &str = "QRCODE_PLACEHOLDER";

/// Replaced with the linear symbol image source.
pub const BARCODE_PLACEHOLDER: &str = "BARCODE_PLACEHOLDER";

/// What to show on a label and how it looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    pub show_price: bool,
    pub show_sku: bool,
    pub show_category: bool,
    pub show_manufacturer: bool,
    pub show_logo: bool,
    pub company_name: String,
    pub logo_url: String,
    /// Base font size in pixels.
    pub font_size: u32,
    /// Label width in pixels.
    pub label_width: u32,
    /// Label height in pixels.
    pub label_height: u32,
    pub background_color: String,
    pub text_color: String,
    pub border_color: String,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            show_price: true,
            show_sku: true,
            show_category: false,
            show_manufacturer: false,
            show_logo: false,
            company_name: String::new(),
            logo_url: String::new(),
            font_size: 12,
            label_width: 200,
            label_height: 100,
            background_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            border_color: "#CCCCCC".to_string(),
        }
    }
}

/// HTML fragment for one label, with the symbol left as a placeholder.
pub fn label_html(
    barcode: &ProductBarcodes,
    format: BarcodeFormat,
    options: &LabelOptions,
    template: PrintTemplate,
) -> String {
    let payload = ProductPayload::parse(&barcode.qr_code);
    let mrp = payload.as_ref().map(|p| p.mrp.as_str()).unwrap_or("");
    let category = payload
        .as_ref()
        .and_then(|p| p.category.as_deref())
        .unwrap_or("");
    let manufacturer = payload
        .as_ref()
        .and_then(|p| p.manufacturer.as_deref())
        .unwrap_or("");
    let font_size = options.font_size as i64;

    let mut html = String::new();
    html.push_str(&format!(
        "<div style=\"width: {}px; height: {}px; background-color: {}; color: {}; \
         font-family: Arial, sans-serif; display: flex; flex-direction: column; \
         align-items: center; justify-content: center; box-sizing: border-box; margin: 0; \
         page-break-inside: avoid; {}\">",
        options.label_width,
        options.label_height,
        escape_html(&options.background_color),
        escape_html(&options.text_color),
        escape_html(&template.style(options)),
    ));

    if options.show_logo && !options.logo_url.is_empty() {
        html.push_str(&format!(
            "<div style=\"margin-bottom: 5px; text-align: center;\">\
             <img src=\"{}\" style=\"max-height: 20px; max-width: 80px;\" alt=\"{}\" /></div>",
            escape_html(&options.logo_url),
            escape_html(&options.company_name),
        ));
    } else if !options.company_name.is_empty() {
        html.push_str(&format!(
            "<div style=\"font-size: {}px; margin-bottom: 5px; text-align: center;\">{}</div>",
            font_size - 2,
            escape_html(&options.company_name),
        ));
    }

    if format.is_qr() {
        html.push_str(&format!(
            "<div style=\"text-align: center;\">\
             <img src=\"{}\" style=\"width: 80px; height: 80px;\" alt=\"QR Code\" /></div>",
            QR_PLACEHOLDER
        ));
    } else {
        html.push_str(&format!(
            "<div style=\"text-align: center;\"><div style=\"width: 100%; height: 50px; \
             background-image: url('{}'); background-repeat: no-repeat; \
             background-position: center; background-size: contain;\"></div></div>",
            BARCODE_PLACEHOLDER
        ));
    }

    if options.show_price && !mrp.is_empty() {
        html.push_str(&format!(
            "<div style=\"font-weight: bold; font-size: {}px; margin-top: 5px;\">MRP: ₹{}</div>",
            font_size + 2,
            escape_html(&format_price(mrp)),
        ));
    }

    if options.show_sku && !barcode.sku.is_empty() {
        html.push_str(&format!(
            "<div style=\"font-family: monospace; font-size: {}px; margin-top: 2px;\">{}</div>",
            font_size,
            escape_html(&barcode.sku),
        ));
    }

    let show_category = options.show_category && !category.is_empty();
    let show_manufacturer = options.show_manufacturer && !manufacturer.is_empty();
    if show_category || show_manufacturer {
        let line = match (show_category, show_manufacturer) {
            (true, true) => format!("{} - {}", category, manufacturer),
            (true, false) => category.to_string(),
            _ => manufacturer.to_string(),
        };
        html.push_str(&format!(
            "<div style=\"font-size: {}px; margin-top: 2px;\">{}</div>",
            font_size - 4,
            escape_html(&line),
        ));
    }

    html.push_str("</div>");
    html
}

/// Human-readable price: thousands separators, at most three decimals
/// rounded half away from zero, trailing zeros dropped
/// (`"2399.50"` → `"2,399.5"`). Unparsable input is returned unchanged.
pub fn format_price(mrp: &str) -> String {
    let Ok(value) = mrp.trim().parse::<f64>() else {
        return mrp.to_string();
    };
    if !value.is_finite() {
        return mrp.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn barcode() -> ProductBarcodes {
        let payload = ProductPayload::new("PE/PJ02-2399-AGZKO", "Pendant", "Pj Gems", 2399.5, "");
        ProductBarcodes {
            sku: payload.sku.clone(),
            qr_code: payload.to_json().unwrap(),
            code128: None,
            cipher: payload.sku,
        }
    }

    #[test]
    fn test_default_label_fields() {
        let html = label_html(
            &barcode(),
            BarcodeFormat::Code128,
            &LabelOptions::default(),
            PrintTemplate::Standard,
        );
        assert!(html.contains(BARCODE_PLACEHOLDER));
        assert!(!html.contains(QR_PLACEHOLDER));
        assert!(html.contains("MRP: ₹2,399.5"));
        assert!(html.contains(">PE/PJ02-2399-AGZKO</div>"));
        assert!(!html.contains("Pendant"));
        assert!(html.contains("border: 1px solid #CCCCCC"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_qr_label_uses_qr_placeholder() {
        let html = label_html(
            &barcode(),
            BarcodeFormat::Qr,
            &LabelOptions::default(),
            PrintTemplate::Minimal,
        );
        assert!(html.contains(QR_PLACEHOLDER));
        assert!(!html.contains(BARCODE_PLACEHOLDER));
    }

    #[test]
    fn test_category_and_manufacturer_line() {
        let options = LabelOptions {
            show_category: true,
            show_manufacturer: true,
            ..Default::default()
        };
        let html = label_html(&barcode(), BarcodeFormat::Code128, &options, PrintTemplate::Standard);
        assert!(html.contains("font-size: 8px; margin-top: 2px;\">Pendant - Pj Gems</div>"));

        let options = LabelOptions {
            show_manufacturer: true,
            ..Default::default()
        };
        let html = label_html(&barcode(), BarcodeFormat::Code128, &options, PrintTemplate::Standard);
        assert!(html.contains(">Pj Gems</div>"));
    }

    #[test]
    fn test_logo_wins_over_company_name() {
        let options = LabelOptions {
            show_logo: true,
            logo_url: "https://example.com/logo.png".to_string(),
            company_name: "Acme & Co".to_string(),
            ..Default::default()
        };
        let html = label_html(&barcode(), BarcodeFormat::Code128, &options, PrintTemplate::Standard);
        assert!(html.contains("<img src=\"https://example.com/logo.png\""));
        assert!(html.contains("alt=\"Acme &amp; Co\""));

        let options = LabelOptions {
            company_name: "Acme".to_string(),
            ..Default::default()
        };
        let html = label_html(&barcode(), BarcodeFormat::Code128, &options, PrintTemplate::Standard);
        assert!(html.contains("font-size: 10px; margin-bottom: 5px; text-align: center;\">Acme</div>"));
    }

    #[test]
    fn test_unparsable_payload_hides_price() {
        let record = ProductBarcodes::from_qr_payload("not json");
        let html = label_html(
            &record,
            BarcodeFormat::Qr,
            &LabelOptions::default(),
            PrintTemplate::Standard,
        );
        assert!(!html.contains("MRP"));
        assert!(html.contains(">UNKNOWN</div>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut record = barcode();
        record.sku = "<b>".to_string();
        let html = label_html(
            &record,
            BarcodeFormat::Code128,
            &LabelOptions::default(),
            PrintTemplate::Standard,
        );
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("0.00"), "0");
        assert_eq!(format_price("2399.50"), "2,399.5");
        assert_eq!(format_price("1234567.125"), "1,234,567.125");
        assert_eq!(format_price("999"), "999");
        assert_eq!(format_price("-1500.25"), "-1,500.25");
        assert_eq!(format_price("abc"), "abc");
        assert_eq!(format_price("12"), "12");
    }

    #[test]
    fn test_format_price_rounds_ties_up() {
        assert_eq!(format_price("2.0625"), "2.063");
        assert_eq!(format_price("-2.0625"), "-2.063");
        assert_eq!(format_price("0.0005"), "0.001");
        assert_eq!(format_price("999.9995"), "1,000");
    }
}
