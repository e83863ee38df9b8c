//! # Print Orchestrator
//!
//! Composes a sheet of labels and hands it to a print surface.
//!
//! ## Flow
//!
//! ```text
//! ProductBarcodes ─┬─ label_html ─→ fragment with placeholder ─┐
//!                  └─ rasterize  ─→ data:image/png URL ────────┴→ label ─→ sheet ─→ PrintSurface
//! ```
//!
//! Labels are rasterized in parallel. A label whose symbol cannot be
//! rasterized is still printed, with an empty image source, so one bad SKU
//! does not lose the rest of the sheet.

use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;
use crate::label::{
    self, BARCODE_PLACEHOLDER, BarcodeFormat, LabelOptions, PrintTemplate, QR_PLACEHOLDER,
};
use crate::raster::{self, BarcodeStyle};
use crate::sku::ProductBarcodes;

/// Default sheet title for [`print_labels`].
pub const DEFAULT_TITLE: &str = "Print Labels";

/// A composed document ready to print.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub title: String,
    /// Complete HTML document.
    pub document: String,
    pub label_count: usize,
    pub created_at: DateTime<Local>,
}

/// Destination for composed print jobs.
pub trait PrintSurface {
    fn submit(&mut self, job: &PrintJob) -> Result<()>;
}

/// Writes each job's document to a file, replacing earlier contents.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    path: PathBuf,
}

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for HtmlFileSurface {
    fn submit(&mut self, job: &PrintJob) -> Result<()> {
        fs::write(&self.path, &job.document)?;
        info!(
            path = %self.path.display(),
            labels = job.label_count,
            "Wrote print document"
        );
        Ok(())
    }
}

/// Keeps submitted jobs in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub jobs: Vec<PrintJob>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&PrintJob> {
        self.jobs.last()
    }
}

impl PrintSurface for MemorySurface {
    fn submit(&mut self, job: &PrintJob) -> Result<()> {
        self.jobs.push(job.clone());
        Ok(())
    }
}

/// Pixel width of the QR image for a label.
pub fn qr_width(options: &LabelOptions) -> u32 {
    (options.label_width as f64 * 0.6).floor() as u32
}

/// Linear symbol geometry for a label: bars take 30 % of the label height,
/// modules are sized so the symbol roughly fills 80 % of its width.
pub fn label_barcode_style(options: &LabelOptions) -> BarcodeStyle {
    BarcodeStyle {
        module_width: ((options.label_width as f64 * 0.8 / 100.0).floor() as u32).max(1),
        height: (options.label_height as f64 * 0.3).floor() as u32,
        show_text: false,
        font_size: options.font_size,
        text_margin: 2,
    }
}

/// Rasterize the symbol for one label as a data URL.
fn symbol_source(
    barcode: &ProductBarcodes,
    format: BarcodeFormat,
    options: &LabelOptions,
) -> Result<String> {
    let img = if format.is_qr() {
        raster::qr_image(&barcode.qr_code, qr_width(options), 1)?
    } else {
        raster::code128_image(&barcode.sku, &label_barcode_style(options))?
    };
    raster::to_data_url(&img)
}

/// One finished label fragment with its symbol filled in.
fn render_label(
    barcode: &ProductBarcodes,
    format: BarcodeFormat,
    template: PrintTemplate,
    options: &LabelOptions,
) -> String {
    let html = label::label_html(barcode, format, options, template);
    let placeholder = if format.is_qr() {
        QR_PLACEHOLDER
    } else {
        BARCODE_PLACEHOLDER
    };

    match symbol_source(barcode, format, options) {
        Ok(src) => html.replacen(placeholder, &src, 1),
        Err(e) => {
            warn!(sku = %barcode.sku, %format, error = %e, "Could not rasterize label symbol");
            html.replacen(placeholder, "", 1)
        }
    }
}

/// Wrap label fragments in a printable A4 document.
pub fn compose_document(title: &str, template: PrintTemplate, labels: &[String]) -> String {
    let mut document = String::new();
    document.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    document.push_str(&format!("<title>{}</title>\n", label::escape_html(title)));
    document.push_str("<style>\n");
    document.push_str("@page { size: A4; margin: 10mm; }\n");
    document.push_str(
        "@media print { body { margin: 0; } .label-grid { page-break-inside: auto; } }\n",
    );
    document.push_str("body { font-family: Arial, sans-serif; margin: 0; padding: 10px; }\n");
    document.push_str(&format!(
        ".label-grid {{ display: grid; grid-template-columns: repeat({}, 1fr); gap: 10px; justify-items: center; }}\n",
        template.grid_columns()
    ));
    document.push_str("</style>\n</head>\n<body>\n<div class=\"label-grid\">\n");
    for label in labels {
        document.push_str(label);
        document.push('\n');
    }
    document.push_str("</div>\n</body>\n</html>\n");
    document
}

/// Compose and submit a sheet of labels.
pub fn print_labels(
    barcodes: &[ProductBarcodes],
    format: BarcodeFormat,
    template: PrintTemplate,
    title: &str,
    options: &LabelOptions,
    surface: &mut dyn PrintSurface,
) -> Result<PrintJob> {
    let labels: Vec<String> = barcodes
        .par_iter()
        .map(|barcode| render_label(barcode, format, template, options))
        .collect();

    let job = PrintJob {
        title: title.to_string(),
        document: compose_document(title, template, &labels),
        label_count: labels.len(),
        created_at: Local::now(),
    };
    surface.submit(&job)?;

    info!(
        title,
        labels = job.label_count,
        %format,
        %template,
        "Submitted print job"
    );
    Ok(job)
}

/// Print labels from stored QR payloads, usually with
/// [`BarcodeFormat::Qr`]. Unreadable payloads print as `UNKNOWN`.
pub fn print_qr_codes(
    payloads: &[String],
    format: BarcodeFormat,
    title: &str,
    template: PrintTemplate,
    surface: &mut dyn PrintSurface,
) -> Result<PrintJob> {
    let barcodes: Vec<ProductBarcodes> = payloads
        .iter()
        .map(|payload| ProductBarcodes::from_qr_payload(payload))
        .collect();
    print_labels(
        &barcodes,
        format,
        template,
        title,
        &LabelOptions::default(),
        surface,
    )
}

/// Print labels straight from SKUs. Fails before printing anything if a
/// SKU cannot be encoded.
pub fn quick_print(
    skus: &[String],
    format: BarcodeFormat,
    template: PrintTemplate,
    surface: &mut dyn PrintSurface,
) -> Result<PrintJob> {
    let barcodes = skus
        .iter()
        .map(|sku| ProductBarcodes::quick(sku))
        .collect::<Result<Vec<_>>>()?;
    print_labels(
        &barcodes,
        format,
        template,
        "Quick Print Labels",
        &LabelOptions::default(),
        surface,
    )
}
