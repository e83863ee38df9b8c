//! # Label Pipeline
//!
//! End-to-end: configuration → SKU generation → label sheet on disk.

use rand::SeedableRng;
use rand::rngs::StdRng;
use skulabel::label::{BarcodeFormat, LabelOptions, PrintTemplate};
use skulabel::payload::ProductPayload;
use skulabel::print::{self, HtmlFileSurface};
use skulabel::{Config, ProductBarcodes, SkuGenerator, SkuRequest, raster};
use std::fs;

const CONFIG: &str = r#"{
    "template": "detailed",
    "label": {
        "company_name": "Acme Jewels",
        "show_category": true,
        "show_manufacturer": true
    },
    "manufacturers": { "Pj Gems": "PJ02", "Star Gold": "SG01" }
}"#;

fn generate(config: &Config, seed: u64) -> Vec<ProductBarcodes> {
    let mut generator = SkuGenerator::with_rng(StdRng::seed_from_u64(seed));
    [
        SkuRequest::new("Pendant", "Pj Gems", 2399, 2399.0),
        SkuRequest::new("Ring", "Star Gold", 150, 1500.5).additional_data("size 7"),
    ]
    .iter()
    .map(|request| generator.generate(request, &config.manufacturers).unwrap())
    .collect()
}

#[test]
fn config_to_sheet_on_disk() {
    let config = Config::from_json(CONFIG).unwrap();
    let barcodes = generate(&config, 1);

    assert!(barcodes[0].sku.starts_with("PE/PJ02-2399-"));
    assert!(barcodes[1].sku.starts_with("RI/SG01-0150-"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.html");
    let mut surface = HtmlFileSurface::new(&path);
    let job = print::print_labels(
        &barcodes,
        config.format,
        config.template,
        "Acme Labels",
        &config.label,
        &mut surface,
    )
    .unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, job.document);
    assert!(written.starts_with("<!DOCTYPE html>"));
    assert!(written.contains("<title>Acme Labels</title>"));
    assert!(written.contains("Acme Jewels"));
    assert!(written.contains("MRP: ₹2,399"));
    assert!(written.contains("MRP: ₹1,500.5"));
    assert!(written.contains("Pendant - Pj Gems"));
    assert!(written.contains("Ring - Star Gold"));
    assert!(written.contains("border: 2px solid #CCCCCC"));
    assert_eq!(written.matches("data:image/png;base64,").count(), 2);
}

#[test]
fn qr_sheet_from_generated_payloads() {
    let config = Config::from_json(CONFIG).unwrap();
    let barcodes = generate(&config, 2);
    let payloads: Vec<String> = barcodes.iter().map(|b| b.qr_code.clone()).collect();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qr.html");
    let mut surface = HtmlFileSurface::new(&path);
    let job = print::print_qr_codes(
        &payloads,
        BarcodeFormat::Qr,
        "QR",
        PrintTemplate::Thermal,
        &mut surface,
    )
    .unwrap();

    assert_eq!(job.label_count, 2);
    for barcode in &barcodes {
        assert!(job.document.contains(&barcode.sku));
    }
    assert!(job.document.contains("repeat(1, 1fr)"));
}

#[test]
fn payload_roundtrips_through_record() {
    let config = Config::from_json(CONFIG).unwrap();
    let barcodes = generate(&config, 3);
    let payload = ProductPayload::parse(&barcodes[1].qr_code).unwrap();
    assert_eq!(payload.mrp, "1500.50");
    assert_eq!(payload.additional_data.as_deref(), Some("size 7"));

    let json = serde_json::to_string(&barcodes[1]).unwrap();
    let back: ProductBarcodes = serde_json::from_str(&json).unwrap();
    assert_eq!(back, barcodes[1]);
}

#[test]
fn label_image_matches_symbol_width() {
    let options = LabelOptions {
        label_width: 300,
        ..Default::default()
    };
    let style = print::label_barcode_style(&options);
    let sku = "PE/PJ02-2399-AGZKO";
    let img = raster::code128_image(sku, &style).unwrap();
    assert_eq!(
        img.width() as usize,
        skulabel::code128::symbol_length(sku.len()) * style.module_width as usize
    );
    assert_eq!(img.height(), 30);
}

#[test]
fn cipher_format_prints_linear_symbol() {
    let barcodes = vec![ProductBarcodes::quick("AB/CD-0001-EFGHI").unwrap()];
    let mut surface = print::MemorySurface::new();
    let job = print::print_labels(
        &barcodes,
        BarcodeFormat::Cipher,
        PrintTemplate::Standard,
        print::DEFAULT_TITLE,
        &LabelOptions::default(),
        &mut surface,
    )
    .unwrap();
    assert!(job.document.contains("background-image: url('data:image/png;base64,"));
}
