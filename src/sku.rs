//! # SKU Generation
//!
//! Builds product SKUs and the symbols printed for them.
//!
//! ## SKU Format
//!
//! ```text
//! PE/PJ02-2399-AGZKO
//! ├┘ ├──┘ ├──┘ └───┴─ five random letters A-Z
//! │  │    └────────── price code, zero-padded to four digits
//! │  └─────────────── manufacturer code (from the directory)
//! └────────────────── first two letters of the category, uppercased
//! ```
//!
//! Uniqueness is probabilistic (26^5 suffixes per prefix); collisions are
//! left to the caller.
//!
//! ## Example
//!
//! ```
//! use skulabel::sku::{SkuGenerator, SkuRequest, StaticDirectory};
//!
//! let directory = StaticDirectory::from_iter([("Pj Gems", "PJ02")]);
//! let mut generator = SkuGenerator::new();
//! let barcodes = generator
//!     .generate(&SkuRequest::new("Pendant", "Pj Gems", 2399, 2399.0), &directory)
//!     .unwrap();
//! assert!(barcodes.sku.starts_with("PE/PJ02-2399-"));
//! ```

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::code128::{self, EncodedSymbol};
use crate::error::{Result, SkulabelError};
use crate::payload::ProductPayload;

/// Length of the random suffix.
pub const RANDOM_SUFFIX_LEN: usize = 5;

/// Lookup of short manufacturer codes by manufacturer name.
pub trait ManufacturerDirectory {
    /// Code for `name`, or `None` if the manufacturer is unknown.
    fn code_for(&self, name: &str) -> Option<String>;
}

/// In-memory manufacturer directory, usually loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticDirectory {
    codes: BTreeMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a manufacturer code.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.codes.insert(name.into(), code.into());
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for StaticDirectory {
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        Self {
            codes: iter
                .into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
        }
    }
}

impl ManufacturerDirectory for StaticDirectory {
    fn code_for(&self, name: &str) -> Option<String> {
        self.codes
            .get(name)
            .filter(|code| !code.is_empty())
            .cloned()
    }
}

/// Inputs for one product SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuRequest {
    pub category: String,
    pub manufacturer: String,
    /// Price code, printed zero-padded to four digits.
    pub price_code: u32,
    /// Retail price carried in the QR payload.
    pub retail_price: f64,
    /// Design number. Accepted for record keeping; not part of the SKU.
    pub design_code: Option<u32>,
    pub additional_data: String,
}

impl SkuRequest {
    pub fn new(
        category: impl Into<String>,
        manufacturer: impl Into<String>,
        price_code: u32,
        retail_price: f64,
    ) -> Self {
        Self {
            category: category.into(),
            manufacturer: manufacturer.into(),
            price_code,
            retail_price,
            design_code: None,
            additional_data: String::new(),
        }
    }

    /// Attach free-form data to the QR payload.
    pub fn additional_data(mut self, data: impl Into<String>) -> Self {
        self.additional_data = data.into();
        self
    }

    pub fn design_code(mut self, code: u32) -> Self {
        self.design_code = Some(code);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() || self.manufacturer.trim().is_empty() {
            return Err(SkulabelError::InvalidRequest(
                "category and manufacturer are required for barcode generation".to_string(),
            ));
        }
        if self.price_code == 0 || self.retail_price.is_nan() || self.retail_price <= 0.0 {
            return Err(SkulabelError::InvalidRequest(
                "price code and retail price must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything printed for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBarcodes {
    pub sku: String,
    /// JSON payload for the QR symbol.
    pub qr_code: String,
    /// Linear symbol for the SKU, absent for QR-only records.
    pub code128: Option<EncodedSymbol>,
    /// Plain-text form of the SKU.
    pub cipher: String,
}

impl ProductBarcodes {
    /// Record for an existing SKU with no price information.
    pub fn quick(sku: &str) -> Result<Self> {
        Ok(Self {
            sku: sku.to_string(),
            qr_code: ProductPayload::minimal(sku).to_json()?,
            code128: Some(code128::encode(sku)?),
            cipher: sku.to_string(),
        })
    }

    /// Record for a scanned or stored QR payload. Unreadable payloads
    /// become an `UNKNOWN` SKU instead of failing.
    pub fn from_qr_payload(json: &str) -> Self {
        let payload = ProductPayload::parse_or_unknown(json);
        Self {
            sku: payload.sku.clone(),
            qr_code: json.to_string(),
            code128: None,
            cipher: payload.sku,
        }
    }
}

/// Generates SKUs with a random suffix.
pub struct SkuGenerator<R: Rng = ThreadRng> {
    rng: R,
}

impl SkuGenerator<ThreadRng> {
    /// Generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for SkuGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SkuGenerator<R> {
    /// Generator backed by a caller-supplied RNG (e.g. a seeded one in tests).
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Five uniform random uppercase letters.
    pub fn random_suffix(&mut self) -> String {
        (0..RANDOM_SUFFIX_LEN)
            .map(|_| (b'A' + self.rng.random_range(0..26u8)) as char)
            .collect()
    }

    /// Build the SKU string for a validated request and manufacturer code.
    pub fn sku_for(&mut self, request: &SkuRequest, manufacturer_code: &str) -> String {
        let category_code: String = request
            .category
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        format!(
            "{}/{}-{:04}-{}",
            category_code,
            manufacturer_code,
            request.price_code,
            self.random_suffix()
        )
    }

    /// Generate a SKU and its QR payload and Code 128 symbol.
    pub fn generate(
        &mut self,
        request: &SkuRequest,
        directory: &dyn ManufacturerDirectory,
    ) -> Result<ProductBarcodes> {
        request.validate()?;

        let manufacturer_code = directory
            .code_for(&request.manufacturer)
            .ok_or_else(|| SkulabelError::ManufacturerNotFound(request.manufacturer.clone()))?;

        let sku = self.sku_for(request, &manufacturer_code);
        debug!(%sku, design_code = ?request.design_code, "Generated SKU");

        let payload = ProductPayload::new(
            sku.as_str(),
            request.category.as_str(),
            request.manufacturer.as_str(),
            request.retail_price,
            request.additional_data.as_str(),
        );
        let symbol = code128::encode(&sku)?;

        info!(%sku, modules = symbol.len(), "Generated product barcodes");

        Ok(ProductBarcodes {
            qr_code: payload.to_json()?,
            code128: Some(symbol),
            cipher: sku.clone(),
            sku,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn directory() -> StaticDirectory {
        StaticDirectory::from_iter([("Pj Gems", "PJ02"), ("Blank", "")])
    }

    fn generator() -> SkuGenerator<StdRng> {
        SkuGenerator::with_rng(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_sku_shape() {
        let request = SkuRequest::new("pendant", "Pj Gems", 42, 99.0);
        let barcodes = generator().generate(&request, &directory()).unwrap();

        let (prefix, suffix) = barcodes.sku.split_at("PE/PJ02-0042-".len());
        assert_eq!(prefix, "PE/PJ02-0042-");
        assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase()));
        assert_eq!(barcodes.cipher, barcodes.sku);
    }

    #[test]
    fn test_same_seed_same_sku() {
        let request = SkuRequest::new("Ring", "Pj Gems", 1200, 1200.0);
        let a = generator().generate(&request, &directory()).unwrap();
        let b = generator().generate(&request, &directory()).unwrap();
        assert_eq!(a.sku, b.sku);
    }

    #[test]
    fn test_symbol_encodes_sku() {
        let request = SkuRequest::new("Ring", "Pj Gems", 1200, 1200.0);
        let barcodes = generator().generate(&request, &directory()).unwrap();
        let symbol = barcodes.code128.unwrap();
        assert_eq!(symbol, code128::encode(&barcodes.sku).unwrap());
    }

    #[test]
    fn test_payload_carries_details() {
        let request = SkuRequest::new("Ring", "Pj Gems", 1200, 1234.5).additional_data("18k");
        let barcodes = generator().generate(&request, &directory()).unwrap();
        let payload = ProductPayload::parse(&barcodes.qr_code).unwrap();
        assert_eq!(payload.sku, barcodes.sku);
        assert_eq!(payload.category.as_deref(), Some("Ring"));
        assert_eq!(payload.manufacturer.as_deref(), Some("Pj Gems"));
        assert_eq!(payload.mrp, "1234.50");
        assert_eq!(payload.additional_data.as_deref(), Some("18k"));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let request = SkuRequest::new("", "Pj Gems", 1, 1.0);
        assert!(matches!(
            generator().generate(&request, &directory()),
            Err(SkulabelError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_non_positive_prices_rejected() {
        for request in [
            SkuRequest::new("Ring", "Pj Gems", 0, 10.0),
            SkuRequest::new("Ring", "Pj Gems", 10, 0.0),
            SkuRequest::new("Ring", "Pj Gems", 10, f64::NAN),
        ] {
            assert!(matches!(
                generator().generate(&request, &directory()),
                Err(SkulabelError::InvalidRequest(_))
            ));
        }
    }

    #[test]
    fn test_unknown_manufacturer() {
        for name in ["Nobody", "Blank"] {
            let request = SkuRequest::new("Ring", name, 10, 10.0);
            match generator().generate(&request, &directory()) {
                Err(SkulabelError::ManufacturerNotFound(n)) => assert_eq!(n, name),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_accented_category_fails_encoding() {
        let request = SkuRequest::new("épingle", "Pj Gems", 10, 10.0);
        assert!(matches!(
            generator().generate(&request, &directory()),
            Err(SkulabelError::Encode(_))
        ));
    }

    #[test]
    fn test_quick_and_qr_records() {
        let quick = ProductBarcodes::quick("AB-1").unwrap();
        assert_eq!(quick.qr_code, r#"{"sku":"AB-1","mrp":"0.00"}"#);
        assert!(quick.code128.is_some());

        let from_qr = ProductBarcodes::from_qr_payload("{broken");
        assert_eq!(from_qr.sku, "UNKNOWN");
        assert_eq!(from_qr.cipher, "UNKNOWN");
        assert_eq!(from_qr.qr_code, "{broken");
        assert_eq!(from_qr.code128, None);
    }

    #[test]
    fn test_qr_record_with_numeric_price() {
        let from_qr = ProductBarcodes::from_qr_payload(r#"{"sku":"AB-1","mrp":12}"#);
        assert_eq!(from_qr.sku, "AB-1");
        assert_eq!(from_qr.cipher, "AB-1");
    }
}
