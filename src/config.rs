//! # Configuration
//!
//! Label defaults and the manufacturer code table, loaded from a JSON file.
//!
//! ```json
//! {
//!   "template": "thermal",
//!   "label": { "company_name": "Acme Jewels", "label_width": 240 },
//!   "barcode": { "module_width": 3 },
//!   "manufacturers": { "Pj Gems": "PJ02", "Star Gold": "SG01" }
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SkulabelError};
use crate::label::{BarcodeFormat, LabelOptions, PrintTemplate};
use crate::raster::BarcodeStyle;
use crate::sku::StaticDirectory;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default label template.
    pub template: PrintTemplate,
    /// Default symbol format for printed labels.
    pub format: BarcodeFormat,
    /// Default label content and styling.
    pub label: LabelOptions,
    /// Style for standalone barcode images (`encode --png`).
    pub barcode: BarcodeStyle,
    /// Manufacturer name to code.
    pub manufacturers: StaticDirectory,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            SkulabelError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&text)
            .map_err(|e| SkulabelError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(
            path = %path.display(),
            manufacturers = config.manufacturers.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
