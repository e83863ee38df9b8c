//! Label templates and symbol formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LabelOptions;

/// Which symbol goes on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    Qr,
    #[default]
    Code128,
    /// Plain SKU cipher; printed with the linear symbol.
    Cipher,
}

impl BarcodeFormat {
    /// Whether the label carries a QR symbol rather than a linear one.
    pub fn is_qr(self) -> bool {
        matches!(self, BarcodeFormat::Qr)
    }
}

impl FromStr for BarcodeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qr" => Ok(Self::Qr),
            "code128" => Ok(Self::Code128),
            "cipher" => Ok(Self::Cipher),
            other => Err(format!("unknown barcode format '{}'", other)),
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Qr => "qr",
            Self::Code128 => "code128",
            Self::Cipher => "cipher",
        })
    }
}

/// Visual style of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintTemplate {
    #[default]
    Standard,
    Compact,
    Modern,
    Minimal,
    Detailed,
    /// Single-column roll labels.
    Thermal,
}

impl PrintTemplate {
    pub const ALL: [PrintTemplate; 6] = [
        Self::Standard,
        Self::Compact,
        Self::Modern,
        Self::Minimal,
        Self::Detailed,
        Self::Thermal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Compact => "compact",
            Self::Modern => "modern",
            Self::Minimal => "minimal",
            Self::Detailed => "detailed",
            Self::Thermal => "thermal",
        }
    }

    /// Labels per row on the print sheet.
    pub fn grid_columns(self) -> usize {
        match self {
            Self::Thermal => 1,
            _ => 3,
        }
    }

    /// CSS declarations appended to the label container.
    pub fn style(self, options: &LabelOptions) -> String {
        match self {
            Self::Thermal => format!(
                "border: none; padding: 5px; width: {}px; height: auto; min-height: {}px;",
                options.label_width, options.label_height
            ),
            Self::Modern => "border-radius: 5px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); \
                 background: linear-gradient(to bottom, #FFFFFF, #F8F8F8); padding: 12px;"
                .to_string(),
            Self::Minimal => {
                "border: none; padding: 5px; background-color: transparent;".to_string()
            }
            Self::Detailed => format!(
                "border-radius: 0; border: 2px solid {}; padding: 15px; background-color: {};",
                options.border_color, options.background_color
            ),
            Self::Compact => format!(
                "padding: 5px; height: {}px; width: {}px;",
                options.label_height as f64 * 0.8,
                options.label_width as f64 * 0.8
            ),
            Self::Standard => format!("border: 1px solid {}; padding: 10px;", options.border_color),
        }
    }
}

impl FromStr for PrintTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| format!("unknown template '{}'", s))
    }
}

impl fmt::Display for PrintTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
