//! # skulabel - Product SKUs, Code 128 and Printable Labels
//!
//! skulabel generates product SKUs, encodes them as Code 128 symbols and
//! QR payloads, and composes printable label sheets. It provides:
//!
//! - **Encoder**: deterministic string → Code 128 module sequence
//! - **SKU generation**: category/manufacturer/price SKUs with a random suffix
//! - **Rasterizer**: symbols to grayscale images, PNG and data URLs
//! - **Labels**: HTML label fragments in several templates
//! - **Printing**: label sheets handed to a print surface
//!
//! ## Quick Start
//!
//! ```
//! use skulabel::{code128, raster};
//!
//! // Encode a SKU
//! let symbol = code128::encode("PE/PJ02-2399-AGZKO")?;
//! assert!(symbol.verify());
//!
//! // Render it with the SKU printed under the bars
//! let img = raster::code128_image("PE/PJ02-2399-AGZKO", &Default::default())?;
//! let png = raster::to_png(&img)?;
//! assert!(!png.is_empty());
//!
//! # Ok::<(), skulabel::error::SkulabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`code128`] | Code 128 encoder |
//! | [`payload`] | QR JSON payload |
//! | [`sku`] | SKU generation and manufacturer lookup |
//! | [`raster`] | Image rendering |
//! | [`label`] | Label HTML composition |
//! | [`print`] | Print sheet orchestration |
//! | [`config`] | JSON configuration |
//! | [`error`] | Error types |

pub mod code128;
pub mod config;
pub mod error;
pub mod label;
pub mod payload;
pub mod print;
pub mod raster;
pub mod sku;

// Re-exports for convenience
pub use code128::{EncodeError, EncodedSymbol, encode};
pub use config::Config;
pub use error::SkulabelError;
pub use sku::{ProductBarcodes, SkuGenerator, SkuRequest};
