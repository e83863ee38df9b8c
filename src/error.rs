//! # Error Types
//!
//! This module defines error types used throughout the skulabel library.
//! The encoder has its own [`EncodeError`]; everything above it reports
//! through [`SkulabelError`].

use thiserror::Error;

use crate::code128::EncodeError;

/// Main error type for skulabel operations
#[derive(Debug, Error)]
pub enum SkulabelError {
    /// Code 128 encoding failed
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Missing or out-of-range SKU request fields
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Manufacturer has no code in the directory
    #[error("Manufacturer code not found for {0}")]
    ManufacturerNotFound(String),

    /// QR symbol could not be built
    #[error("QR error: {0}")]
    Qr(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// Bad configuration file or value
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for skulabel operations
pub type Result<T> = std::result::Result<T, SkulabelError>;
