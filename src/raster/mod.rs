//! # Rasterizer
//!
//! Turns symbols into grayscale images for labels and previews.
//!
//! ## Pipeline
//!
//! ```text
//! SKU ──encode──→ EncodedSymbol ──code128_image──→ GrayImage ──to_data_url──→ data:image/png
//! payload ─────────────────────────qr_image──────→ GrayImage ──to_png───────→ PNG bytes
//! ```
//!
//! Images are black (0) on white (255). Every module of a linear symbol
//! becomes a `module_width` × `height` column of pixels.
//!
//! ## Example
//!
//! ```
//! use skulabel::raster::{self, BarcodeStyle};
//!
//! let style = BarcodeStyle { show_text: false, ..Default::default() };
//! let img = raster::code128_image("AB", &style).unwrap();
//! assert_eq!(img.width(), (10 + 11 + 22 + 11 + 11 + 2 + 10) * 2);
//! ```

mod font;

pub use font::{GlyphMetrics, generate_glyph};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageEncoder, Luma};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::code128::{self, EncodedSymbol};
use crate::error::{Result, SkulabelError};

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Geometry of a rasterized linear symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeStyle {
    /// Pixels per module.
    pub module_width: u32,
    /// Bar height in pixels.
    pub height: u32,
    /// Draw the encoded text under the bars.
    pub show_text: bool,
    /// Text cell height in pixels.
    pub font_size: u32,
    /// Gap between bars and text.
    pub text_margin: u32,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        Self {
            module_width: 2,
            height: 80,
            show_text: true,
            font_size: 12,
            text_margin: 5,
        }
    }
}

impl BarcodeStyle {
    fn text_band(&self) -> u32 {
        if self.show_text {
            self.font_size + self.text_margin
        } else {
            0
        }
    }
}

/// Encode `data` and rasterize it, with `data` as the human-readable text.
pub fn code128_image(data: &str, style: &BarcodeStyle) -> Result<GrayImage> {
    let symbol = code128::encode(data)?;
    symbol_image(&symbol, Some(data), style)
}

/// Rasterize an already encoded symbol.
///
/// `text` is drawn under the bars when `style.show_text` is set; when it
/// contains hyphens the second segment (the price code of a SKU) is bold.
pub fn symbol_image(
    symbol: &EncodedSymbol,
    text: Option<&str>,
    style: &BarcodeStyle,
) -> Result<GrayImage> {
    let module_width = style.module_width.max(1);
    let bar_height = style.height.max(1);
    let width = symbol.len() as u32 * module_width;
    let height = bar_height + style.text_band();

    let mut img = GrayImage::from_pixel(width, height, PAPER);

    for (idx, is_bar) in symbol.bars().enumerate() {
        if !is_bar {
            continue;
        }
        let x0 = idx as u32 * module_width;
        for x in x0..x0 + module_width {
            for y in 0..bar_height {
                img.put_pixel(x, y, INK);
            }
        }
    }

    if let (true, Some(text)) = (style.show_text, text) {
        draw_caption(&mut img, text, bar_height + style.text_margin, style.font_size)?;
    }

    debug!(modules = symbol.len(), width, height, "Rasterized linear symbol");
    Ok(img)
}

/// Draw `text` centred horizontally with its top edge at `top`.
fn draw_caption(img: &mut GrayImage, text: &str, top: u32, font_size: u32) -> Result<()> {
    let metrics = GlyphMetrics::for_size(font_size);
    let text_width = metrics.text_width(text);
    let mut x = (img.width() as usize).saturating_sub(text_width) / 2;

    let parts: Vec<&str> = text.split('-').collect();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            draw_glyph(img, '-', x, top as usize, metrics, false)?;
            x += metrics.char_width;
        }
        let bold = parts.len() > 1 && idx == 1;
        for ch in part.chars() {
            draw_glyph(img, ch, x, top as usize, metrics, bold)?;
            x += metrics.char_width;
        }
    }
    Ok(())
}

fn draw_glyph(
    img: &mut GrayImage,
    ch: char,
    x: usize,
    y: usize,
    metrics: GlyphMetrics,
    bold: bool,
) -> Result<()> {
    let glyph = generate_glyph(ch, metrics)?;
    let strikes = if bold { 2 } else { 1 };

    for gy in 0..metrics.char_height {
        for gx in 0..metrics.char_width {
            if glyph[gy * metrics.char_width + gx] == 0 {
                continue;
            }
            for dx in 0..strikes {
                let px = (x + gx + dx) as u32;
                let py = (y + gy) as u32;
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, INK);
                }
            }
        }
    }
    Ok(())
}

/// Rasterize `payload` as a QR symbol at error-correction level H.
///
/// The symbol plus `margin` quiet modules on each side is scaled by the
/// largest whole number of pixels per module that fits in `width`
/// (at least one).
pub fn qr_image(payload: &str, width: u32, margin: u32) -> Result<GrayImage> {
    use qrcode::{Color, EcLevel, QrCode};

    let code = QrCode::with_error_correction_level(payload, EcLevel::H)
        .map_err(|e| SkulabelError::Qr(format!("QR code generation failed: {}", e)))?;

    let qr_size = code.width() as u32;
    let modules = qr_size + 2 * margin;
    let cell_size = (width / modules).max(1);
    let pixel_size = modules * cell_size;

    let mut img = GrayImage::from_pixel(pixel_size, pixel_size, PAPER);
    for qy in 0..qr_size {
        for qx in 0..qr_size {
            if code[(qx as usize, qy as usize)] != Color::Dark {
                continue;
            }
            let x0 = (qx + margin) * cell_size;
            let y0 = (qy + margin) * cell_size;
            for y in y0..y0 + cell_size {
                for x in x0..x0 + cell_size {
                    img.put_pixel(x, y, INK);
                }
            }
        }
    }

    debug!(qr_size, cell_size, pixel_size, "Rasterized QR symbol");
    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn to_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e: image::ImageError| SkulabelError::Image(e.to_string()))?;
    Ok(png_bytes)
}

/// Encode an image as a `data:image/png;base64,` URL.
pub fn to_data_url(img: &GrayImage) -> Result<String> {
    let png = to_png(img)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}
