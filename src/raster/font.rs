//! Bitmap text for the human-readable line under linear symbols.
//!
//! Uses the Spleen bitmap fonts. Spleen cells are twice as tall as they are
//! wide, so a glyph for font size `n` is `n / 2` pixels wide and `n` tall.

use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

use crate::error::{Result, SkulabelError};

/// Size of one rendered character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub char_width: usize,
    pub char_height: usize,
}

impl GlyphMetrics {
    pub fn for_size(font_size: u32) -> Self {
        let char_height = (font_size as usize).max(2);
        Self {
            char_width: char_height / 2,
            char_height,
        }
    }

    /// Width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> usize {
        text.chars().count() * self.char_width
    }
}

/// Glyph bitmap for `ch`, one byte per pixel (1 = ink), row-major.
///
/// Sizes of 24 and up are scaled from Spleen 12x24, smaller sizes from
/// Spleen 6x12. Characters missing from the font render as an outlined box.
pub fn generate_glyph(ch: char, metrics: GlyphMetrics) -> Result<Vec<u8>> {
    let (data, src_w, src_h): (&[u8], usize, usize) = if metrics.char_height >= 24 {
        (FONT_12X24, 12, 24)
    } else {
        (FONT_6X12, 6, 12)
    };

    let mut spleen = PSF2Font::new(data)
        .map_err(|_| SkulabelError::Image("Failed to load Spleen font".to_string()))?;

    let mut glyph = vec![0u8; metrics.char_width * metrics.char_height];
    let utf8 = ch.to_string();

    match spleen.glyph_for_utf8(utf8.as_bytes()) {
        Some(spleen_glyph) => {
            let mut src_bitmap = vec![0u8; src_w * src_h];
            for (row_y, row) in spleen_glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < src_h && col_x < src_w {
                        src_bitmap[row_y * src_w + col_x] = u8::from(on);
                    }
                }
            }
            scale_bitmap(
                &src_bitmap,
                src_w,
                src_h,
                &mut glyph,
                metrics.char_width,
                metrics.char_height,
            );
        }
        None => draw_box(&mut glyph, metrics.char_width, metrics.char_height),
    }

    Ok(glyph)
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst: &mut [u8],
    dst_w: usize,
    dst_h: usize,
) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    if width == 0 || height == 0 {
        return;
    }
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
