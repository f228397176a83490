//! # Serial Text Rasterization
//!
//! Renders a serial string to an anti-aliased f32 coverage buffer that the
//! canvas composites (and shadows) as a unit. Two font backends:
//!
//! - **Bitmap** (default): the embedded Spleen 12x24 font scaled
//!   nearest-neighbor to the target size. Self-contained and byte-for-byte
//!   deterministic, which the test suite relies on.
//! - **Ttf**: a TrueType font supplied by the caller, rasterized with
//!   ab_glyph for smooth edges at large sizes.

use ab_glyph::{Font, FontArc, ScaleFont};
use spleen_font::{FONT_12X24, PSF2Font};

use crate::error::LienzoError;

/// Spleen glyph cell dimensions.
const BITMAP_CELL_W: usize = 12;
const BITMAP_CELL_H: usize = 24;

/// Rendered text as a grayscale coverage buffer.
///
/// Intensity values: 0.0 = untouched, 1.0 = fully covered, with
/// intermediate values for anti-aliased edges.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

/// Font used for drawing serials onto the canvas.
#[derive(Debug)]
pub enum SerialFont {
    /// Embedded Spleen bitmap font, scaled to size.
    Bitmap,
    /// Caller-supplied TrueType font.
    Ttf(FontArc),
}

impl Default for SerialFont {
    fn default() -> Self {
        SerialFont::Bitmap
    }
}

impl SerialFont {
    /// Load a TrueType font from disk.
    pub fn from_file(path: &std::path::Path) -> Result<SerialFont, LienzoError> {
        let bytes = std::fs::read(path)
            .map_err(|e| LienzoError::Font(format!("Failed to read {}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| LienzoError::Font(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(SerialFont::Ttf(font))
    }

    /// Rasterize a line of text at the given pixel height.
    pub fn rasterize(&self, text: &str, pixel_height: u32) -> TextRaster {
        match self {
            SerialFont::Bitmap => rasterize_bitmap(text, pixel_height),
            SerialFont::Ttf(font) => rasterize_ttf(text, font, pixel_height as f32),
        }
    }
}

/// Render with the embedded Spleen font, scaling each 12x24 glyph cell to
/// the target height with nearest-neighbor sampling.
fn rasterize_bitmap(text: &str, pixel_height: u32) -> TextRaster {
    let height = (pixel_height as usize).max(1);
    // Keep the cell's 1:2 aspect ratio.
    let char_width = height.div_ceil(2);
    let width = (char_width * text.chars().count()).max(1);
    let mut data = vec![0.0f32; width * height];

    // Static font data; construction cannot fail.
    let mut spleen = PSF2Font::new(FONT_12X24).unwrap();

    for (i, ch) in text.chars().enumerate() {
        let utf8 = ch.to_string();
        let Some(glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) else {
            continue;
        };

        let mut cell = [0u8; BITMAP_CELL_W * BITMAP_CELL_H];
        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < BITMAP_CELL_H && col_x < BITMAP_CELL_W && on {
                    cell[row_y * BITMAP_CELL_W + col_x] = 1;
                }
            }
        }

        let origin_x = i * char_width;
        for dy in 0..height {
            let sy = dy * BITMAP_CELL_H / height;
            for dx in 0..char_width {
                let sx = dx * BITMAP_CELL_W / char_width;
                if cell[sy * BITMAP_CELL_W + sx] == 1 {
                    data[dy * width + origin_x + dx] = 1.0;
                }
            }
        }
    }

    TextRaster {
        width,
        height,
        data,
    }
}

/// Render with a TrueType font via ab_glyph.
fn rasterize_ttf(text: &str, font: &FontArc, pixel_height: f32) -> TextRaster {
    let scaled = font.as_scaled(pixel_height);

    // Layout: compute glyph positions along one line.
    let mut glyphs = Vec::new();
    let mut caret_x = 0.0f32;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        glyphs.push((glyph_id, caret_x));
        caret_x += scaled.h_advance(glyph_id);
    }

    let width = (caret_x.ceil() as usize).max(1);
    let ascent = scaled.ascent();
    let descent = scaled.descent();
    let height = ((ascent - descent).ceil() as usize).max(1);
    let baseline_y = ascent;

    let mut data = vec![0.0f32; width * height];

    for &(glyph_id, glyph_x) in &glyphs {
        let glyph =
            glyph_id.with_scale_and_position(pixel_height, ab_glyph::point(glyph_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let idx = y as usize * width + x as usize;
                    data[idx] = (data[idx] + coverage).min(1.0);
                }
            });
        }
    }

    TextRaster {
        width,
        height,
        data,
    }
}
