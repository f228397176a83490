//! # Canvas Surface
//!
//! The RGBA back-buffer painters draw into, plus the small amount of 2D
//! drawing state they need: a shadow that applies to text fills. Images
//! composite with source-over alpha blending; text composites from
//! anti-aliased coverage buffers produced by [`super::text`].

use image::{DynamicImage, Rgba, RgbaImage, imageops};

use crate::error::LienzoError;
use crate::render::text::TextRaster;

/// Drop-shadow parameters for text fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow {
    /// Shadow color, alpha included.
    pub color: Rgba<u8>,
    /// Blur radius in pixels.
    pub blur: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

/// An RGBA drawing surface.
///
/// Starts empty; painters size it to the base image before drawing. The
/// shadow state affects only [`fill_text`](Canvas::fill_text) and must be
/// reset by whoever set it, so it cannot leak into later draw calls.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
    shadow: Option<Shadow>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::empty()
    }
}

impl Canvas {
    /// A zero-sized surface; call [`resize`](Canvas::resize) before drawing.
    pub fn empty() -> Canvas {
        Canvas {
            pixels: RgbaImage::new(0, 0),
            shadow: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Reallocate to exact dimensions. Contents become fully transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    /// Clear to fully transparent.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Composite an image at a position, unscaled, source-over.
    pub fn draw_image(&mut self, img: &DynamicImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, img, x, y);
    }

    /// Composite an image stretched to cover the whole canvas.
    pub fn draw_image_stretched(&mut self, img: &DynamicImage) {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return;
        }
        if img.width() == w && img.height() == h {
            imageops::overlay(&mut self.pixels, img, 0, 0);
        } else {
            let scaled = img.resize_exact(w, h, imageops::FilterType::Lanczos3);
            imageops::overlay(&mut self.pixels, &scaled, 0, 0);
        }
    }

    /// Shadow applied to subsequent text fills, if any.
    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: Shadow) {
        self.shadow = Some(shadow);
    }

    /// Return the shadow state to transparent.
    pub fn reset_shadow(&mut self) {
        self.shadow = None;
    }

    /// Composite a text coverage buffer with its left edge at `x` and its
    /// vertical center on `y_middle`. When a shadow is set, the blurred and
    /// offset shadow is composited underneath the fill first.
    pub fn fill_text(&mut self, raster: &TextRaster, x: i64, y_middle: i64, color: Rgba<u8>) {
        let top = y_middle - raster.height as i64 / 2;

        if let Some(shadow) = self.shadow {
            let pad = shadow.blur as usize;
            let (blurred, bw, bh) = blur_coverage(raster, shadow.blur);
            self.composite_coverage(
                &blurred,
                bw,
                bh,
                x - pad as i64 + shadow.offset_x,
                top - pad as i64 + shadow.offset_y,
                shadow.color,
            );
        }

        self.composite_coverage(&raster.data, raster.width, raster.height, x, top, color);
    }

    fn composite_coverage(
        &mut self,
        data: &[f32],
        width: usize,
        height: usize,
        origin_x: i64,
        origin_y: i64,
        color: Rgba<u8>,
    ) {
        let canvas_w = self.width() as i64;
        let canvas_h = self.height() as i64;
        let color_alpha = color.0[3] as f32 / 255.0;

        for sy in 0..height {
            let dy = origin_y + sy as i64;
            if dy < 0 || dy >= canvas_h {
                continue;
            }
            for sx in 0..width {
                let dx = origin_x + sx as i64;
                if dx < 0 || dx >= canvas_w {
                    continue;
                }
                let coverage = data[sy * width + sx];
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = (coverage * color_alpha).clamp(0.0, 1.0);
                blend_over(
                    self.pixels.get_pixel_mut(dx as u32, dy as u32),
                    color,
                    alpha,
                );
            }
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Encode to the format implied by the path extension (PNG for `.png`).
    pub fn save(&self, path: &std::path::Path) -> Result<(), LienzoError> {
        self.pixels
            .save(path)
            .map_err(|e| LienzoError::Image(format!("Failed to save {}: {}", path.display(), e)))
    }
}

/// Source-over blend of a solid color at the given alpha onto one pixel.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, alpha: f32) {
    let sa = alpha;
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for ch in 0..3 {
        let sc = src.0[ch] as f32 / 255.0;
        let dc = dst.0[ch] as f32 / 255.0;
        let out = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst.0[ch] = (out * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Blur a coverage buffer, returning the padded result and its dimensions.
///
/// Two box-blur passes per axis approximate a Gaussian closely enough for a
/// soft text shadow. The output grows by `radius` on every side so the blur
/// has room to spill.
fn blur_coverage(raster: &TextRaster, radius: u32) -> (Vec<f32>, usize, usize) {
    let pad = radius as usize;
    let width = raster.width + 2 * pad;
    let height = raster.height + 2 * pad;
    let mut buf = vec![0.0f32; width * height];

    for y in 0..raster.height {
        let src_row = y * raster.width;
        let dst_row = (y + pad) * width + pad;
        buf[dst_row..dst_row + raster.width]
            .copy_from_slice(&raster.data[src_row..src_row + raster.width]);
    }

    if radius == 0 {
        return (buf, width, height);
    }

    let r = (radius as usize / 2).max(1);
    for _ in 0..2 {
        box_blur_horizontal(&mut buf, width, height, r);
        box_blur_vertical(&mut buf, width, height, r);
    }

    (buf, width, height)
}

fn box_blur_horizontal(buf: &mut [f32], width: usize, height: usize, r: usize) {
    let window = (2 * r + 1) as f32;
    let mut row = vec![0.0f32; width];
    for y in 0..height {
        row.copy_from_slice(&buf[y * width..(y + 1) * width]);
        for x in 0..width {
            let lo = x.saturating_sub(r);
            let hi = (x + r).min(width - 1);
            let sum: f32 = row[lo..=hi].iter().sum();
            buf[y * width + x] = sum / window;
        }
    }
}

fn box_blur_vertical(buf: &mut [f32], width: usize, height: usize, r: usize) {
    let window = (2 * r + 1) as f32;
    let mut col = vec![0.0f32; height];
    for x in 0..width {
        for y in 0..height {
            col[y] = buf[y * width + x];
        }
        for y in 0..height {
            let lo = y.saturating_sub(r);
            let hi = (y + r).min(height - 1);
            let sum: f32 = col[lo..=hi].iter().sum();
            buf[y * width + x] = sum / window;
        }
    }
}
