//! # Team Painters
//!
//! The four per-team drawing strategies behind one `paint` entry point.
//! Teams form a closed set, so the dispatch is an exhaustive match on
//! [`Team`] rather than an open hierarchy.
//!
//! Every strategy starts the same way: size the canvas to the base image's
//! natural dimensions, clear it, and draw the base at the origin unscaled.
//! Teams A and B stop there (team B's variant choice already happened
//! during asset resolution). Team C stacks the serial digit overlays; team
//! D draws the serial as text.

use image::{DynamicImage, Rgba};
use tracing::warn;

use crate::error::LienzoError;
use crate::render::canvas::{Canvas, Shadow};
use crate::render::text::SerialFont;
use crate::token::{Team, TokenDescriptor};

/// Serial text fill: light gray, readable over most artwork.
const SERIAL_FILL: Rgba<u8> = Rgba([209, 213, 219, 255]);
/// Shadow behind the serial text: 55% black.
const SERIAL_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 140]);

/// A per-team drawing strategy. Construction is total over [`Team`]; this
/// is the single point where a team id picks a rendering behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    team: Team,
}

impl Painter {
    pub fn for_team(team: Team) -> Painter {
        Painter { team }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// Draw the token onto `canvas` from the loaded images.
    ///
    /// `images` is the loader's output for this descriptor's render plan:
    /// index 0 is the base, later entries are overlays in plan order.
    /// `revealed` is the effective reveal state the plan was resolved with.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        images: &[DynamicImage],
        descriptor: &TokenDescriptor,
        revealed: bool,
        font: &SerialFont,
    ) -> Result<(), LienzoError> {
        let base = images
            .first()
            .ok_or_else(|| LienzoError::Image("Base image not loaded".to_string()))?;

        canvas.resize(base.width(), base.height());
        canvas.clear();
        canvas.draw_image(base, 0, 0);

        match self.team {
            Team::A | Team::B => {}
            Team::C => {
                if revealed && images.len() > 1 {
                    draw_digit_overlays(canvas, &images[1..]);
                }
            }
            Team::D => {
                if revealed && let Some(serial) = &descriptor.serial {
                    draw_serial_text(canvas, serial.as_str(), font);
                }
            }
        }

        Ok(())
    }
}

/// Composite the hundreds/tens/ones overlays, each stretched to the full
/// canvas. The triplet is all-or-nothing: with fewer than three overlays
/// loaded, compositing is skipped entirely rather than drawing a partial
/// serial.
fn draw_digit_overlays(canvas: &mut Canvas, overlays: &[DynamicImage]) {
    if overlays.len() < 3 {
        warn!(
            loaded = overlays.len(),
            "incomplete digit overlay set; compositing skipped"
        );
        return;
    }
    for overlay in &overlays[..3] {
        canvas.draw_image_stretched(overlay);
    }
}

/// Draw the serial as text: size 7% of canvas width, anchored at
/// (65% width, 85% height), with a soft drop shadow for contrast. The
/// shadow state is reset immediately after the fill so it cannot affect
/// later draws.
fn draw_serial_text(canvas: &mut Canvas, serial: &str, font: &SerialFont) {
    let width = canvas.width();
    let height = canvas.height();
    let font_size = (width as f64 * 0.07) as u32;
    if font_size == 0 {
        return;
    }

    let raster = font.rasterize(serial, font_size);

    canvas.set_shadow(Shadow {
        color: SERIAL_SHADOW,
        blur: (font_size / 10).max(8),
        offset_x: 0,
        offset_y: (font_size / 30).max(4) as i64,
    });
    canvas.fill_text(
        &raster,
        (width as f64 * 0.65) as i64,
        (height as f64 * 0.85) as i64,
        SERIAL_FILL,
    );
    canvas.reset_shadow();
}
