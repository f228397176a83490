//! # Render Pipeline
//!
//! Ties the stages together: resolve the descriptor to a plan, load every
//! image concurrently, paint. A strict two-phase operation (loading, then
//! drawing) with one suspension point, the concurrent fetch join, and a
//! single terminal error path from either phase; a failure aborts with no
//! partial canvas.
//!
//! Every render owns its descriptor, its loaded images, and its canvas.
//! Nothing is shared between concurrent renders, so any interleaving is
//! safe, and cancelling a render (dropping its future) discards its fetches
//! without ever touching another render's surface.

pub mod canvas;
pub mod team;
pub mod text;

use chrono::{DateTime, Utc};

use crate::assets::{AssetCatalog, RenderPlan};
use crate::error::LienzoError;
use crate::loader::load_all;
use crate::reveal::RevealSchedule;
use crate::source::ImageSource;
use crate::token::TokenDescriptor;

pub use canvas::{Canvas, Shadow};
pub use team::Painter;
pub use text::{SerialFont, TextRaster};

/// Injected collaborators for rendering: where assets live, how to fetch
/// them, when the reveal happens, and which font draws serials.
pub struct RenderContext {
    pub catalog: AssetCatalog,
    pub source: Box<dyn ImageSource>,
    pub schedule: RevealSchedule,
    pub font: SerialFont,
}

impl RenderContext {
    pub fn new(catalog: AssetCatalog, source: Box<dyn ImageSource>) -> RenderContext {
        RenderContext {
            catalog,
            source,
            schedule: RevealSchedule::default(),
            font: SerialFont::Bitmap,
        }
    }

    pub fn with_schedule(mut self, schedule: RevealSchedule) -> RenderContext {
        self.schedule = schedule;
        self
    }

    pub fn with_font(mut self, font: SerialFont) -> RenderContext {
        self.font = font;
        self
    }

    /// Resolve a descriptor against this context's catalog and schedule.
    pub fn plan(&self, descriptor: &TokenDescriptor, now: DateTime<Utc>) -> RenderPlan {
        let revealed = descriptor.is_revealed(&self.schedule, now);
        self.catalog.resolve(descriptor, revealed)
    }
}

/// Render a token to a populated canvas.
///
/// `now` feeds the reveal schedule when the descriptor carries no explicit
/// override; callers at the edge pass `Utc::now()`.
pub async fn render_token(
    descriptor: &TokenDescriptor,
    ctx: &RenderContext,
    now: DateTime<Utc>,
) -> Result<Canvas, LienzoError> {
    let revealed = descriptor.is_revealed(&ctx.schedule, now);
    let plan = ctx.catalog.resolve(descriptor, revealed);

    // Loading phase: one concurrent join over every resource in the plan.
    let images = load_all(ctx.source.as_ref(), &plan).await?;

    // Drawing phase.
    let mut canvas = Canvas::empty();
    Painter::for_team(descriptor.team).paint(&mut canvas, &images, descriptor, revealed, &ctx.font)?;
    Ok(canvas)
}
