//! # Lienzo - Token Artwork Compositor
//!
//! Lienzo renders the visual representation of a collectible token by
//! compositing one or more source images onto a canvas, chosen
//! deterministically from the token's parameters. It provides:
//!
//! - **Validation**: raw parameters into an immutable, fully-checked descriptor
//! - **Asset resolution**: descriptor into an ordered list of image resources
//! - **Concurrent loading**: fetch and decode every resource in parallel
//! - **Compositing**: per-team strategies for overlays and serial text
//!
//! ## Quick Start
//!
//! ```no_run
//! use lienzo::{
//!     assets::AssetCatalog,
//!     render::{RenderContext, render_token},
//!     source::DefaultSource,
//!     token::RawTokenParams,
//! };
//!
//! # async fn run() -> Result<(), lienzo::LienzoError> {
//! // Validate raw parameters into a descriptor
//! let descriptor = RawTokenParams::from_query("team=2&serial=000123&revealed=true")
//!     .validate()?;
//!
//! // Where the asset tree lives and how to fetch from it
//! let ctx = RenderContext::new(
//!     AssetCatalog::new("https://assets.example/metadata"),
//!     Box::new(DefaultSource::new()?),
//! );
//!
//! // Resolve, load, paint
//! let canvas = render_token(&descriptor, &ctx, chrono::Utc::now()).await?;
//! canvas.save(std::path::Path::new("token.png"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`token`] | Parameter validation and the token descriptor |
//! | [`assets`] | Asset catalog and render plan resolution |
//! | [`source`] | Fetch backends (HTTP, filesystem) |
//! | [`loader`] | Concurrent fetch-and-decode |
//! | [`render`] | Canvas, team painters, render pipeline |
//! | [`reveal`] | The process-wide reveal schedule |
//! | [`metadata`] | Token metadata JSON generation |
//! | [`error`] | Error types |
//!
//! ## Teams
//!
//! Four fixed presentation categories share one pipeline: teams 0 and 1
//! show a single base image (team 1 picks among four variants), team 2
//! stacks per-digit serial overlays, and team 3 draws the serial as text.

pub mod assets;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod render;
pub mod reveal;
pub mod source;
pub mod token;

// Re-exports for convenience
pub use error::LienzoError;
pub use render::{Canvas, RenderContext, render_token};
pub use reveal::RevealSchedule;
pub use token::{RawTokenParams, Serial, Team, TokenDescriptor};
