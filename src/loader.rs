//! # Image Loader
//!
//! Fetches and decodes every resource in a [`RenderPlan`] concurrently.
//! All fetches are issued together and the loader resumes only once every
//! one has settled; a single failure fails the whole load, naming the
//! resource that broke. Results keep plan order regardless of completion
//! order, so painters can rely on index 0 being the base image.

use futures::future::try_join_all;
use image::DynamicImage;
use tracing::debug;

use crate::assets::RenderPlan;
use crate::error::LienzoError;
use crate::source::ImageSource;

/// Fetch and decode all resources in the plan, preserving order.
///
/// No partial success: the first fetch or decode failure aborts the load.
/// Timeout policy belongs to the caller (or the source's HTTP client); the
/// loader itself never retries and never waits selectively.
pub async fn load_all(
    source: &dyn ImageSource,
    plan: &RenderPlan,
) -> Result<Vec<DynamicImage>, LienzoError> {
    let images = try_join_all(
        plan.resources()
            .iter()
            .map(|identifier| load_one(source, identifier)),
    )
    .await?;
    debug!(count = images.len(), "loaded render plan");
    Ok(images)
}

async fn load_one(
    source: &dyn ImageSource,
    identifier: &str,
) -> Result<DynamicImage, LienzoError> {
    let bytes = source.fetch(identifier).await?;
    image::load_from_memory(&bytes)
        .map_err(|e| LienzoError::Image(format!("Failed to decode {}: {}", identifier, e)))
}
