//! End-to-end pipeline tests: validate parameters, resolve assets, load
//! them from a generated on-disk tree, and paint, asserting on the final
//! pixels. The tree uses the production filenames so resolution is
//! exercised against the real layout.

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use lienzo::{
    LienzoError,
    assets::AssetCatalog,
    render::{RenderContext, render_token},
    reveal::{REVEAL_TIMESTAMP, RevealSchedule},
    source::FileSource,
    token::RawTokenParams,
};

const UNREVEALED_A: [u8; 4] = [40, 40, 40, 255];
const UNREVEALED_C: [u8; 4] = [60, 60, 60, 255];
const REVEALED_A: [u8; 4] = [200, 170, 40, 255];
const REVEALED_C: [u8; 4] = [40, 70, 170, 255];
const REVEALED_D: [u8; 4] = [20, 20, 20, 255];

fn save_solid(root: &std::path::Path, relative: &str, size: (u32, u32), rgba: [u8; 4]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(size.0, size.1, Rgba(rgba))
        .save(&path)
        .unwrap();
}

/// A transparent full-canvas overlay with one opaque marker pixel.
fn save_marker(root: &std::path::Path, relative: &str, size: (u32, u32), at: (u32, u32), rgba: [u8; 4]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut img = RgbaImage::new(size.0, size.1);
    img.put_pixel(at.0, at.1, Rgba(rgba));
    img.save(&path).unwrap();
}

/// Build the production asset layout with synthetic images.
fn asset_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    save_solid(root, "unrevealed/0a5039bdc382ac2a.png", (32, 24), UNREVEALED_A);
    save_solid(root, "unrevealed/B_.png", (32, 24), [50, 50, 50, 255]);
    save_solid(root, "unrevealed/TeamC_before_reveal_Base.png", (32, 24), UNREVEALED_C);
    save_solid(root, "unrevealed/01_2.webp", (32, 24), [70, 70, 70, 255]);

    save_solid(root, "revealed/0/6f74ea22efa59b15.png", (48, 32), REVEALED_A);
    for (variant, name) in [
        (0u8, "Gemini_Generated_Image_6vquky6vquky6vqu.png"),
        (1, "10UTBLC_dog.png"),
        (2, "100UTBLC_Cat.png"),
        (3, "SUBMITGemini_Generated_Image_p5loa4p5loa4p5lo.png"),
    ] {
        save_solid(
            root,
            &format!("revealed/1/{name}"),
            (48, 32),
            [100 + variant * 10, 0, 0, 255],
        );
    }
    save_solid(root, "revealed/2/TeamC_after_reveal_Base.png", (40, 40), REVEALED_C);
    save_marker(root, "revealed/2/hundredsDigit/1XX.png", (40, 40), (10, 10), [255, 0, 0, 255]);
    save_marker(root, "revealed/2/tensDigit/X2X.png", (40, 40), (20, 10), [0, 255, 0, 255]);
    save_marker(root, "revealed/2/onesDigit/XX3.png", (40, 40), (30, 10), [0, 0, 255, 255]);
    save_solid(root, "revealed/3/02.webp", (400, 200), REVEALED_D);

    dir
}

fn context(root: &std::path::Path) -> RenderContext {
    RenderContext::new(
        AssetCatalog::new(root.to_str().unwrap()),
        Box::new(FileSource),
    )
}

fn before_reveal() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(REVEAL_TIMESTAMP - 3600, 0).unwrap()
}

fn after_reveal() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(REVEAL_TIMESTAMP + 3600, 0).unwrap()
}

#[tokio::test]
async fn scenario_team_a_unrevealed_renders_placeholder_only() {
    let tree = asset_tree();
    let ctx = context(tree.path());
    let descriptor = RawTokenParams::from_query("team=0&revealed=false")
        .validate()
        .unwrap();

    let plan = ctx.plan(&descriptor, after_reveal());
    assert_eq!(plan.len(), 1);
    assert!(plan.base().ends_with("unrevealed/0a5039bdc382ac2a.png"));

    let canvas = render_token(&descriptor, &ctx, after_reveal()).await.unwrap();
    assert_eq!((canvas.width(), canvas.height()), (32, 24));
    for pixel in canvas.as_image().pixels() {
        assert_eq!(pixel, &Rgba(UNREVEALED_A));
    }
}

#[tokio::test]
async fn scenario_team_c_revealed_composites_digit_overlays() {
    let tree = asset_tree();
    let ctx = context(tree.path());
    let descriptor = RawTokenParams::from_query("team=2&revealed=true&serial=000123")
        .validate()
        .unwrap();

    let plan = ctx.plan(&descriptor, before_reveal());
    let suffixes = [
        "revealed/2/TeamC_after_reveal_Base.png",
        "revealed/2/hundredsDigit/1XX.png",
        "revealed/2/tensDigit/X2X.png",
        "revealed/2/onesDigit/XX3.png",
    ];
    assert_eq!(plan.len(), suffixes.len());
    for (resource, suffix) in plan.resources().iter().zip(suffixes) {
        assert!(resource.ends_with(suffix), "{resource} !~ {suffix}");
    }

    let canvas = render_token(&descriptor, &ctx, before_reveal()).await.unwrap();
    let img = canvas.as_image();
    assert_eq!((img.width(), img.height()), (40, 40));
    // Marker pixels from all three overlays, base everywhere else.
    assert_eq!(img.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
    assert_eq!(img.get_pixel(20, 10), &Rgba([0, 255, 0, 255]));
    assert_eq!(img.get_pixel(30, 10), &Rgba([0, 0, 255, 255]));
    assert_eq!(img.get_pixel(0, 0), &Rgba(REVEALED_C));
}

#[tokio::test]
async fn scenario_team_d_revealed_draws_serial_text_without_extra_fetches() {
    let tree = asset_tree();
    let ctx = context(tree.path());
    let descriptor = RawTokenParams::from_query("team=3&revealed=true&serial=000007")
        .validate()
        .unwrap();

    let plan = ctx.plan(&descriptor, before_reveal());
    assert_eq!(plan.len(), 1);
    assert!(plan.base().ends_with("revealed/3/02.webp"));

    let canvas = render_token(&descriptor, &ctx, before_reveal()).await.unwrap();
    let img = canvas.as_image();
    assert_eq!((img.width(), img.height()), (400, 200));

    let changed = img.pixels().filter(|p| *p != &Rgba(REVEALED_D)).count();
    assert!(changed > 0, "serial text left no mark");
    // Text is anchored at (65% width, 85% height); the top half stays clean.
    for y in 0..100 {
        for x in 0..400 {
            assert_eq!(img.get_pixel(x, y), &Rgba(REVEALED_D), "ink at ({x},{y})");
        }
    }
    // Shadow state never leaks out of the text draw.
    assert_eq!(canvas.shadow(), None);
}

#[tokio::test]
async fn scenario_missing_team_fails_before_any_fetch() {
    let err = RawTokenParams::from_query("serial=000123")
        .validate()
        .unwrap_err();
    assert!(matches!(err, LienzoError::MissingTeam));
    assert_eq!(err.to_string(), "Missing required parameter: team");
}

#[tokio::test]
async fn team_b_selects_variant_artwork() {
    let tree = asset_tree();
    let ctx = context(tree.path());
    let descriptor = RawTokenParams::from_query("team=1&revealed=true&variant=2")
        .validate()
        .unwrap();

    let canvas = render_token(&descriptor, &ctx, before_reveal()).await.unwrap();
    assert_eq!(canvas.as_image().get_pixel(0, 0), &Rgba([120, 0, 0, 255]));
}

#[tokio::test]
async fn reveal_state_defaults_to_the_schedule() {
    let tree = asset_tree();
    let ctx = context(tree.path()).with_schedule(RevealSchedule::default());
    let descriptor = RawTokenParams::from_query("team=0").validate().unwrap();

    let canvas = render_token(&descriptor, &ctx, before_reveal()).await.unwrap();
    assert_eq!(canvas.as_image().get_pixel(0, 0), &Rgba(UNREVEALED_A));

    let canvas = render_token(&descriptor, &ctx, after_reveal()).await.unwrap();
    assert_eq!(canvas.as_image().get_pixel(0, 0), &Rgba(REVEALED_A));
}

#[tokio::test]
async fn missing_digit_asset_fails_the_whole_render() {
    let tree = asset_tree();
    let ctx = context(tree.path());
    // Serial 000999 needs overlays the tree does not carry.
    let descriptor = RawTokenParams::from_query("team=2&revealed=true&serial=000999")
        .validate()
        .unwrap();

    let err = render_token(&descriptor, &ctx, before_reveal()).await.unwrap_err();
    assert!(matches!(err, LienzoError::Fetch(_)));
    // Whichever overlay failed first, the error names it.
    assert!(err.to_string().contains("Digit/"), "{err}");
}
