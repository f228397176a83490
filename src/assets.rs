//! # Asset Catalog
//!
//! Maps a validated [`TokenDescriptor`] to the ordered list of image
//! resources that compose its artwork. Resolution is a pure function: the
//! same descriptor and reveal state always produce the same [`RenderPlan`].
//!
//! Identifiers are built from a configurable base path plus fixed relative
//! filenames. The filenames are a compatibility contract with the deployed
//! asset tree and must not be changed.

use serde::Serialize;

use crate::token::{Serial, Team, TokenDescriptor, VARIANT_COUNT};

/// Default base path when none is configured.
pub const DEFAULT_BASE_PATH: &str = "metadata";

/// Revealed base images for [`Team::B`], indexed by variant.
const TEAM_B_VARIANTS: [&str; VARIANT_COUNT as usize] = [
    "revealed/1/Gemini_Generated_Image_6vquky6vquky6vqu.png",
    "revealed/1/10UTBLC_dog.png",
    "revealed/1/100UTBLC_Cat.png",
    "revealed/1/SUBMITGemini_Generated_Image_p5loa4p5loa4p5lo.png",
];

/// The three decimal positions a serial digit overlay can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitPosition {
    Hundreds,
    Tens,
    Ones,
}

impl DigitPosition {
    /// Subdirectory holding the overlays for this position.
    fn dir(self) -> &'static str {
        match self {
            DigitPosition::Hundreds => "hundredsDigit",
            DigitPosition::Tens => "tensDigit",
            DigitPosition::Ones => "onesDigit",
        }
    }

    /// Overlay filename for a digit at this position. Placeholder characters
    /// encode the position: `3XX.png`, `X7X.png`, `XX2.png`.
    fn filename(self, digit: u32) -> String {
        match self {
            DigitPosition::Hundreds => format!("{digit}XX.png"),
            DigitPosition::Tens => format!("X{digit}X.png"),
            DigitPosition::Ones => format!("XX{digit}.png"),
        }
    }
}

/// Ordered image resources for one render.
///
/// Index 0 is always the base image; later entries are overlays painted
/// strictly in list order, each over the previous ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderPlan {
    resources: Vec<String>,
}

impl RenderPlan {
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The base/background resource.
    pub fn base(&self) -> &str {
        &self.resources[0]
    }

    /// Overlay resources, in paint order.
    pub fn overlays(&self) -> &[String] {
        &self.resources[1..]
    }
}

/// Effective image index for a [`Team::B`] variant.
///
/// Total and cyclic over any integer, so even an out-of-range value that
/// slipped past validation selects a real image instead of panicking.
pub fn variant_image_index(variant: i64) -> usize {
    variant.rem_euclid(VARIANT_COUNT as i64) as usize
}

/// Builds asset identifiers from a base path and resolves descriptors into
/// render plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    base_path: String,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        AssetCatalog::new(DEFAULT_BASE_PATH)
    }
}

impl AssetCatalog {
    pub fn new(base_path: impl Into<String>) -> AssetCatalog {
        let mut base_path = base_path.into();
        while base_path.ends_with('/') {
            base_path.pop();
        }
        AssetCatalog { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn path(&self, relative: &str) -> String {
        format!("{}/{}", self.base_path, relative)
    }

    /// Placeholder artwork shown before the reveal instant.
    pub fn unrevealed_base(&self, team: Team) -> String {
        let relative = match team {
            Team::A => "unrevealed/0a5039bdc382ac2a.png",
            Team::B => "unrevealed/B_.png",
            Team::C => "unrevealed/TeamC_before_reveal_Base.png",
            Team::D => "unrevealed/01_2.webp",
        };
        self.path(relative)
    }

    /// Final artwork shown after the reveal. `variant` selects among the
    /// four [`Team::B`] images (cyclic, default 0) and is ignored elsewhere.
    pub fn revealed_base(&self, team: Team, variant: Option<i64>) -> String {
        let relative = match team {
            Team::A => "revealed/0/6f74ea22efa59b15.png",
            Team::B => TEAM_B_VARIANTS[variant_image_index(variant.unwrap_or(0))],
            Team::C => "revealed/2/TeamC_after_reveal_Base.png",
            Team::D => "revealed/3/02.webp",
        };
        self.path(relative)
    }

    /// Full-canvas transparent overlay carrying one serial digit.
    pub fn digit_overlay(&self, position: DigitPosition, digit: u32) -> String {
        self.path(&format!("revealed/2/{}/{}", position.dir(), position.filename(digit)))
    }

    /// Resolve a descriptor into its ordered resource list.
    ///
    /// `revealed` is the effective reveal state, already combining the
    /// descriptor override with the schedule
    /// (see [`TokenDescriptor::is_revealed`]).
    pub fn resolve(&self, descriptor: &TokenDescriptor, revealed: bool) -> RenderPlan {
        if !revealed {
            return RenderPlan {
                resources: vec![self.unrevealed_base(descriptor.team)],
            };
        }

        let variant = descriptor.variant.map(i64::from);
        let mut resources = vec![self.revealed_base(descriptor.team, variant)];

        // Team C stacks one overlay per decimal position of the serial.
        // Validation guarantees a serial for team C, but the resolver stays
        // total: without one it degrades to the base image alone.
        if descriptor.team == Team::C
            && let Some(serial) = &descriptor.serial
        {
            resources.extend(self.digit_overlays(serial));
        }

        RenderPlan { resources }
    }

    fn digit_overlays(&self, serial: &Serial) -> [String; 3] {
        let (hundreds, tens, ones) = serial.digit_positions();
        [
            self.digit_overlay(DigitPosition::Hundreds, hundreds),
            self.digit_overlay(DigitPosition::Tens, tens),
            self.digit_overlay(DigitPosition::Ones, ones),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::RawTokenParams;
    use pretty_assertions::assert_eq;

    fn descriptor(query: &str) -> TokenDescriptor {
        RawTokenParams::from_query(query).validate().unwrap()
    }

    fn catalog() -> AssetCatalog {
        AssetCatalog::new("https://assets.example/metadata")
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let c = AssetCatalog::new("metadata///");
        assert_eq!(c.base_path(), "metadata");
        assert_eq!(
            c.unrevealed_base(Team::A),
            "metadata/unrevealed/0a5039bdc382ac2a.png"
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let desc = descriptor("team=2&serial=000123");
        let a = catalog().resolve(&desc, true);
        let b = catalog().resolve(&desc, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrevealed_always_single_resource() {
        for query in [
            "team=0",
            "team=1&variant=3",
            "team=2&serial=999999",
            "team=3&serial=000001",
        ] {
            let plan = catalog().resolve(&descriptor(query), false);
            assert_eq!(plan.len(), 1, "query {query:?}");
            assert!(plan.base().contains("/unrevealed/"), "query {query:?}");
        }
    }

    #[test]
    fn test_team_a_revealed() {
        let plan = catalog().resolve(&descriptor("team=0"), true);
        assert_eq!(
            plan.resources(),
            ["https://assets.example/metadata/revealed/0/6f74ea22efa59b15.png"]
        );
    }

    #[test]
    fn test_team_b_variant_selection() {
        let expectations = [
            (None, "Gemini_Generated_Image_6vquky6vquky6vqu.png"),
            (Some(0), "Gemini_Generated_Image_6vquky6vquky6vqu.png"),
            (Some(1), "10UTBLC_dog.png"),
            (Some(2), "100UTBLC_Cat.png"),
            (Some(3), "SUBMITGemini_Generated_Image_p5loa4p5loa4p5lo.png"),
        ];
        for (variant, filename) in expectations {
            let query = match variant {
                None => "team=1".to_string(),
                Some(v) => format!("team=1&variant={v}"),
            };
            let plan = catalog().resolve(&descriptor(&query), true);
            assert_eq!(plan.len(), 1);
            assert!(plan.base().ends_with(filename), "variant {variant:?}");
        }
    }

    #[test]
    fn test_variant_index_is_cyclic_over_any_integer() {
        for v in -9i64..=9 {
            assert_eq!(variant_image_index(v), v.rem_euclid(4) as usize);
        }
        assert_eq!(variant_image_index(4), 0);
        assert_eq!(variant_image_index(-1), 3);
        assert_eq!(variant_image_index(i64::MIN), 0);
    }

    #[test]
    fn test_team_c_revealed_resolves_base_plus_three_digits() {
        let plan = catalog().resolve(&descriptor("team=2&serial=000123"), true);
        assert_eq!(
            plan.resources(),
            [
                "https://assets.example/metadata/revealed/2/TeamC_after_reveal_Base.png",
                "https://assets.example/metadata/revealed/2/hundredsDigit/1XX.png",
                "https://assets.example/metadata/revealed/2/tensDigit/X2X.png",
                "https://assets.example/metadata/revealed/2/onesDigit/XX3.png",
            ]
        );
    }

    #[test]
    fn test_team_c_plan_is_four_entries_across_serial_range() {
        for serial in ["000000", "000009", "000099", "000999", "123456", "999999"] {
            let plan = catalog().resolve(&descriptor(&format!("team=2&serial={serial}")), true);
            assert_eq!(plan.len(), 4, "serial {serial:?}");
        }
    }

    #[test]
    fn test_team_c_without_serial_degrades_to_base() {
        // Unreachable through validation; the resolver still stays total.
        let desc = TokenDescriptor {
            team: Team::C,
            variant: None,
            serial: None,
            revealed: Some(true),
        };
        let plan = catalog().resolve(&desc, true);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_team_d_never_resolves_digit_images() {
        let plan = catalog().resolve(&descriptor("team=3&serial=000007"), true);
        assert_eq!(
            plan.resources(),
            ["https://assets.example/metadata/revealed/3/02.webp"]
        );
    }

    #[test]
    fn test_overlays_accessor() {
        let plan = catalog().resolve(&descriptor("team=2&serial=450607"), true);
        // 450607 -> value 450607, hundreds component 4506
        assert_eq!(
            plan.overlays(),
            [
                "https://assets.example/metadata/revealed/2/hundredsDigit/4506XX.png",
                "https://assets.example/metadata/revealed/2/tensDigit/X0X.png",
                "https://assets.example/metadata/revealed/2/onesDigit/XX7.png",
            ]
        );
    }
}
