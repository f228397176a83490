//! # Token Metadata
//!
//! Generates the JSON metadata document published alongside each token:
//! display name, resolved artwork identifier, and a `trait_type`/`value`
//! attribute list. The artwork identifier comes from the same
//! [`AssetCatalog`] the renderer uses, so metadata and pixels can never
//! disagree about which image a token shows.

use serde::Serialize;

use crate::assets::AssetCatalog;
use crate::token::{Team, TokenDescriptor};

/// Academic year stamped on every token of this collection.
const ACADEMIC_YEAR: &str = "2025";

/// One `trait_type`/`value` attribute pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

impl Attribute {
    fn text(trait_type: &str, value: impl Into<String>) -> Attribute {
        Attribute {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Text(value.into()),
            display_type: None,
        }
    }

    fn number(trait_type: &str, value: u32) -> Attribute {
        Attribute {
            trait_type: trait_type.to_string(),
            value: AttributeValue::Number(value),
            display_type: Some("number".to_string()),
        }
    }
}

/// Attribute values are either strings or numbers on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(u32),
}

/// Token metadata document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

/// Build the metadata document for a token in the given reveal state.
pub fn token_metadata(
    descriptor: &TokenDescriptor,
    catalog: &AssetCatalog,
    revealed: bool,
) -> TokenMetadata {
    let plan = catalog.resolve(descriptor, revealed);

    let name = match &descriptor.serial {
        Some(serial) => format!("{} #{}", descriptor.team.name(), serial),
        None => descriptor.team.name().to_string(),
    };

    let mut attributes = vec![
        Attribute::text("ACADEMIC YEAR", ACADEMIC_YEAR),
        Attribute::text("TEAM", team_letter(descriptor.team)),
    ];
    if descriptor.team == Team::B
        && let Some(variant) = descriptor.variant
    {
        attributes.push(Attribute::number("VARIANT", u32::from(variant)));
    }
    if revealed && let Some(serial) = &descriptor.serial {
        attributes.push(Attribute::number("SERIAL", serial.value()));
    }

    TokenMetadata {
        name,
        image: plan.base().to_string(),
        attributes,
    }
}

fn team_letter(team: Team) -> &'static str {
    match team {
        Team::A => "A",
        Team::B => "B",
        Team::C => "C",
        Team::D => "D",
    }
}
