//! # Error Types
//!
//! This module defines error types used throughout the lienzo library.

use thiserror::Error;

/// Main error type for lienzo operations.
///
/// Validation failures get dedicated variants so callers can match on the
/// exact parameter that was rejected; fetch and decode failures carry the
/// offending resource in their message.
#[derive(Debug, Error)]
pub enum LienzoError {
    /// The team parameter was not provided at all.
    #[error("Missing required parameter: team")]
    MissingTeam,

    /// The team parameter was non-numeric or outside 0-3.
    #[error("Invalid team parameter: {0} (must be 0-3)")]
    InvalidTeam(String),

    /// The variant parameter was non-numeric or outside 0-3.
    #[error("Invalid variant parameter: {0} (must be 0-3)")]
    InvalidVariant(String),

    /// The team requires a serial but none was provided.
    #[error("Team {0} requires serial parameter")]
    MissingSerial(u8),

    /// The serial was not exactly 6 ASCII digits.
    #[error("Invalid serial format: {0} (must be 6 digits)")]
    InvalidSerial(String),

    /// Invalid CLI argument or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Asset fetch failure (network, HTTP status, missing file)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Image decode or encode failure
    #[error("Image error: {0}")]
    Image(String),

    /// Font loading or rasterization failure
    #[error("Font error: {0}")]
    Font(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LienzoError {
    /// Whether this error came from parameter validation, as opposed to a
    /// failure while loading or painting.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LienzoError::MissingTeam
                | LienzoError::InvalidTeam(_)
                | LienzoError::InvalidVariant(_)
                | LienzoError::MissingSerial(_)
                | LienzoError::InvalidSerial(_)
        )
    }
}
