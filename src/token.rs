//! # Token Parameters
//!
//! Raw parameter parsing and validation. `RawTokenParams` holds the untyped
//! input exactly as it arrived (query string, CLI flags); `validate()` turns
//! it into an immutable [`TokenDescriptor`] or a structured error. Nothing
//! downstream of validation ever sees an out-of-range value.

use serde::{Deserialize, Serialize};

use crate::error::LienzoError;

/// Number of base image variants available to [`Team::B`].
pub const VARIANT_COUNT: u8 = 4;

/// The four presentation categories. Each team has its own base artwork and
/// overlay rules; the count is fixed, so everything downstream matches on
/// this enum exhaustively instead of range-checking integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Team {
    /// Team 0: single base image, no overlays.
    A,
    /// Team 1: one of four alternate base images selected by variant.
    B,
    /// Team 2: base image plus per-digit serial overlays.
    C,
    /// Team 3: base image plus the serial drawn as text.
    D,
}

impl Team {
    /// All teams, in id order.
    pub const ALL: [Team; 4] = [Team::A, Team::B, Team::C, Team::D];

    /// Construct from a numeric team id. This is the only place an
    /// out-of-range id becomes an error; past here the type guarantees
    /// validity.
    pub fn from_index(index: u8) -> Result<Team, LienzoError> {
        match index {
            0 => Ok(Team::A),
            1 => Ok(Team::B),
            2 => Ok(Team::C),
            3 => Ok(Team::D),
            other => Err(LienzoError::InvalidTeam(other.to_string())),
        }
    }

    /// Numeric team id (0-3).
    pub fn index(self) -> u8 {
        match self {
            Team::A => 0,
            Team::B => 1,
            Team::C => 2,
            Team::D => 3,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Team::A => "Team A",
            Team::B => "Team B",
            Team::C => "Team C",
            Team::D => "Team D",
        }
    }

    /// Teams C and D show the serial on the artwork, so validation demands one.
    pub fn requires_serial(self) -> bool {
        matches!(self, Team::C | Team::D)
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> u8 {
        team.index()
    }
}

impl TryFrom<u8> for Team {
    type Error = LienzoError;

    fn try_from(value: u8) -> Result<Team, LienzoError> {
        Team::from_index(value)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated 6-digit serial number.
///
/// Always exactly six ASCII digits; leading zeros are significant for
/// display ("000123" renders as "000123") but not for the numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Serial(String);

impl Serial {
    /// Parse a serial string, accepting exactly 6 ASCII digits.
    pub fn parse(raw: &str) -> Result<Serial, LienzoError> {
        if raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Serial(raw.to_string()))
        } else {
            Err(LienzoError::InvalidSerial(raw.to_string()))
        }
    }

    /// The serial exactly as entered, leading zeros included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value in 0..=999999.
    pub fn value(&self) -> u32 {
        // Validated to be 6 ASCII digits, so this cannot fail.
        self.0.parse().unwrap_or(0)
    }

    /// Decompose into the (hundreds, tens, ones) decimal positions used for
    /// digit overlay selection. The hundreds component carries everything
    /// above the tens place, so `h * 100 + t * 10 + o` always reproduces
    /// [`value`](Serial::value).
    pub fn digit_positions(&self) -> (u32, u32, u32) {
        let n = self.value();
        (n / 100, (n % 100) / 10, n % 10)
    }
}

impl From<Serial> for String {
    fn from(serial: Serial) -> String {
        serial.0
    }
}

impl TryFrom<String> for Serial {
    type Error = LienzoError;

    fn try_from(value: String) -> Result<Serial, LienzoError> {
        Serial::parse(&value)
    }
}

impl std::fmt::Display for Serial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully validated, immutable render parameters.
///
/// Constructed once per render request via [`RawTokenParams::validate`] and
/// never mutated. `revealed` is the explicit override; `None` defers to the
/// process-wide [`RevealSchedule`](crate::reveal::RevealSchedule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDescriptor {
    pub team: Team,
    /// Alternate-artwork selector, meaningful for [`Team::B`] only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<Serial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed: Option<bool>,
}

impl TokenDescriptor {
    /// Effective reveal state: the explicit override when present, otherwise
    /// the schedule evaluated at `now`.
    pub fn is_revealed(
        &self,
        schedule: &crate::reveal::RevealSchedule,
        now: chrono::DateTime<chrono::Utc>,
    ) -> bool {
        self.revealed.unwrap_or_else(|| schedule.is_revealed(now))
    }
}

/// Untyped token parameters, exactly as they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTokenParams {
    pub team: Option<String>,
    pub variant: Option<String>,
    pub serial: Option<String>,
    pub revealed: Option<String>,
}

impl RawTokenParams {
    /// Parse a `key=value&key=value` query string. Unknown keys are ignored;
    /// the first occurrence of a key wins. No percent-decoding is performed
    /// (none of the accepted values need it).
    pub fn from_query(query: &str) -> RawTokenParams {
        let mut params = RawTokenParams::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            let slot = match key {
                "team" => &mut params.team,
                "variant" => &mut params.variant,
                "serial" => &mut params.serial,
                "revealed" => &mut params.revealed,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        params
    }

    /// Validate into a [`TokenDescriptor`].
    ///
    /// Pure function of the input: no I/O, no clock reads. Team is checked
    /// first; an invalid team fails the whole descriptor before any other
    /// field is interpreted.
    pub fn validate(&self) -> Result<TokenDescriptor, LienzoError> {
        let team_raw = self.team.as_deref().ok_or(LienzoError::MissingTeam)?;
        let team = team_raw
            .parse::<u8>()
            .map_err(|_| LienzoError::InvalidTeam(team_raw.to_string()))
            .and_then(Team::from_index)
            .map_err(|_| LienzoError::InvalidTeam(team_raw.to_string()))?;

        let variant = match self.variant.as_deref() {
            None => None,
            Some(raw) => {
                let v = raw
                    .parse::<u8>()
                    .map_err(|_| LienzoError::InvalidVariant(raw.to_string()))?;
                if v >= VARIANT_COUNT {
                    return Err(LienzoError::InvalidVariant(raw.to_string()));
                }
                Some(v)
            }
        };

        let serial = match self.serial.as_deref() {
            None if team.requires_serial() => {
                return Err(LienzoError::MissingSerial(team.index()));
            }
            None => None,
            Some(raw) => Some(Serial::parse(raw)?),
        };

        // "true" and "1" are the only truthy forms; any other present value
        // is an explicit false, absence defers to the reveal schedule.
        let revealed = self
            .revealed
            .as_deref()
            .map(|raw| raw == "true" || raw == "1");

        Ok(TokenDescriptor {
            team,
            variant,
            serial,
            revealed,
        })
    }
}
