//! Playable factions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// One of the four factions a player can field.
///
/// Serializes and displays as its stable identifier (`"Americans"`,
/// `"British"`, `"Wehrmacht"`, `"AfrikaKorps"`). The replay itself stores
/// an internal key; see [`Faction::from_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// US Forces.
    Americans,
    /// British Forces.
    British,
    /// Wehrmacht.
    Wehrmacht,
    /// Deutsches Afrikakorps.
    AfrikaKorps,
}

impl Faction {
    /// All factions in declaration order.
    pub const ALL: [Faction; 4] = [
        Faction::Americans,
        Faction::British,
        Faction::Wehrmacht,
        Faction::AfrikaKorps,
    ];

    /// Resolve the internal key stored in player records.
    pub fn from_key(key: &str) -> Result<Self, ValueError> {
        match key {
            "americans" => Ok(Self::Americans),
            "british_africa" => Ok(Self::British),
            "germans" => Ok(Self::Wehrmacht),
            "afrika_korps" => Ok(Self::AfrikaKorps),
            _ => Err(ValueError::UnknownFaction {
                key: key.to_string(),
            }),
        }
    }

    /// The internal key stored in player records.
    pub fn key(self) -> &'static str {
        match self {
            Self::Americans => "americans",
            Self::British => "british_africa",
            Self::Wehrmacht => "germans",
            Self::AfrikaKorps => "afrika_korps",
        }
    }

    /// Stable public identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Americans => "Americans",
            Self::British => "British",
            Self::Wehrmacht => "Wehrmacht",
            Self::AfrikaKorps => "AfrikaKorps",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
