//! Match classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// How the match was set up.
///
/// Serializes and displays as a lowercase identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Offline match against AI only.
    Skirmish,
    /// Online match of unspecified kind.
    Multiplayer,
    /// Online ranked match found by matchmaking.
    Automatch,
    /// Online custom lobby.
    Custom,
}

impl GameType {
    /// Resolve the discriminator stored in match data.
    pub fn from_discriminator(value: u32) -> Result<Self, ValueError> {
        match value {
            1 => Ok(Self::Skirmish),
            2 => Ok(Self::Multiplayer),
            3 => Ok(Self::Automatch),
            4 => Ok(Self::Custom),
            _ => Err(ValueError::UnknownGameType { value }),
        }
    }

    /// The discriminator stored in match data.
    pub fn discriminator(self) -> u32 {
        match self {
            Self::Skirmish => 1,
            Self::Multiplayer => 2,
            Self::Automatch => 3,
            Self::Custom => 4,
        }
    }

    /// Stable public identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skirmish => "skirmish",
            Self::Multiplayer => "multiplayer",
            Self::Automatch => "automatch",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
