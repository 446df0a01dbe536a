//! Error types for converting wire values into the closed enumerations.

use thiserror::Error;

/// A raw wire value that does not correspond to any known variant.
///
/// Returned by the fallible conversions on [`Faction`](crate::Faction),
/// [`Team`](crate::Team), and [`GameType`](crate::GameType). The decoder
/// wraps these into its own container errors with byte-offset context.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The faction key is not one of the four known factions.
    #[error("unknown faction key {key:?}")]
    UnknownFaction {
        /// The key as stored in the replay.
        key: String,
    },
    /// The team index is neither 0 nor 1.
    #[error("unknown team index {value}")]
    UnknownTeam {
        /// The raw team index.
        value: u32,
    },
    /// The game-type discriminator is not recognized.
    #[error("unknown game type discriminator {value}")]
    UnknownGameType {
        /// The raw discriminator.
        value: u32,
    },
}
