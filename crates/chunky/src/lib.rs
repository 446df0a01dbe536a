//! Chunky: a decoder for Company of Heroes 3 replay files.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Chunky sub-crates. For most users, adding `chunky` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use chunky::prelude::*;
//!
//! # let bytes = chunky_test_utils::fixtures::one_vs_one().build();
//! // `bytes` holds the contents of a `.rec` file.
//! let replay = decode(&bytes)?;
//! assert_eq!(replay.game_type(), GameType::Automatch);
//!
//! for player in replay.players() {
//!     let squads = player.build_commands().len();
//!     println!("{} ({}, team {}) built {squads} squads", player.name(), player.faction(), player.team().value());
//! }
//!
//! let json = replay.to_mapping()?;
//! assert_eq!(json["players"][0]["name"], "Monty");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `chunky-core` | Wire constants, ordinals, factions, teams, game types, mapping trait |
//! | [`replay`] | `chunky-replay` | Byte cursor, chunk walker, decoders, the `Replay` graph |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Wire-format constants and value types (`chunky-core`).
///
/// Contains [`types::Faction`], [`types::Team`], [`types::GameType`], and
/// the [`types::Mapped`] key-value conversion.
pub use chunky_core as types;

/// Replay decoding (`chunky-replay`).
///
/// [`replay::decode`] turns a byte buffer into a [`replay::Replay`]; the
/// lower-level [`replay::ByteCursor`] and [`replay::ChunkWalker`] are
/// available for tooling that inspects raw chunks.
pub use chunky_replay as replay;

/// Common imports for typical Chunky usage.
///
/// ```rust
/// use chunky::prelude::*;
/// ```
pub mod prelude {
    // Decoding
    pub use chunky_replay::{decode, decode_with, decode_with_stats, DecodeConfig, DecodeStats};

    // Model
    pub use chunky_replay::{Command, Map, Message, Player, Replay};

    // Value types
    pub use chunky_core::{Faction, GameType, Mapped, Mapping, PlayerOrdinal, Team};

    // Errors
    pub use chunky_core::MappingError;
    pub use chunky_replay::DecodeError;
}
