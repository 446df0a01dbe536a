//! Decoder for Company of Heroes 3 replay files.
//!
//! Turns the raw bytes of a `.rec` file into an immutable [`Replay`]:
//! match metadata, the map, the roster, and each player's chronologically
//! ordered commands and chat messages.
//!
//! # Architecture
//!
//! - [`ByteCursor`] reads bounds-checked little-endian values
//! - [`ChunkWalker`] traverses nested Relic Chunky records and dispatches
//!   known tags to their decoders
//! - [`header`], [`match_data`], [`roster`], and [`map`] decode the
//!   metadata chunks
//! - [`ticks`], [`commands`], and [`messages`] decode the tick log
//! - [`aggregate`](mod@aggregate) attributes records to players by ordinal
//!
//! Decoding is a pure function of the input: no I/O, no global state.
//! Callers read the file and may decode many files in parallel.
//!
//! # Example
//!
//! ```no_run
//! let bytes = std::fs::read("match.rec")?;
//! let replay = chunky_replay::decode(&bytes)?;
//! for player in replay.players() {
//!     println!("{} ({}) built {} squads", player.name(), player.faction(), player.build_commands().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod chunk;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod header;
pub mod map;
pub mod match_data;
pub mod messages;
pub mod roster;
pub mod ticks;
pub mod types;

pub use chunk::{ChunkHeader, ChunkWalker};
pub use config::DecodeConfig;
pub use cursor::ByteCursor;
pub use decode::{decode, decode_with, decode_with_stats, DecodeStats};
pub use error::DecodeError;
pub use types::{Command, Map, Message, Player, Replay};
