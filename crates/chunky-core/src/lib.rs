//! Core types for the Chunky replay decoder.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the pieces shared by the decoder and the test encoder: wire-format
//! constants, identifier newtypes, the closed value enumerations
//! (faction, team, game type), and the generic key-value mapping trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod faction;
pub mod format;
pub mod game_type;
pub mod id;
pub mod mapping;
pub mod team;

pub use error::ValueError;
pub use faction::Faction;
pub use format::ChunkTag;
pub use game_type::GameType;
pub use id::PlayerOrdinal;
pub use mapping::{Mapped, Mapping, MappingError};
pub use team::Team;
