//! Wire-format constants for CoH3 replay files.
//!
//! All integers are little-endian. A file is a replay header followed by
//! one or more "Relic Chunky" sections of nested chunks, then a counted
//! log of tick records:
//!
//! ```text
//! [u16 0] [u16 version] ["COH3_REC"] [UTF-16 timestamp, NUL] [0x00 padding]
//! ["Relic Chunky" u32 sig u32 major u32 minor] [Chunk]*   (one or more sections)
//! [u32 tick record count] [TickRecord]*
//! ```
//!
//! Chunks are `[kind 4][id 4][u32 version][u32 length][u32 name len][name][payload]`,
//! where `FOLD` payloads are themselves a sequence of chunks. Tick records
//! are `[u32 type][u32 length][payload]`.

use std::fmt;

// ── Replay header ───────────────────────────────────────────────

/// Game identifier that follows the format version in the header.
pub const GAME_MAGIC: [u8; 8] = *b"COH3_REC";

/// Oldest game build whose layout this decoder understands.
pub const FIRST_SUPPORTED_VERSION: u16 = 8369;

/// Newest game build whose layout this decoder understands.
pub const LATEST_SUPPORTED_VERSION: u16 = 21283;

/// First build that stores the automatch/custom distinction.
///
/// Older replays only distinguish skirmish from multiplayer.
pub const GAME_TYPE_VERSION: u16 = 10612;

// ── Chunky sections ─────────────────────────────────────────────

/// Magic string opening every chunky section.
pub const CHUNKY_MAGIC: [u8; 12] = *b"Relic Chunky";

/// Signature word following [`CHUNKY_MAGIC`].
pub const CHUNKY_SIGNATURE: u32 = 0x001A_0A0D;

/// Chunky major version.
pub const CHUNKY_MAJOR_VERSION: u32 = 4;

/// Chunky minor version.
pub const CHUNKY_MINOR_VERSION: u32 = 1;

/// Kind of a chunk whose payload is a sequence of child chunks.
pub const KIND_FOLD: [u8; 4] = *b"FOLD";

/// Kind of a leaf chunk carrying data.
pub const KIND_DATA: [u8; 4] = *b"DATA";

/// Size of a chunk header excluding its variable-length name.
pub const CHUNK_HEADER_LEN: usize = 20;

/// Identifies a chunk by its kind (`FOLD`/`DATA`) and four-character id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag {
    /// `FOLD` or `DATA`.
    pub kind: [u8; 4],
    /// Four-character chunk id, e.g. `SDSC`.
    pub id: [u8; 4],
}

impl ChunkTag {
    /// Build a tag from its kind and id.
    pub const fn new(kind: [u8; 4], id: [u8; 4]) -> Self {
        Self { kind, id }
    }

    /// Whether the chunk's payload is a sequence of child chunks.
    pub fn is_folder(&self) -> bool {
        self.kind == KIND_FOLD
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.kind.iter().chain(self.id.iter()) {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({self})")
    }
}

/// Match data: game type, roster, match-history and mod identifiers.
pub const MATCH_DATA_TAG: ChunkTag = ChunkTag::new(KIND_DATA, *b"DATA");

/// Match-data chunks below this version are opaque and skipped.
pub const MATCH_DATA_MIN_VERSION: u32 = 2;

/// Scenario description: map filename and localization keys.
pub const MAP_TAG: ChunkTag = ChunkTag::new(KIND_DATA, *b"SDSC");

// ── Fixed gaps inside known chunks ──────────────────────────────

/// Reserved bytes after the game-type discriminator.
pub const MATCH_DATA_RESERVED_LEN: usize = 6;
/// Reserved bytes before the match-history identifier.
pub const MATCH_HISTORY_GAP_LEN: usize = 4;
/// Reserved bytes after each win-condition option string.
pub const OPTION_GAP_LEN: usize = 4;

/// Reserved bytes between team and faction.
pub const PLAYER_TEAM_GAP_LEN: usize = 5;
/// Reserved bytes between faction and AI personality.
pub const PLAYER_FACTION_GAP_LEN: usize = 8;
/// Reserved bytes between AI personality and profile id.
pub const PLAYER_AI_GAP_LEN: usize = 40;
/// Reserved bytes between profile id and Steam id.
pub const PLAYER_PROFILE_GAP_LEN: usize = 1;
/// Reserved bytes between Steam id and the item list.
pub const PLAYER_STEAM_GAP_LEN: usize = 18;
/// Reserved bytes closing a player record.
pub const PLAYER_TRAILER_LEN: usize = 4;

/// Reserved bytes opening the scenario description.
pub const MAP_PREAMBLE_LEN: usize = 121;
/// Reserved bytes between the map name and description keys.
pub const MAP_NAME_GAP_LEN: usize = 4;

// ── Tick log ────────────────────────────────────────────────────

/// Tick record carrying player actions.
pub const RECORD_COMMAND_TICK: u32 = 0;

/// Tick record carrying chat messages.
pub const RECORD_CHAT: u32 = 1;

/// Bytes of an action record after its `u16` length: type + ordinal.
pub const ACTION_HEADER_LEN: usize = 2;

/// Simulation steps per second of game time.
pub const TICKS_PER_SECOND: u32 = 8;

// ── Action-type discriminators ──────────────────────────────────

/// Squad construction at a production building.
pub const ACTION_BUILD_SQUAD: u8 = 3;
/// Faction-wide upgrade purchase.
pub const ACTION_BUILD_GLOBAL_UPGRADE: u8 = 46;
/// Battlegroup selection.
pub const ACTION_SELECT_BATTLEGROUP: u8 = 130;
/// Unlocking an ability within the chosen battlegroup.
pub const ACTION_SELECT_BATTLEGROUP_ABILITY: u8 = 131;
/// Activating an unlocked battlegroup ability.
pub const ACTION_USE_BATTLEGROUP_ABILITY: u8 = 132;
