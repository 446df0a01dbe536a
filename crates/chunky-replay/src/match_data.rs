//! Match-data chunk: game type, roster, and match identifiers.

use chunky_core::format::{
    GAME_TYPE_VERSION, MATCH_DATA_RESERVED_LEN, MATCH_HISTORY_GAP_LEN, OPTION_GAP_LEN,
};
use chunky_core::{GameType, PlayerOrdinal};
use uuid::Uuid;

use crate::config::DecodeConfig;
use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::roster::{decode_player, PlayerRecord};

/// Match-level fields and the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchData {
    /// How the match was set up.
    pub game_type: GameType,
    /// Roster in file order.
    pub players: Vec<PlayerRecord>,
    /// Stats-service match id; `None` for skirmishes or when unset.
    pub matchhistory_id: Option<u64>,
    /// Mod identifier; nil when unmodded.
    pub mod_id: Uuid,
}

/// Classify the stored game-type value for a replay of `version`.
///
/// Builds before [`GAME_TYPE_VERSION`] only record whether the match was
/// a skirmish, so everything else is reported as multiplayer.
pub fn classify_game_type(
    raw: u32,
    version: u16,
    offset: usize,
) -> Result<GameType, DecodeError> {
    if version >= GAME_TYPE_VERSION {
        GameType::from_discriminator(raw)
            .map_err(|e| DecodeError::malformed(offset, e.to_string()))
    } else if raw == GameType::Skirmish.discriminator() {
        Ok(GameType::Skirmish)
    } else {
        Ok(GameType::Multiplayer)
    }
}

/// Decode a match-data payload (chunk version 2 or later).
pub fn decode_match_data(
    cursor: &mut ByteCursor<'_>,
    version: u16,
    config: &DecodeConfig,
) -> Result<MatchData, DecodeError> {
    let game_type_offset = cursor.offset();
    let game_type = classify_game_type(cursor.read_u32_le()?, version, game_type_offset)?;
    cursor.skip(MATCH_DATA_RESERVED_LEN)?;

    let count = cursor.read_u32_le()?;
    let mut players = Vec::with_capacity(config.capacity_for(count as usize));
    for ordinal in 0..count {
        players.push(decode_player(cursor, PlayerOrdinal(ordinal))?);
    }

    cursor.skip_prefixed()?;
    cursor.skip(MATCH_HISTORY_GAP_LEN)?;
    let matchhistory = cursor.read_u64_le()?;
    cursor.skip_prefixed()?;

    // Win-condition keys: resources section and option, tickets section
    // and option. The mod id takes the place of the last gap.
    for _ in 0..3 {
        cursor.skip_prefixed()?;
        cursor.skip(OPTION_GAP_LEN)?;
    }
    cursor.skip_prefixed()?;
    let mod_id = Uuid::from_u128(cursor.read_u128_le()?);
    // Free-text match description.
    cursor.skip_prefixed()?;

    let matchhistory_id = match game_type {
        GameType::Skirmish => None,
        _ if matchhistory == 0 => None,
        _ => Some(matchhistory),
    };

    Ok(MatchData {
        game_type,
        players,
        matchhistory_id,
        mod_id,
    })
}
