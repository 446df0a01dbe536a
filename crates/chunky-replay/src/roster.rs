//! Player roster records.

use chunky_core::format::{
    PLAYER_AI_GAP_LEN, PLAYER_FACTION_GAP_LEN, PLAYER_PROFILE_GAP_LEN, PLAYER_STEAM_GAP_LEN,
    PLAYER_TEAM_GAP_LEN, PLAYER_TRAILER_LEN,
};
use chunky_core::{Faction, PlayerOrdinal, Team};

use crate::cursor::ByteCursor;
use crate::error::DecodeError;

/// One roster entry before commands and messages are attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Position in the roster.
    pub ordinal: PlayerOrdinal,
    /// Display name.
    pub name: String,
    /// Whether a person controlled this player.
    pub human: bool,
    /// Faction played.
    pub faction: Faction,
    /// Side the player fought on.
    pub team: Team,
    /// Steam identifier; `None` for AI or when not a decimal number.
    pub steam_id: Option<u64>,
    /// Relic profile identifier; `None` for AI.
    pub profile_id: Option<u64>,
}

/// Decode one player record, assigning it `ordinal`.
pub fn decode_player(
    cursor: &mut ByteCursor<'_>,
    ordinal: PlayerOrdinal,
) -> Result<PlayerRecord, DecodeError> {
    let human = cursor.read_u8()? != 0;
    let name = cursor.read_utf16()?;

    let team_offset = cursor.offset();
    let team = Team::try_from(cursor.read_u32_le()?)
        .map_err(|e| DecodeError::malformed(team_offset, format!("player {ordinal}: {e}")))?;
    cursor.skip(PLAYER_TEAM_GAP_LEN)?;

    let faction_offset = cursor.offset();
    let faction = Faction::from_key(&cursor.read_utf8()?)
        .map_err(|e| DecodeError::malformed(faction_offset, format!("player {ordinal}: {e}")))?;
    cursor.skip(PLAYER_FACTION_GAP_LEN)?;

    // AI personality key; empty for humans.
    cursor.skip_prefixed()?;
    cursor.skip(PLAYER_AI_GAP_LEN)?;

    let profile = cursor.read_u64_le()?;
    cursor.skip(PLAYER_PROFILE_GAP_LEN)?;
    let steam = cursor.read_utf16()?;
    cursor.skip(PLAYER_STEAM_GAP_LEN)?;

    // Cosmetic loadout.
    let items = cursor.read_len()?;
    for _ in 0..items {
        cursor.skip_prefixed()?;
    }
    cursor.skip(PLAYER_TRAILER_LEN)?;

    Ok(PlayerRecord {
        ordinal,
        name,
        human,
        faction,
        team,
        steam_id: if human { steam.trim().parse().ok() } else { None },
        profile_id: human.then_some(profile),
    })
}
