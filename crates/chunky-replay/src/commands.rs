//! Command tick records: bundles of player actions.
//!
//! Every action shares a two-byte header (kind, owning player) after its
//! length prefix. Known kinds are decoded through a static dispatch
//! table; every other kind becomes [`Command::Unknown`] and its payload is
//! skipped by declared length, so new action kinds from a game patch
//! never desynchronize the stream.

use chunky_core::format::{
    ACTION_BUILD_GLOBAL_UPGRADE, ACTION_BUILD_SQUAD, ACTION_HEADER_LEN,
    ACTION_SELECT_BATTLEGROUP, ACTION_SELECT_BATTLEGROUP_ABILITY,
    ACTION_USE_BATTLEGROUP_ABILITY,
};
use chunky_core::PlayerOrdinal;

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::types::Command;

/// A decoded command before attribution to a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCommand {
    /// Owning player.
    pub ordinal: PlayerOrdinal,
    /// Absolute offset of the action record.
    pub offset: usize,
    /// The decoded command.
    pub command: Command,
}

/// Decodes the payload of one known action kind.
type PayloadDecoder = fn(u32, &mut ByteCursor<'_>) -> Result<Command, DecodeError>;

const PAYLOAD_DECODERS: [(u8, PayloadDecoder); 5] = [
    (ACTION_BUILD_SQUAD, build_squad),
    (ACTION_BUILD_GLOBAL_UPGRADE, build_global_upgrade),
    (ACTION_SELECT_BATTLEGROUP, select_battlegroup),
    (ACTION_SELECT_BATTLEGROUP_ABILITY, select_battlegroup_ability),
    (ACTION_USE_BATTLEGROUP_ABILITY, use_battlegroup_ability),
];

fn payload_decoder(action_type: u8) -> Option<PayloadDecoder> {
    PAYLOAD_DECODERS
        .iter()
        .find(|(known, _)| *known == action_type)
        .map(|&(_, decoder)| decoder)
}

fn build_squad(tick: u32, payload: &mut ByteCursor<'_>) -> Result<Command, DecodeError> {
    let pbgid = payload.read_u32_le()?;
    Ok(Command::BuildSquad { tick, pbgid })
}

fn build_global_upgrade(tick: u32, payload: &mut ByteCursor<'_>) -> Result<Command, DecodeError> {
    let pbgid = payload.read_u32_le()?;
    Ok(Command::BuildGlobalUpgrade { tick, pbgid })
}

fn select_battlegroup(tick: u32, payload: &mut ByteCursor<'_>) -> Result<Command, DecodeError> {
    let pbgid = payload.read_u32_le()?;
    Ok(Command::SelectBattlegroup { tick, pbgid })
}

fn select_battlegroup_ability(
    tick: u32,
    payload: &mut ByteCursor<'_>,
) -> Result<Command, DecodeError> {
    let pbgid = payload.read_u32_le()?;
    Ok(Command::SelectBattlegroupAbility { tick, pbgid })
}

fn use_battlegroup_ability(
    tick: u32,
    payload: &mut ByteCursor<'_>,
) -> Result<Command, DecodeError> {
    let pbgid = payload.read_u32_le()?;
    Ok(Command::UseBattlegroupAbility { tick, pbgid })
}

/// Decode one action record at `tick`.
pub fn decode_action(data: &mut ByteCursor<'_>, tick: u32) -> Result<RawCommand, DecodeError> {
    let offset = data.offset();
    let len = usize::from(data.read_u16_le()?);
    if len < ACTION_HEADER_LEN {
        return Err(DecodeError::malformed(
            offset,
            format!("action length {len} is shorter than its {ACTION_HEADER_LEN}-byte header"),
        ));
    }
    let mut action = data.sub_cursor(len)?;
    let action_type = action.read_u8()?;
    let ordinal = PlayerOrdinal::from(action.read_u8()?);

    let command = match payload_decoder(action_type) {
        Some(decode) => decode(tick, &mut action)?,
        None => {
            tracing::trace!(action_type, tick, offset, len, "unknown action kind");
            Command::Unknown { tick, action_type }
        }
    };
    Ok(RawCommand {
        ordinal,
        offset,
        command,
    })
}

/// Decode a command tick payload, appending its actions to `out`.
///
/// Returns the record's absolute tick, which must not precede
/// `previous_tick`.
pub fn decode_command_tick(
    payload: &mut ByteCursor<'_>,
    previous_tick: u32,
    out: &mut Vec<RawCommand>,
) -> Result<u32, DecodeError> {
    payload.skip(1)?;
    let tick_offset = payload.offset();
    let tick = payload.read_u32_le()?;
    if tick < previous_tick {
        return Err(DecodeError::malformed(
            tick_offset,
            format!("tick {tick} precedes the previous command tick {previous_tick}"),
        ));
    }
    payload.skip(4)?;

    let bundles = payload.read_len()?;
    for _ in 0..bundles {
        // Two reserved words and a reserved byte.
        payload.skip(9)?;
        let len = payload.read_len()?;
        let mut data = payload.sub_cursor(len)?;
        while !data.is_empty() {
            out.push(decode_action(&mut data, tick)?);
        }
    }
    Ok(tick)
}
