//! The counted tick log following the chunky sections.

use chunky_core::format::{RECORD_CHAT, RECORD_COMMAND_TICK};

use crate::commands::{decode_command_tick, RawCommand};
use crate::config::DecodeConfig;
use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::messages::{decode_chat, RawMessage};

/// Everything decoded from the tick log, in stream order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickLog {
    /// Actions from every command tick.
    pub commands: Vec<RawCommand>,
    /// Chat entries.
    pub messages: Vec<RawMessage>,
    /// Number of command tick records.
    pub command_ticks: u32,
    /// Records of a type this decoder does not interpret.
    pub skipped_records: usize,
}

/// Decode the tick record count and every record it announces.
///
/// Chat entries carry the tick of the most recent command tick record
/// (0 before the first one).
pub fn decode_tick_log(
    cursor: &mut ByteCursor<'_>,
    config: &DecodeConfig,
) -> Result<TickLog, DecodeError> {
    let count = cursor.read_u32_le()?;
    let mut log = TickLog::default();
    let mut current_tick = 0;

    for _ in 0..count {
        let offset = cursor.offset();
        let record_type = cursor.read_u32_le()?;
        let len = cursor.read_len()?;
        let mut payload = cursor.sub_cursor(len)?;
        match record_type {
            RECORD_COMMAND_TICK => {
                current_tick = decode_command_tick(&mut payload, current_tick, &mut log.commands)?;
                log.command_ticks = log.command_ticks.saturating_add(1);
            }
            RECORD_CHAT => decode_chat(&mut payload, current_tick, config, &mut log.messages)?,
            other => {
                log.skipped_records += 1;
                tracing::trace!(record_type = other, offset, len, "skipping tick record");
            }
        }
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunky_test_utils::{encode_tick_log, ActionSpec, TickSpec};

    #[test]
    fn chat_uses_latest_command_tick() {
        let bytes = encode_tick_log(&[
            TickSpec::chat(vec![(0, "early")]),
            TickSpec::commands(16, vec![ActionSpec::build_squad(0, 7)]),
            TickSpec::opaque(9, vec![1, 2, 3]),
            TickSpec::commands(24, vec![]),
            TickSpec::chat(vec![(1, "late")]),
        ]);
        let mut c = ByteCursor::new(&bytes);
        let log = decode_tick_log(&mut c, &DecodeConfig::default()).unwrap();
        assert!(c.is_empty());
        assert_eq!(log.command_ticks, 2);
        assert_eq!(log.skipped_records, 1);
        assert_eq!(log.commands.len(), 1);
        let ticks: Vec<u32> = log.messages.iter().map(|m| m.message.tick()).collect();
        assert_eq!(ticks, vec![0, 24]);
    }

    #[test]
    fn record_overrunning_input_is_malformed() {
        let mut bytes = encode_tick_log(&[TickSpec::opaque(7, vec![0; 8])]);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            decode_tick_log(&mut ByteCursor::new(&bytes), &DecodeConfig::default()),
            Err(DecodeError::MalformedContainer { .. })
        ));
    }
}
