//! Chat records.

use chunky_core::PlayerOrdinal;

use crate::config::DecodeConfig;
use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::types::Message;

/// A decoded chat line before attribution to a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMessage {
    /// Sending player.
    pub ordinal: PlayerOrdinal,
    /// Absolute offset of the chat entry.
    pub offset: usize,
    /// The decoded message.
    pub message: Message,
}

/// Decode a chat payload sent at `tick`, appending entries to `out`.
/// Bytes after the declared entries are skipped.
pub fn decode_chat(
    payload: &mut ByteCursor<'_>,
    tick: u32,
    config: &DecodeConfig,
    out: &mut Vec<RawMessage>,
) -> Result<(), DecodeError> {
    let count = payload.read_len()?;
    out.reserve(config.capacity_for(count));
    for _ in 0..count {
        let offset = payload.offset();
        let ordinal = PlayerOrdinal(payload.read_u32_le()?);
        let text = payload.read_utf16()?;
        out.push(RawMessage {
            ordinal,
            offset,
            message: Message { tick, text },
        });
    }
    if !payload.is_empty() {
        tracing::trace!(
            trailing = payload.remaining(),
            offset = payload.offset(),
            "ignoring trailing chat bytes"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunky_test_utils::encode_chat;

    #[test]
    fn entries_take_the_running_tick() {
        let mut bytes = encode_chat(&[(0, "gl hf"), (1, "you too")]);
        bytes.extend_from_slice(&[0xaa; 3]);
        let mut out = Vec::new();
        decode_chat(
            &mut ByteCursor::new(&bytes),
            240,
            &DecodeConfig::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].ordinal, PlayerOrdinal(0));
        assert_eq!(out[0].offset, 4);
        assert_eq!(out[1].message.text(), "you too");
        assert!(out.iter().all(|m| m.message.tick() == 240));
    }

    #[test]
    fn missing_entry_is_eof() {
        let bytes = 2u32.to_le_bytes();
        let mut out = Vec::new();
        assert!(matches!(
            decode_chat(
                &mut ByteCursor::new(&bytes),
                0,
                &DecodeConfig::default(),
                &mut out
            ),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
