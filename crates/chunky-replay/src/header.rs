//! Replay header and chunky section framing.

use chunky_core::format::{
    CHUNKY_MAGIC, CHUNKY_MAJOR_VERSION, CHUNKY_MINOR_VERSION, CHUNKY_SIGNATURE,
    FIRST_SUPPORTED_VERSION, GAME_MAGIC, LATEST_SUPPORTED_VERSION,
};

use crate::cursor::ByteCursor;
use crate::error::DecodeError;

/// Scalars from the fixed replay header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayHeader {
    /// Game build that recorded the replay.
    pub version: u16,
    /// Recording timestamp, verbatim.
    pub timestamp: String,
}

/// Decode the replay header and skip the zero padding that follows it.
///
/// The version is checked before anything else so an unsupported file is
/// refused without interpreting any layout-dependent bytes.
pub fn decode_header(cursor: &mut ByteCursor<'_>) -> Result<ReplayHeader, DecodeError> {
    let start = cursor.offset();
    let reserved = cursor.read_u16_le()?;
    if reserved != 0 {
        return Err(DecodeError::malformed(
            start,
            format!("expected reserved header word 0, found {reserved}"),
        ));
    }

    let version_offset = cursor.offset();
    let version = cursor.read_u16_le()?;
    if !(FIRST_SUPPORTED_VERSION..=LATEST_SUPPORTED_VERSION).contains(&version) {
        return Err(DecodeError::UnsupportedFormatVersion {
            offset: version_offset,
            found: version,
            min: FIRST_SUPPORTED_VERSION,
            max: LATEST_SUPPORTED_VERSION,
        });
    }

    let magic_offset = cursor.offset();
    if cursor.read_array::<8>()? != GAME_MAGIC {
        return Err(DecodeError::malformed(
            magic_offset,
            "missing COH3_REC game magic",
        ));
    }

    let timestamp = cursor.read_utf16_nul_terminated()?;
    while cursor.peek_matches(&[0]) {
        cursor.skip(1)?;
    }

    Ok(ReplayHeader { version, timestamp })
}

/// Whether the cursor is positioned at a chunky section header.
pub fn at_section(cursor: &ByteCursor<'_>) -> bool {
    cursor.peek_matches(&CHUNKY_MAGIC)
}

/// Consume and validate a chunky section header.
pub fn decode_section_header(cursor: &mut ByteCursor<'_>) -> Result<(), DecodeError> {
    let offset = cursor.offset();
    if cursor.read_array::<12>()? != CHUNKY_MAGIC {
        return Err(DecodeError::malformed(offset, "missing Relic Chunky section magic"));
    }
    let signature = cursor.read_u32_le()?;
    let major = cursor.read_u32_le()?;
    let minor = cursor.read_u32_le()?;
    if (signature, major, minor) != (CHUNKY_SIGNATURE, CHUNKY_MAJOR_VERSION, CHUNKY_MINOR_VERSION)
    {
        return Err(DecodeError::malformed(
            offset,
            format!(
                "unexpected chunky section signature {signature:#x} version {major}.{minor}, \
                 expected {CHUNKY_SIGNATURE:#x} version {CHUNKY_MAJOR_VERSION}.{CHUNKY_MINOR_VERSION}"
            ),
        ));
    }
    Ok(())
}
