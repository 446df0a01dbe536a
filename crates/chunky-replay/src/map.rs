//! Scenario description chunk.

use chunky_core::format::{MAP_NAME_GAP_LEN, MAP_PREAMBLE_LEN};

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::types::Map;

/// Decode the map fields from an `SDSC` payload. Trailing bytes are
/// left unread.
pub fn decode_map(cursor: &mut ByteCursor<'_>) -> Result<Map, DecodeError> {
    cursor.skip(MAP_PREAMBLE_LEN)?;
    let filename = cursor.read_utf8()?;
    let localized_name_id = cursor.read_utf16()?;
    cursor.skip(MAP_NAME_GAP_LEN)?;
    let localized_description_id = cursor.read_utf16()?;
    Ok(Map {
        filename,
        localized_name_id,
        localized_description_id,
    })
}
