//! Error types for replay decoding.

use chunky_core::ChunkTag;
use thiserror::Error;

/// Errors that terminate a decode call.
///
/// Every variant carries the absolute byte offset in the input where the
/// problem was detected. Unknown action kinds are not errors; they decode
/// to [`Command::Unknown`](crate::Command::Unknown).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read needed more bytes than remain in the enclosing bound.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Absolute offset of the attempted read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left before the bound.
        remaining: usize,
    },
    /// A declared length or required record is inconsistent with the
    /// surrounding structure.
    #[error("malformed container at offset {offset}{}: {detail}", record_suffix(.record))]
    MalformedContainer {
        /// Absolute offset where the inconsistency was detected.
        offset: usize,
        /// Tag of the chunk being decoded, if inside one.
        record: Option<ChunkTag>,
        /// Human-readable description, including expected vs. actual
        /// lengths where applicable.
        detail: String,
    },
    /// A command or chat entry names a player outside the roster.
    #[error("record at offset {offset} references player {ordinal}, but the roster has {roster_len} players")]
    UnattributedRecord {
        /// Absolute offset of the offending action or chat entry.
        offset: usize,
        /// The ordinal found in the record.
        ordinal: u32,
        /// Number of players decoded from the roster.
        roster_len: usize,
    },
    /// The replay header declares a format version outside the supported
    /// window.
    #[error("unsupported format version {found} at offset {offset} (supported {min}..={max})")]
    UnsupportedFormatVersion {
        /// Absolute offset of the version field.
        offset: usize,
        /// The version found in the file.
        found: u16,
        /// Oldest supported version.
        min: u16,
        /// Newest supported version.
        max: u16,
    },
}

impl DecodeError {
    pub(crate) fn malformed(offset: usize, detail: impl Into<String>) -> Self {
        Self::MalformedContainer {
            offset,
            record: None,
            detail: detail.into(),
        }
    }

    /// Attach the enclosing chunk tag to a container error that has none.
    pub(crate) fn in_record(self, tag: ChunkTag) -> Self {
        match self {
            Self::MalformedContainer {
                offset,
                record: None,
                detail,
            } => Self::MalformedContainer {
                offset,
                record: Some(tag),
                detail,
            },
            other => other,
        }
    }

    /// Absolute byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEof { offset, .. }
            | Self::MalformedContainer { offset, .. }
            | Self::UnattributedRecord { offset, .. }
            | Self::UnsupportedFormatVersion { offset, .. } => *offset,
        }
    }
}

fn record_suffix(record: &Option<ChunkTag>) -> String {
    match record {
        Some(tag) => format!(" in {tag}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunky_core::format::MAP_TAG;

    #[test]
    fn in_record_fills_missing_tag_only() {
        let err = DecodeError::malformed(10, "bad").in_record(MAP_TAG);
        assert_eq!(
            err,
            DecodeError::MalformedContainer {
                offset: 10,
                record: Some(MAP_TAG),
                detail: "bad".into()
            }
        );

        let inner = ChunkTag::new(*b"DATA", *b"INNR");
        let err = DecodeError::malformed(4, "bad")
            .in_record(inner)
            .in_record(MAP_TAG);
        assert!(matches!(
            err,
            DecodeError::MalformedContainer { record: Some(tag), .. } if tag == inner
        ));
    }

    #[test]
    fn display_names_the_record() {
        let err = DecodeError::malformed(7, "length 9 exceeds 3").in_record(MAP_TAG);
        assert_eq!(
            err.to_string(),
            "malformed container at offset 7 in DATASDSC: length 9 exceeds 3"
        );
        assert_eq!(err.offset(), 7);
    }
}
