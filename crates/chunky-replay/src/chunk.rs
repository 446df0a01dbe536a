//! Structural walker over nested Relic Chunky records.
//!
//! The walker knows only the container grammar: a chunk is a fixed header
//! followed by exactly `length` bytes of payload, and a `FOLD` payload is
//! itself a sequence of chunks. Callers register a handler per
//! [`ChunkTag`]; the walker hands each registered `DATA` chunk a cursor
//! scoped to its payload and skips everything else by declared length.
//!
//! Nesting is traversed with an explicit worklist bounded by
//! [`DecodeConfig::max_chunk_depth`](crate::DecodeConfig::max_chunk_depth),
//! never by recursion driven from file content.

use chunky_core::format::{CHUNK_HEADER_LEN, KIND_DATA, KIND_FOLD};
use chunky_core::ChunkTag;
use indexmap::IndexMap;

use crate::cursor::ByteCursor;
use crate::error::DecodeError;

/// Fixed header of one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Kind and id.
    pub tag: ChunkTag,
    /// Per-chunk layout version.
    pub version: u32,
    /// Declared payload length in bytes.
    pub length: u32,
    /// Informational name stored with the chunk.
    pub name: String,
    /// Absolute offset of the first header byte.
    pub offset: usize,
}

/// Callback for one registered chunk tag.
///
/// Receives the decode context, the chunk header, and a cursor over
/// exactly the chunk's payload. Container errors without a record tag are
/// tagged with the chunk's tag on the way out.
pub type ChunkHandler<C> = fn(&mut C, &ChunkHeader, ByteCursor<'_>) -> Result<(), DecodeError>;

/// Counters from one walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Chunks visited, folders included.
    pub chunks: usize,
    /// `DATA` chunks with no registered handler.
    pub skipped: usize,
}

/// Whether the cursor is positioned at a chunk header.
pub fn at_chunk(cursor: &ByteCursor<'_>) -> bool {
    cursor.peek_matches(&KIND_FOLD) || cursor.peek_matches(&KIND_DATA)
}

/// Read one chunk header and split off its payload.
pub fn read_chunk<'a>(
    cursor: &mut ByteCursor<'a>,
) -> Result<(ChunkHeader, ByteCursor<'a>), DecodeError> {
    let offset = cursor.offset();
    let kind = cursor.read_array::<4>()?;
    let id = cursor.read_array::<4>()?;
    let tag = ChunkTag::new(kind, id);
    if kind != KIND_FOLD && kind != KIND_DATA {
        return Err(DecodeError::malformed(
            offset,
            format!("expected a FOLD or DATA chunk, found {tag}"),
        ));
    }
    let version = cursor.read_u32_le()?;
    let length = cursor.read_u32_le()?;
    let name_len = cursor.read_len()?;
    if name_len > cursor.remaining() {
        return Err(DecodeError::MalformedContainer {
            offset: cursor.offset(),
            record: Some(tag),
            detail: format!(
                "declared name length {name_len} exceeds the {} bytes remaining",
                cursor.remaining()
            ),
        });
    }
    let name = String::from_utf8_lossy(cursor.read_bytes(name_len)?).into_owned();
    let payload = cursor
        .sub_cursor(length as usize)
        .map_err(|e| e.in_record(tag))?;
    Ok((
        ChunkHeader {
            tag,
            version,
            length,
            name,
            offset,
        },
        payload,
    ))
}

/// Tag-dispatching chunk walker.
pub struct ChunkWalker<C> {
    handlers: IndexMap<ChunkTag, ChunkHandler<C>>,
    max_depth: usize,
}

impl<C> ChunkWalker<C> {
    /// Walker with no handlers that rejects nesting deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            handlers: IndexMap::new(),
            max_depth,
        }
    }

    /// Register the handler for `tag`, replacing any previous one.
    pub fn on(mut self, tag: ChunkTag, handler: ChunkHandler<C>) -> Self {
        self.handlers.insert(tag, handler);
        self
    }

    /// Tags with a registered handler, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &ChunkTag> {
        self.handlers.keys()
    }

    /// Walk sibling chunks from the cursor's position for as long as the
    /// next bytes look like a chunk header, leaving the cursor just past
    /// the last one.
    pub fn walk(&self, cursor: &mut ByteCursor<'_>, ctx: &mut C) -> Result<WalkStats, DecodeError> {
        let mut stats = WalkStats::default();
        while at_chunk(cursor) {
            let (header, payload) = read_chunk(cursor)?;
            self.visit(header, payload, ctx, &mut stats)?;
        }
        Ok(stats)
    }

    fn visit<'a>(
        &self,
        header: ChunkHeader,
        payload: ByteCursor<'a>,
        ctx: &mut C,
        stats: &mut WalkStats,
    ) -> Result<(), DecodeError> {
        let mut pending = vec![(header, payload, 1usize)];
        while let Some((header, mut payload, depth)) = pending.pop() {
            stats.chunks += 1;
            if depth > self.max_depth {
                return Err(DecodeError::MalformedContainer {
                    offset: header.offset,
                    record: Some(header.tag),
                    detail: format!("chunk nesting depth {depth} exceeds limit {}", self.max_depth),
                });
            }

            if header.tag.is_folder() {
                let mut children = Vec::new();
                while !payload.is_empty() {
                    if payload.remaining() < CHUNK_HEADER_LEN {
                        return Err(DecodeError::MalformedContainer {
                            offset: payload.offset(),
                            record: Some(header.tag),
                            detail: format!(
                                "{} bytes left in folder, shorter than a {CHUNK_HEADER_LEN}-byte chunk header",
                                payload.remaining()
                            ),
                        });
                    }
                    children.push(read_chunk(&mut payload).map_err(|e| e.in_record(header.tag))?);
                }
                // Reversed so children pop in file order.
                for (child, child_payload) in children.into_iter().rev() {
                    pending.push((child, child_payload, depth + 1));
                }
            } else if let Some(handler) = self.handlers.get(&header.tag) {
                handler(ctx, &header, payload).map_err(|e| e.in_record(header.tag))?;
            } else {
                stats.skipped += 1;
                tracing::trace!(
                    tag = %header.tag,
                    version = header.version,
                    length = header.length,
                    offset = header.offset,
                    "skipping chunk"
                );
            }
        }
        Ok(())
    }
}
