//! Decode entry points.

use chunky_core::format::{MATCH_DATA_MIN_VERSION, MATCH_DATA_TAG, MAP_TAG};

use crate::aggregate::aggregate;
use crate::chunk::{ChunkHeader, ChunkWalker};
use crate::config::DecodeConfig;
use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use crate::header::{at_section, decode_header, decode_section_header};
use crate::map::decode_map;
use crate::match_data::{decode_match_data, MatchData};
use crate::ticks::decode_tick_log;
use crate::types::{Command, Map, Replay};

/// Counters describing one decode.
///
/// `commands + messages` equals the number of records attributed to
/// players in the resulting [`Replay`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Chunky sections read.
    pub sections: usize,
    /// Chunks visited, folders included.
    pub chunks: usize,
    /// Data chunks skipped without interpretation.
    pub skipped_chunks: usize,
    /// Action records decoded.
    pub commands: usize,
    /// Of those, actions of an unrecognized kind.
    pub unknown_commands: usize,
    /// Chat entries decoded.
    pub messages: usize,
    /// Tick records of an uninterpreted type.
    pub skipped_tick_records: usize,
}

/// Per-decode state filled in by chunk handlers.
struct Sections {
    version: u16,
    config: DecodeConfig,
    match_data: Option<MatchData>,
    map: Option<Map>,
}

fn on_match_data(
    ctx: &mut Sections,
    header: &ChunkHeader,
    mut payload: ByteCursor<'_>,
) -> Result<(), DecodeError> {
    if header.version < MATCH_DATA_MIN_VERSION {
        tracing::trace!(
            version = header.version,
            offset = header.offset,
            "skipping legacy match data"
        );
        return Ok(());
    }
    if ctx.match_data.is_some() {
        return Err(DecodeError::malformed(header.offset, "duplicate match data chunk"));
    }
    ctx.match_data = Some(decode_match_data(&mut payload, ctx.version, &ctx.config)?);
    Ok(())
}

fn on_map(
    ctx: &mut Sections,
    header: &ChunkHeader,
    mut payload: ByteCursor<'_>,
) -> Result<(), DecodeError> {
    if ctx.map.is_some() {
        return Err(DecodeError::malformed(header.offset, "duplicate map chunk"));
    }
    ctx.map = Some(decode_map(&mut payload)?);
    Ok(())
}

/// Decode a complete replay file with default limits.
pub fn decode(bytes: &[u8]) -> Result<Replay, DecodeError> {
    decode_with(bytes, &DecodeConfig::default())
}

/// Decode a complete replay file.
pub fn decode_with(bytes: &[u8], config: &DecodeConfig) -> Result<Replay, DecodeError> {
    decode_with_stats(bytes, config).map(|(replay, _)| replay)
}

/// Decode a complete replay file and report what was consumed.
///
/// The input must be exactly one replay: trailing bytes after the tick
/// log are a container error.
pub fn decode_with_stats(
    bytes: &[u8],
    config: &DecodeConfig,
) -> Result<(Replay, DecodeStats), DecodeError> {
    let mut cursor = ByteCursor::new(bytes);
    let header = decode_header(&mut cursor)?;
    tracing::debug!(version = header.version, bytes = bytes.len(), "decoding replay");

    let walker: ChunkWalker<Sections> = ChunkWalker::new(config.max_chunk_depth)
        .on(MATCH_DATA_TAG, on_match_data)
        .on(MAP_TAG, on_map);
    let mut sections = Sections {
        version: header.version,
        config: config.clone(),
        match_data: None,
        map: None,
    };
    let mut stats = DecodeStats::default();
    loop {
        decode_section_header(&mut cursor)?;
        let walked = walker.walk(&mut cursor, &mut sections)?;
        stats.sections += 1;
        stats.chunks += walked.chunks;
        stats.skipped_chunks += walked.skipped;
        if !at_section(&cursor) {
            break;
        }
    }

    let match_data = sections.match_data.ok_or_else(|| {
        DecodeError::MalformedContainer {
            offset: cursor.offset(),
            record: Some(MATCH_DATA_TAG),
            detail: "required match data chunk is missing".into(),
        }
    })?;
    let map = sections.map.ok_or_else(|| DecodeError::MalformedContainer {
        offset: cursor.offset(),
        record: Some(MAP_TAG),
        detail: "required map chunk is missing".into(),
    })?;

    let log = decode_tick_log(&mut cursor, config)?;
    if !cursor.is_empty() {
        return Err(DecodeError::malformed(
            cursor.offset(),
            format!("{} trailing bytes after the tick log", cursor.remaining()),
        ));
    }

    stats.commands = log.commands.len();
    stats.unknown_commands = log
        .commands
        .iter()
        .filter(|raw| matches!(raw.command, Command::Unknown { .. }))
        .count();
    stats.messages = log.messages.len();
    stats.skipped_tick_records = log.skipped_records;

    let replay = aggregate(header, match_data, map, log)?;
    tracing::debug!(
        players = replay.players().len(),
        ticks = replay.length(),
        commands = stats.commands,
        unknown = stats.unknown_commands,
        messages = stats.messages,
        "decoded replay"
    );
    Ok((replay, stats))
}
