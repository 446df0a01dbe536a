//! Little-endian writers mirroring the decoder's reads.
//!
//! Everything appends to a `Vec<u8>`, so none of it can fail.

use chunky_core::format::{
    CHUNKY_MAGIC, CHUNKY_MAJOR_VERSION, CHUNKY_MINOR_VERSION, CHUNKY_SIGNATURE, CHUNK_HEADER_LEN,
};

/// Filler written into reserved gaps. Non-zero so a decoder that reads a
/// gap as data sees garbage rather than a plausible zero.
pub const GAP_FILL: u8 = 0x5a;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(out: &mut Vec<u8>, v: u8) {
    out.push(v);
}

/// Write a little-endian u16.
pub fn write_u16_le(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Write a little-endian u32.
pub fn write_u32_le(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Write a little-endian u64.
pub fn write_u64_le(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Write a little-endian u128.
pub fn write_u128_le(out: &mut Vec<u8>, v: u128) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Write `n` reserved bytes.
pub fn write_gap(out: &mut Vec<u8>, n: usize) {
    out.resize(out.len() + n, GAP_FILL);
}

/// Write a u32 byte-length-prefixed blob.
pub fn write_blob(out: &mut Vec<u8>, bytes: &[u8]) {
    write_u32_le(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

/// Write a u32 byte-length-prefixed UTF-8 string.
pub fn write_utf8(out: &mut Vec<u8>, s: &str) {
    write_blob(out, s.as_bytes());
}

/// Write a u32 code-unit-count-prefixed UTF-16 string.
pub fn write_utf16(out: &mut Vec<u8>, s: &str) {
    let units: Vec<u16> = s.encode_utf16().collect();
    write_u32_le(out, units.len() as u32);
    for unit in units {
        write_u16_le(out, unit);
    }
}

/// Write UTF-16 code units followed by a NUL unit.
pub fn write_utf16_nul_terminated(out: &mut Vec<u8>, s: &str) {
    for unit in s.encode_utf16() {
        write_u16_le(out, unit);
    }
    write_u16_le(out, 0);
}

// ── Container writers ───────────────────────────────────────────

/// Write a chunky section header.
pub fn write_section_header(out: &mut Vec<u8>) {
    out.extend_from_slice(&CHUNKY_MAGIC);
    write_u32_le(out, CHUNKY_SIGNATURE);
    write_u32_le(out, CHUNKY_MAJOR_VERSION);
    write_u32_le(out, CHUNKY_MINOR_VERSION);
}

/// Write a complete chunk with header and payload.
pub fn write_chunk(
    out: &mut Vec<u8>,
    kind: [u8; 4],
    id: [u8; 4],
    version: u32,
    name: &str,
    payload: &[u8],
) {
    out.reserve(CHUNK_HEADER_LEN + name.len() + payload.len());
    out.extend_from_slice(&kind);
    out.extend_from_slice(&id);
    write_u32_le(out, version);
    write_u32_le(out, payload.len() as u32);
    write_utf8(out, name);
    out.extend_from_slice(payload);
}

/// Write a tick record with its type and length prefix.
pub fn write_tick_record(out: &mut Vec<u8>, record_type: u32, payload: &[u8]) {
    write_u32_le(out, record_type);
    write_blob(out, payload);
}
