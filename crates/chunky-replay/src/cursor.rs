//! Bounds-checked sequential reader over an immutable byte buffer.
//!
//! [`ByteCursor`] never panics and never reads past its bound: every read
//! that asks for more than [`remaining`](ByteCursor::remaining) bytes
//! fails with [`DecodeError::UnexpectedEof`]. Sub-cursors carry the
//! absolute offset of their first byte so errors from nested decoders
//! still point into the full input.

use crate::error::DecodeError;

/// Text encoding of a length-prefixed string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 bytes.
    Utf8,
    /// Little-endian UTF-16 code units.
    Utf16,
}

/// What the `u32` prefix of a string counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    /// The prefix is a byte count.
    Bytes,
    /// The prefix is a count of code units (bytes for UTF-8, `u16`s for UTF-16).
    CodeUnits,
}

/// Sequential little-endian reader over a byte slice.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Cursor over a whole input buffer, starting at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes left before the bound.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor has reached its bound.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn eof(&self, needed: usize) -> DecodeError {
        DecodeError::UnexpectedEof {
            offset: self.offset(),
            needed,
            remaining: self.remaining(),
        }
    }

    /// The next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8], DecodeError> {
        let data = self.data;
        data.get(self.pos..)
            .and_then(|rest| rest.get(..n))
            .ok_or_else(|| self.eof(n))
    }

    /// Whether the next bytes equal `expected`. Short input is simply `false`.
    pub fn peek_matches(&self, expected: &[u8]) -> bool {
        self.peek_bytes(expected.len())
            .is_ok_and(|bytes| bytes == expected)
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek_bytes(n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Advance past `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Split off the next `len` bytes as an independent cursor and
    /// advance past them.
    ///
    /// Unlike plain reads, a declared length that overruns the bound is a
    /// structural error rather than an end-of-input condition.
    pub fn sub_cursor(&mut self, len: usize) -> Result<ByteCursor<'a>, DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::malformed(
                self.offset(),
                format!(
                    "declared length {len} exceeds the {} bytes remaining",
                    self.remaining()
                ),
            ));
        }
        let base = self.offset();
        let data = self.read_bytes(len)?;
        Ok(ByteCursor { data, pos: 0, base })
    }

    // ── Integers ────────────────────────────────────────────────

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64, DecodeError> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Read a little-endian u128.
    pub fn read_u128_le(&mut self) -> Result<u128, DecodeError> {
        self.read_array().map(u128::from_le_bytes)
    }

    /// Read a `u32` length or count field as a `usize`.
    pub fn read_len(&mut self) -> Result<usize, DecodeError> {
        Ok(self.read_u32_le()? as usize)
    }

    // ── Text ────────────────────────────────────────────────────

    /// Read a `u32`-prefixed string. Invalid sequences decode lossily.
    pub fn read_text(
        &mut self,
        encoding: TextEncoding,
        unit: LengthUnit,
    ) -> Result<String, DecodeError> {
        let start = self.offset();
        let count = self.read_len()?;
        let byte_len = match (encoding, unit) {
            (TextEncoding::Utf8, _) | (TextEncoding::Utf16, LengthUnit::Bytes) => count,
            (TextEncoding::Utf16, LengthUnit::CodeUnits) => {
                count.checked_mul(2).ok_or_else(|| {
                    DecodeError::malformed(start, format!("string length {count} overflows"))
                })?
            }
        };
        let bytes = self.read_bytes(byte_len)?;
        match encoding {
            TextEncoding::Utf8 => Ok(String::from_utf8_lossy(bytes).into_owned()),
            TextEncoding::Utf16 => {
                if bytes.len() % 2 != 0 {
                    return Err(DecodeError::malformed(
                        start,
                        format!("UTF-16 string of odd byte length {}", bytes.len()),
                    ));
                }
                Ok(decode_utf16(bytes))
            }
        }
    }

    /// Read a `u32` byte-length-prefixed UTF-8 string.
    pub fn read_utf8(&mut self) -> Result<String, DecodeError> {
        self.read_text(TextEncoding::Utf8, LengthUnit::Bytes)
    }

    /// Read a `u32` code-unit-count-prefixed UTF-16 string.
    pub fn read_utf16(&mut self) -> Result<String, DecodeError> {
        self.read_text(TextEncoding::Utf16, LengthUnit::CodeUnits)
    }

    /// Skip a `u32`-prefixed opaque blob.
    pub fn skip_prefixed(&mut self) -> Result<(), DecodeError> {
        let len = self.read_len()?;
        self.skip(len)
    }

    /// Read UTF-16 code units up to and including a NUL unit.
    pub fn read_utf16_nul_terminated(&mut self) -> Result<String, DecodeError> {
        let mut units = Vec::new();
        loop {
            match self.read_u16_le()? {
                0 => break,
                unit => units.push(unit),
            }
        }
        Ok(String::from_utf16_lossy(&units))
    }
}

fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
