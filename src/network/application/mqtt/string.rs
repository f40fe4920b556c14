//! UTF-8 string fields.
//!
//! Topics, client identifiers and the protocol name are all written as a
//! 2-byte big-endian byte count followed by that many bytes of UTF-8.

use super::error::Error;
use super::wire;

/// Longest string a 2-byte length prefix can describe.
pub const MAX_STRING_LEN: usize = 65_535;

/// Bytes occupied by `value` once written as a field.
pub const fn encoded_len(value: &str) -> usize {
    2 + value.len()
}

/// Length prefix for a field holding `len` bytes.
pub fn field_length(len: usize) -> Result<u16, Error> {
    u16::try_from(len).map_err(|_| Error::StringTooLong(len))
}

/// Write `value` as a length-prefixed field to the start of `buf`.
///
/// Returns the number of bytes written.
pub fn encode(value: &str, buf: &mut [u8]) -> Result<usize, Error> {
    let mut w = wire::Writer::new(buf);
    w.put_str(value)?;
    Ok(w.position())
}

/// Read a length-prefixed field starting at `offset`.
///
/// Returns the string and the offset just past it. Fails with
/// [`Error::Truncated`] when fewer than `2 + length` bytes remain and with
/// [`Error::InvalidUtf8`] when the bytes are not UTF-8.
pub fn decode(buf: &[u8], offset: usize) -> Result<(&str, usize), Error> {
    let (len, offset) = wire::read_u16(buf, offset)?;
    let (bytes, offset) = wire::read_bytes(buf, offset, usize::from(len))?;
    let value = core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
    Ok((value, offset))
}
