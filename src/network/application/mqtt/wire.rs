//! Byte cursors shared by the packet codecs.
//!
//! Decoding threads an explicit offset through free functions: each reader
//! takes `(buffer, offset)` and hands back the value together with the offset
//! just past it. Encoding goes through [`Writer`], which refuses to run past
//! the end of the caller's buffer.

use super::error::Error;
use super::{string, varint};

/// Bounded writer over a caller supplied buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Start writing at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Single byte.
    pub fn put_u8(&mut self, byte: u8) -> Result<(), Error> {
        self.put_slice(&[byte])
    }

    /// Big-endian 16-bit integer.
    pub fn put_u16(&mut self, value: u16) -> Result<(), Error> {
        self.put_slice(&value.to_be_bytes())
    }

    /// Raw bytes, copied verbatim.
    pub fn put_slice(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let end = self.pos + bytes.len();
        let available = self.buf.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(Error::BufferTooSmall {
                needed: end,
                available,
            })?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Length-prefixed UTF-8 field.
    pub fn put_str(&mut self, value: &str) -> Result<(), Error> {
        self.put_binary(value.as_bytes())
    }

    /// Length-prefixed binary field (same layout as a UTF-8 field).
    pub fn put_binary(&mut self, value: &[u8]) -> Result<(), Error> {
        let len = string::field_length(value.len())?;
        self.put_u16(len)?;
        self.put_slice(value)
    }

    /// Remaining Length in its variable-length form.
    pub fn put_remaining_length(&mut self, value: usize) -> Result<(), Error> {
        let value = u32::try_from(value).map_err(|_| Error::LengthOverflow(value))?;
        let pos = self.pos;
        let available = self.buf.len();
        let written = varint::encode(value, &mut self.buf[pos..]).map_err(|err| match err {
            Error::BufferTooSmall { needed, .. } => Error::BufferTooSmall {
                needed: pos + needed,
                available,
            },
            other => other,
        })?;
        self.pos += written;
        Ok(())
    }
}

/// Read one byte at `offset`.
pub fn read_u8(buf: &[u8], offset: usize) -> Result<(u8, usize), Error> {
    let (bytes, next) = read_bytes(buf, offset, 1)?;
    Ok((bytes[0], next))
}

/// Read a big-endian 16-bit integer at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> Result<(u16, usize), Error> {
    let (bytes, next) = read_bytes(buf, offset, 2)?;
    Ok((u16::from_be_bytes([bytes[0], bytes[1]]), next))
}

/// Borrow `len` bytes starting at `offset`.
pub fn read_bytes(buf: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize), Error> {
    let end = offset.saturating_add(len);
    match buf.get(offset..end) {
        Some(bytes) => Ok((bytes, end)),
        None => Err(Error::Truncated {
            needed: end,
            available: buf.len(),
        }),
    }
}
