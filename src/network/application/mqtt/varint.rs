//! Remaining Length encoding.
//!
//! The number of bytes following the fixed header is written base-128, least
//! significant group first, with the high bit of every byte except the last
//! set as a continuation marker. At most four bytes are allowed, which caps
//! the value at 268,435,455.

use super::error::Error;
use heapless::Vec;

/// Largest value representable in four length bytes.
pub const MAX_REMAINING_LENGTH: u32 = 268_435_455;

/// Maximum number of bytes a Remaining Length field may occupy.
pub const MAX_LENGTH_BYTES: usize = 4;

const CONTINUATION: u8 = 0x80;

/// Number of bytes the canonical encoding of `value` occupies.
pub const fn encoded_len(value: u32) -> usize {
    if value < 128 {
        1
    } else if value < 16_384 {
        2
    } else if value < 2_097_152 {
        3
    } else {
        4
    }
}

/// Write the canonical encoding of `value` to the start of `buf`.
///
/// Returns the number of bytes written.
pub fn encode(value: u32, buf: &mut [u8]) -> Result<usize, Error> {
    if value > MAX_REMAINING_LENGTH {
        return Err(Error::LengthOverflow(value as usize));
    }
    let needed = encoded_len(value);
    if buf.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }

    let mut remaining = value;
    let mut written = 0;
    loop {
        let mut byte = (remaining % 128) as u8;
        remaining /= 128;
        if remaining > 0 {
            byte |= CONTINUATION;
        }
        buf[written] = byte;
        written += 1;
        if remaining == 0 {
            break;
        }
    }
    Ok(written)
}

/// Canonical encoding of `value` as an owned byte sequence.
pub fn encode_to_vec(value: u32) -> Result<Vec<u8, MAX_LENGTH_BYTES>, Error> {
    let mut bytes = [0u8; MAX_LENGTH_BYTES];
    let len = encode(value, &mut bytes)?;
    Vec::from_slice(&bytes[..len]).map_err(|_| Error::BufferTooSmall {
        needed: len,
        available: MAX_LENGTH_BYTES,
    })
}

/// Decode a Remaining Length from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Non-canonical
/// (padded) encodings are accepted. Fails with [`Error::MalformedLength`]
/// when no terminating byte appears within four bytes or before `bytes`
/// runs out.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), Error> {
    let mut value: u32 = 0;
    let mut multiplier: u32 = 1;

    for (index, &byte) in bytes.iter().take(MAX_LENGTH_BYTES).enumerate() {
        value += u32::from(byte & 0x7F) * multiplier;
        if byte & CONTINUATION == 0 {
            return Ok((value, index + 1));
        }
        multiplier = multiplier.saturating_mul(128);
    }

    Err(Error::MalformedLength)
}

/// Whether `byte` announces another length byte after it.
pub const fn has_continuation(byte: u8) -> bool {
    byte & CONTINUATION != 0
}
