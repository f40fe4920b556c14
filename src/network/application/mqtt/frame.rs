//! Cutting a byte stream into packets.
//!
//! The deframer knows nothing about packet contents. It reads the first
//! byte, then the Remaining Length one byte at a time, then exactly that
//! many body bytes, and hands the whole packet back for [`Packet::decode`]
//! or a per-kind decoder to interpret.
//!
//! [`Packet::decode`]: super::Packet::decode

use super::error::Error;
use super::varint;
use crate::network::{Read, Write};
use heapless::Vec;

/// Fill `buf` completely from `connection`.
///
/// The transport may hand bytes over in any chunk size. A read of zero bytes
/// before `buf` is full means the peer closed the stream.
pub fn read_exact<C: Read + ?Sized>(connection: &mut C, buf: &mut [u8]) -> Result<(), Error> {
    let mut total_read = 0;
    while total_read < buf.len() {
        match connection.read(&mut buf[total_read..]) {
            Ok(0) => return Err(Error::ConnectionClosed),
            Ok(n) => total_read += n,
            Err(_) => return Err(Error::ReadError),
        }
    }
    Ok(())
}

/// Write all of `bytes` to `connection` and flush it.
pub fn write_all<C: Write + ?Sized>(connection: &mut C, bytes: &[u8]) -> Result<(), Error> {
    let mut written = 0;
    while written < bytes.len() {
        match connection.write(&bytes[written..]) {
            Ok(0) => return Err(Error::WriteError),
            Ok(n) => written += n,
            Err(_) => return Err(Error::WriteError),
        }
    }
    connection.flush().map_err(|_| Error::WriteError)
}

/// Length of the header read so far, plus its Remaining Length.
struct Prefix {
    header_len: usize,
    remaining_length: usize,
}

// Validates the accumulated length bytes and sizes the whole packet against
// the buffer before any body byte is read.
fn finish_prefix(buf: &[u8], header_len: usize) -> Result<Prefix, Error> {
    let (remaining_length, _) = varint::decode(&buf[1..header_len])?;
    let remaining_length = remaining_length as usize;
    let total = header_len + remaining_length;
    if total > buf.len() {
        return Err(Error::PacketTooLarge {
            max: buf.len(),
            actual: total,
        });
    }
    Ok(Prefix {
        header_len,
        remaining_length,
    })
}

/// Read exactly one packet from `connection` into the start of `buf`.
///
/// Returns the packet bytes: fixed header, Remaining Length and body.
///
/// # Errors
///
/// * [`Error::ConnectionClosed`] - the stream ended before the packet did
/// * [`Error::MalformedLength`] - more than four length bytes
/// * [`Error::PacketTooLarge`] - the packet does not fit `buf`
/// * [`Error::ReadError`] - the transport failed
///
/// ```rust
/// use libmqtt::network::Read;
/// use libmqtt::network::application::mqtt::frame::read_frame_into;
///
/// struct Bytes<'a>(&'a [u8]);
///
/// impl Read for Bytes<'_> {
///     type Error = ();
///     fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
///         let n = buf.len().min(self.0.len());
///         buf[..n].copy_from_slice(&self.0[..n]);
///         self.0 = &self.0[n..];
///         Ok(n)
///     }
/// }
///
/// let mut stream = Bytes(&[0x40, 0x02, 0x00, 0x07, 0xE0, 0x00]);
/// let mut buf = [0u8; 16];
/// assert_eq!(read_frame_into(&mut stream, &mut buf).unwrap(), &[0x40, 0x02, 0x00, 0x07]);
/// assert_eq!(read_frame_into(&mut stream, &mut buf).unwrap(), &[0xE0, 0x00]);
/// ```
pub fn read_frame_into<'b, C: Read + ?Sized>(
    connection: &mut C,
    buf: &'b mut [u8],
) -> Result<&'b [u8], Error> {
    if buf.len() < 2 {
        return Err(Error::PacketTooLarge {
            max: buf.len(),
            actual: 2,
        });
    }
    read_exact(connection, &mut buf[..1])?;

    let mut header_len = 1;
    loop {
        if header_len > varint::MAX_LENGTH_BYTES {
            return Err(Error::MalformedLength);
        }
        if header_len >= buf.len() {
            return Err(Error::PacketTooLarge {
                max: buf.len(),
                actual: header_len + 1,
            });
        }
        read_exact(connection, &mut buf[header_len..header_len + 1])?;
        header_len += 1;
        if !varint::has_continuation(buf[header_len - 1]) {
            break;
        }
    }

    let prefix = finish_prefix(buf, header_len)?;
    let end = prefix.header_len + prefix.remaining_length;
    read_exact(connection, &mut buf[prefix.header_len..end])?;
    Ok(&buf[..end])
}

/// Read exactly one packet into a fixed-capacity vector.
pub fn read_frame<C: Read + ?Sized, const N: usize>(connection: &mut C) -> Result<Vec<u8, N>, Error> {
    let mut out = Vec::new();
    out.resize(N, 0).map_err(|_| Error::BufferTooSmall {
        needed: N,
        available: N,
    })?;
    let len = read_frame_into(connection, &mut out)?.len();
    out.truncate(len);
    Ok(out)
}

#[cfg(feature = "async")]
async fn read_exact_async<C: crate::network::AsyncRead + ?Sized>(
    connection: &mut C,
    buf: &mut [u8],
) -> Result<(), Error> {
    let mut total_read = 0;
    while total_read < buf.len() {
        match connection.read(&mut buf[total_read..]).await {
            Ok(0) => return Err(Error::ConnectionClosed),
            Ok(n) => total_read += n,
            Err(_) => return Err(Error::ReadError),
        }
    }
    Ok(())
}

/// [`read_frame_into`] over an asynchronous transport.
#[cfg(feature = "async")]
pub async fn read_frame_into_async<'b, C: crate::network::AsyncRead + ?Sized>(
    connection: &mut C,
    buf: &'b mut [u8],
) -> Result<&'b [u8], Error> {
    if buf.len() < 2 {
        return Err(Error::PacketTooLarge {
            max: buf.len(),
            actual: 2,
        });
    }
    read_exact_async(connection, &mut buf[..1]).await?;

    let mut header_len = 1;
    loop {
        if header_len > varint::MAX_LENGTH_BYTES {
            return Err(Error::MalformedLength);
        }
        if header_len >= buf.len() {
            return Err(Error::PacketTooLarge {
                max: buf.len(),
                actual: header_len + 1,
            });
        }
        read_exact_async(connection, &mut buf[header_len..header_len + 1]).await?;
        header_len += 1;
        if !varint::has_continuation(buf[header_len - 1]) {
            break;
        }
    }

    let prefix = finish_prefix(buf, header_len)?;
    let end = prefix.header_len + prefix.remaining_length;
    read_exact_async(connection, &mut buf[prefix.header_len..end]).await?;
    Ok(&buf[..end])
}
