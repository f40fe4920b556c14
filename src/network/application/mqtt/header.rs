//! Fixed header handling.
//!
//! The first byte of every MQTT control packet carries the packet kind in its
//! high nibble and kind specific flags in its low nibble. This module turns
//! that byte back into a [`PacketKind`] and, together with the remaining
//! length that follows it, isolates the body a per-kind decoder works on.

use super::error::Error;
use super::varint;

/// MQTT control packet kinds, as stored in bits 7-4 of the first byte.
///
/// Values 0 and 15 are reserved by the protocol and have no variant.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketKind {
    /// Client request to connect to a server.
    Connect = 1,
    /// Connect acknowledgment.
    Connack = 2,
    /// Publish message.
    Publish = 3,
    /// Publish acknowledgment (QoS 1).
    Puback = 4,
    /// Publish received (QoS 2, part 1).
    Pubrec = 5,
    /// Publish release (QoS 2, part 2).
    Pubrel = 6,
    /// Publish complete (QoS 2, part 3).
    Pubcomp = 7,
    /// Subscribe request.
    Subscribe = 8,
    /// Subscribe acknowledgment.
    Suback = 9,
    /// Unsubscribe request.
    Unsubscribe = 10,
    /// Unsubscribe acknowledgment.
    Unsuback = 11,
    /// Ping request.
    Pingreq = 12,
    /// Ping response.
    Pingresp = 13,
    /// Client is disconnecting.
    Disconnect = 14,
}

impl PacketKind {
    /// Recover a kind from a 4-bit value. Reserved values yield `None`.
    pub const fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            1 => Some(PacketKind::Connect),
            2 => Some(PacketKind::Connack),
            3 => Some(PacketKind::Publish),
            4 => Some(PacketKind::Puback),
            5 => Some(PacketKind::Pubrec),
            6 => Some(PacketKind::Pubrel),
            7 => Some(PacketKind::Pubcomp),
            8 => Some(PacketKind::Subscribe),
            9 => Some(PacketKind::Suback),
            10 => Some(PacketKind::Unsubscribe),
            11 => Some(PacketKind::Unsuback),
            12 => Some(PacketKind::Pingreq),
            13 => Some(PacketKind::Pingresp),
            14 => Some(PacketKind::Disconnect),
            _ => None,
        }
    }

    /// Kind of the packet whose first byte is `byte`.
    pub const fn from_header_byte(byte: u8) -> Option<Self> {
        Self::from_nibble(byte >> 4)
    }

    /// Flag nibble the protocol mandates for this kind, or `None` for
    /// PUBLISH whose flags carry DUP, QoS and RETAIN.
    pub const fn reserved_flags(self) -> Option<u8> {
        match self {
            PacketKind::Publish => None,
            PacketKind::Pubrel | PacketKind::Subscribe | PacketKind::Unsubscribe => Some(0b0010),
            _ => Some(0b0000),
        }
    }

    /// Name used on the wire documentation, e.g. `"CONNACK"`.
    pub const fn name(self) -> &'static str {
        match self {
            PacketKind::Connect => "CONNECT",
            PacketKind::Connack => "CONNACK",
            PacketKind::Publish => "PUBLISH",
            PacketKind::Puback => "PUBACK",
            PacketKind::Pubrec => "PUBREC",
            PacketKind::Pubrel => "PUBREL",
            PacketKind::Pubcomp => "PUBCOMP",
            PacketKind::Subscribe => "SUBSCRIBE",
            PacketKind::Suback => "SUBACK",
            PacketKind::Unsubscribe => "UNSUBSCRIBE",
            PacketKind::Unsuback => "UNSUBACK",
            PacketKind::Pingreq => "PINGREQ",
            PacketKind::Pingresp => "PINGRESP",
            PacketKind::Disconnect => "DISCONNECT",
        }
    }
}

impl core::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the first byte of a packet: `(kind << 4) | flags`.
pub const fn header_byte(kind: PacketKind, flags: u8) -> u8 {
    ((kind as u8) << 4) | (flags & 0x0F)
}

/// Split a first byte into its kind nibble and flag nibble.
pub const fn split_header_byte(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

/// Kind of the packet at the start of `bytes`.
pub fn peek_kind(bytes: &[u8]) -> Result<PacketKind, Error> {
    let first = *bytes.first().ok_or(Error::Truncated {
        needed: 1,
        available: 0,
    })?;
    let (nibble, _) = split_header_byte(first);
    PacketKind::from_nibble(nibble).ok_or(Error::UnknownPacketKind(nibble))
}

/// A packet whose fixed header has been checked against an expected kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Flag nibble of the first byte.
    pub flags: u8,
    /// Variable header and payload, exactly `remaining_length` bytes.
    pub body: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Validate the fixed header of `bytes` and isolate the body.
    ///
    /// Fails with [`Error::WrongMessageType`] when the kind nibble differs
    /// from `expected`, [`Error::MalformedLength`] on a bad remaining length
    /// and [`Error::Truncated`] when the buffer ends before the declared body
    /// does. Bytes past the declared end are not part of the frame.
    pub fn open(bytes: &'a [u8], expected: PacketKind) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::Truncated {
                needed: 2,
                available: bytes.len(),
            });
        }
        let (nibble, flags) = split_header_byte(bytes[0]);
        if nibble != expected as u8 {
            return Err(Error::WrongMessageType {
                expected,
                actual: nibble,
            });
        }
        if let Some(reserved) = expected.reserved_flags() {
            if flags != reserved {
                return Err(Error::MalformedFlags {
                    kind: expected,
                    flags,
                });
            }
        }

        let (remaining_length, length_bytes) = varint::decode(&bytes[1..])?;
        let start = 1 + length_bytes;
        let end = start + remaining_length as usize;
        if bytes.len() < end {
            return Err(Error::Truncated {
                needed: end,
                available: bytes.len(),
            });
        }

        Ok(Frame {
            flags,
            body: &bytes[start..end],
        })
    }

    /// Like [`Frame::open`], for kinds whose body has one fixed size.
    pub fn open_fixed(bytes: &'a [u8], expected: PacketKind, size: usize) -> Result<Self, Error> {
        // a wrong declared size wins over a missing body
        if bytes.len() >= 2 && bytes[0] >> 4 == expected as u8 {
            let (remaining_length, _) = varint::decode(&bytes[1..])?;
            if remaining_length as usize != size {
                return Err(Error::InvalidLength {
                    kind: expected,
                    expected: size,
                    actual: remaining_length as usize,
                });
            }
        }
        Self::open(bytes, expected)
    }
}
