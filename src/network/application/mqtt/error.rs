//! Error type for MQTT encoding, decoding and framing.

use super::header::PacketKind;
use super::packet::ConnectReturnCode;

/// Failure of a single codec, framing or client operation.
///
/// Every variant is terminal for the operation that produced it: nothing in
/// the codec retries or tries to resynchronise a stream after an error. The
/// variants carry enough context (expected against actual kind or length)
/// to diagnose a bad packet without the wire bytes at hand.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A Remaining Length field ran past four bytes or ended without a
    /// terminating byte.
    MalformedLength,
    /// The fixed header names a different kind than the decoder handles.
    WrongMessageType {
        /// Kind the decoder was asked for.
        expected: PacketKind,
        /// Raw kind nibble found in the buffer.
        actual: u8,
    },
    /// A fixed-size packet declared a different remaining length.
    InvalidLength {
        /// Kind being decoded.
        kind: PacketKind,
        /// Body size the kind always has.
        expected: usize,
        /// Body size the packet declared.
        actual: usize,
    },
    /// The buffer ends before a field it declares.
    Truncated {
        /// Bytes needed to finish the field.
        needed: usize,
        /// Bytes present.
        available: usize,
    },
    /// The stream ended in the middle of a packet.
    ConnectionClosed,
    /// A topic filter places `#` anywhere but as a whole final level, or
    /// uses `+` as part of a level.
    InvalidFilterSyntax,
    /// A topic name is empty, too long, holds NUL or a wildcard.
    InvalidTopicName,
    /// A QoS field holds 3.
    InvalidQoS(u8),
    /// Flag bits the protocol reserves are set.
    MalformedFlags {
        /// Kind being decoded.
        kind: PacketKind,
        /// Offending flag bits.
        flags: u8,
    },
    /// The kind nibble is one of the reserved values 0 or 15.
    UnknownPacketKind(u8),
    /// A string field is not valid UTF-8.
    InvalidUtf8,
    /// A string or binary field is longer than 65,535 bytes.
    StringTooLong(usize),
    /// A remaining length exceeds 268,435,455.
    LengthOverflow(usize),
    /// The output buffer cannot hold the encoded packet.
    BufferTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        available: usize,
    },
    /// An inbound packet does not fit the receive buffer.
    PacketTooLarge {
        /// Receive buffer size.
        max: usize,
        /// Size of the whole packet.
        actual: usize,
    },
    /// A PUBLISH carries a packet identifier at QoS 0, or lacks a non-zero one above it.
    PacketIdMismatch,
    /// No decoder exists for this kind.
    UnsupportedPacket(PacketKind),
    /// The transport reported a read failure.
    ReadError,
    /// The transport reported a write failure.
    WriteError,
    /// The server answered CONNECT with a refusal.
    ConnectionRefused(ConnectReturnCode),
    /// The server answered SUBSCRIBE with the failure return code.
    SubscriptionRejected,
    /// A different packet arrived than the one being waited for.
    UnexpectedPacket(PacketKind),
    /// An acknowledgment names a different packet identifier.
    UnexpectedPacketId {
        /// Identifier that was sent.
        expected: u16,
        /// Identifier that came back.
        actual: u16,
    },
    /// Client options could not be parsed.
    InvalidOptions,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::MalformedLength => write!(f, "malformed remaining length"),
            Error::WrongMessageType { expected, actual } => match PacketKind::from_nibble(*actual) {
                Some(kind) => write!(f, "wrong message type: expected {}, got {}", expected, kind),
                None => write!(f, "wrong message type: expected {}, got reserved type {}", expected, actual),
            },
            Error::InvalidLength {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "invalid {} remaining length: expected {}, got {}",
                kind, expected, actual
            ),
            Error::Truncated { needed, available } => {
                write!(f, "packet truncated: need {} bytes, have {}", needed, available)
            }
            Error::ConnectionClosed => write!(f, "connection closed mid-packet"),
            Error::InvalidFilterSyntax => write!(f, "invalid topic filter syntax"),
            Error::InvalidTopicName => write!(f, "invalid topic name"),
            Error::InvalidQoS(level) => write!(f, "invalid QoS level {}", level),
            Error::MalformedFlags { kind, flags } => {
                write!(f, "malformed {} flags: {:#06b}", kind, flags)
            }
            Error::UnknownPacketKind(nibble) => write!(f, "reserved packet type {}", nibble),
            Error::InvalidUtf8 => write!(f, "string field is not valid UTF-8"),
            Error::StringTooLong(len) => write!(f, "string field of {} bytes exceeds 65535", len),
            Error::LengthOverflow(len) => {
                write!(f, "remaining length {} exceeds 268435455", len)
            }
            Error::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {} bytes, have {}", needed, available)
            }
            Error::PacketTooLarge { max, actual } => {
                write!(f, "packet of {} bytes exceeds buffer of {}", actual, max)
            }
            Error::PacketIdMismatch => {
                write!(f, "packet identifier must be non-zero and present iff QoS is above 0")
            }
            Error::UnsupportedPacket(kind) => write!(f, "no decoder for {}", kind),
            Error::ReadError => write!(f, "read from connection failed"),
            Error::WriteError => write!(f, "write to connection failed"),
            Error::ConnectionRefused(code) => write!(f, "{}", code.description()),
            Error::SubscriptionRejected => write!(f, "subscription rejected by server"),
            Error::UnexpectedPacket(kind) => write!(f, "unexpected {} packet", kind),
            Error::UnexpectedPacketId { expected, actual } => write!(
                f,
                "unexpected packet identifier: expected {}, got {}",
                expected, actual
            ),
            Error::InvalidOptions => write!(f, "invalid client options"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::MalformedLength => defmt::write!(f, "MalformedLength"),
            Error::WrongMessageType { expected, actual } => {
                defmt::write!(f, "WrongMessageType(expected {}, actual {})", expected, actual)
            }
            Error::InvalidLength {
                kind,
                expected,
                actual,
            } => defmt::write!(
                f,
                "InvalidLength({}, expected {}, actual {})",
                kind,
                expected,
                actual
            ),
            Error::Truncated { needed, available } => {
                defmt::write!(f, "Truncated(needed {}, available {})", needed, available)
            }
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::InvalidFilterSyntax => defmt::write!(f, "InvalidFilterSyntax"),
            Error::InvalidTopicName => defmt::write!(f, "InvalidTopicName"),
            Error::InvalidQoS(level) => defmt::write!(f, "InvalidQoS({})", level),
            Error::MalformedFlags { kind, flags } => {
                defmt::write!(f, "MalformedFlags({}, {=u8:#b})", kind, flags)
            }
            Error::UnknownPacketKind(nibble) => defmt::write!(f, "UnknownPacketKind({})", nibble),
            Error::InvalidUtf8 => defmt::write!(f, "InvalidUtf8"),
            Error::StringTooLong(len) => defmt::write!(f, "StringTooLong({})", len),
            Error::LengthOverflow(len) => defmt::write!(f, "LengthOverflow({})", len),
            Error::BufferTooSmall { needed, available } => {
                defmt::write!(f, "BufferTooSmall(needed {}, available {})", needed, available)
            }
            Error::PacketTooLarge { max, actual } => {
                defmt::write!(f, "PacketTooLarge(max {}, actual {})", max, actual)
            }
            Error::PacketIdMismatch => defmt::write!(f, "PacketIdMismatch"),
            Error::UnsupportedPacket(kind) => defmt::write!(f, "UnsupportedPacket({})", kind),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ConnectionRefused(code) => defmt::write!(f, "ConnectionRefused({})", code),
            Error::SubscriptionRejected => defmt::write!(f, "SubscriptionRejected"),
            Error::UnexpectedPacket(kind) => defmt::write!(f, "UnexpectedPacket({})", kind),
            Error::UnexpectedPacketId { expected, actual } => {
                defmt::write!(f, "UnexpectedPacketId(expected {}, actual {})", expected, actual)
            }
            Error::InvalidOptions => defmt::write!(f, "InvalidOptions"),
        }
    }
}
