//! MQTT control packets.
//!
//! Each supported kind has its own value type that knows how to write itself
//! ([`Encode`]) and, where a client receives it from the network, how to read
//! itself back from one complete packet buffer ([`Decode`]). [`Packet`] is the
//! closed sum over all of them, used where the kind is only known at run time.
//!
//! Decoded values borrow strings and payloads from the buffer they were
//! decoded from; nothing here allocates.

mod connack;
mod connect;
mod disconnect;
mod ping;
mod puback;
mod publish;
mod suback;
mod subscribe;

pub use connack::{Connack, ConnectReturnCode};
pub use connect::{Connect, LastWill, PROTOCOL_LEVEL, PROTOCOL_NAME};
pub use disconnect::Disconnect;
pub use ping::{Pingreq, Pingresp};
pub use puback::Puback;
pub use publish::Publish;
pub use suback::Suback;
pub use subscribe::Subscribe;

use super::error::Error;
use super::header::{self, PacketKind};
use super::varint;
use super::wire::Writer;
use heapless::Vec;

/// Quality of Service levels for MQTT messages.
///
/// QoS defines the guarantee of delivery for a specific message. Higher QoS levels
/// provide stronger delivery guarantees but require more network overhead and
/// client state management. On the wire it occupies two bits; the value 3 is
/// illegal and rejected wherever a QoS is read from untrusted bytes.
///
/// # Examples
///
/// ```rust
/// use libmqtt::network::application::mqtt::QoS;
///
/// assert_eq!(QoS::AtLeastOnce as u8, 1);
/// assert_eq!(QoS::from_u8(2), Ok(QoS::ExactlyOnce));
/// assert!(QoS::from_u8(3).is_err());
/// ```
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QoS {
    /// **QoS 0**: At most once delivery.
    ///
    /// Messages are delivered according to the best effort of the underlying network.
    /// Message loss can occur.
    AtMostOnce = 0,

    /// **QoS 1**: At least once delivery.
    ///
    /// Messages are assured to arrive but duplicates can occur. The receiver
    /// answers with PUBACK.
    AtLeastOnce = 1,

    /// **QoS 2**: Exactly once delivery.
    ///
    /// Messages are assured to arrive exactly once. The four-step handshake
    /// this needs is not driven by this crate.
    ExactlyOnce = 2,
}

impl QoS {
    /// Parse a wire value, rejecting anything above 2.
    pub const fn from_u8(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(Error::InvalidQoS(value)),
        }
    }
}

impl TryFrom<u8> for QoS {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        QoS::from_u8(value)
    }
}

/// Write a packet in wire format.
///
/// Implementors describe their body; the fixed header and Remaining Length
/// are produced by the provided methods.
pub trait Encode {
    /// Kind written into the fixed header.
    const KIND: PacketKind;

    /// Flag nibble of the fixed header.
    fn flags(&self) -> u8 {
        Self::KIND.reserved_flags().unwrap_or(0)
    }

    /// Size of the variable header plus payload.
    fn remaining_length(&self) -> usize;

    /// Write the variable header and payload.
    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error>;

    /// Size of the whole encoded packet.
    fn encoded_len(&self) -> usize {
        let remaining = self.remaining_length();
        let prefix = u32::try_from(remaining).map_or(varint::MAX_LENGTH_BYTES, varint::encoded_len);
        1 + prefix + remaining
    }

    /// Write the packet to the start of `buf`, returning its length.
    fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let remaining = self.remaining_length();
        if remaining > varint::MAX_REMAINING_LENGTH as usize {
            return Err(Error::LengthOverflow(remaining));
        }
        let needed = self.encoded_len();
        if buf.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }

        let mut w = Writer::new(buf);
        w.put_u8(header::header_byte(Self::KIND, self.flags()))?;
        w.put_remaining_length(remaining)?;
        self.encode_body(&mut w)?;
        Ok(w.position())
    }

    /// Encode into a fixed-capacity vector.
    fn to_vec<const N: usize>(&self) -> Result<Vec<u8, N>, Error> {
        let needed = self.encoded_len();
        let mut out = Vec::new();
        out.resize(needed, 0).map_err(|_| Error::BufferTooSmall {
            needed,
            available: N,
        })?;
        let len = self.encode(&mut out)?;
        out.truncate(len);
        Ok(out)
    }
}

/// Read a packet of one specific kind from a complete packet buffer.
pub trait Decode<'a>: Sized {
    /// Decode `bytes`, which start with the fixed header.
    ///
    /// Fails with [`Error::WrongMessageType`] when the buffer holds another
    /// kind.
    fn decode(bytes: &'a [u8]) -> Result<Self, Error>;
}

/// Any supported MQTT control packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet<'a> {
    /// Connection request.
    Connect(Connect<'a>),
    /// Connection acknowledgment.
    Connack(Connack),
    /// Application message.
    Publish(Publish<'a>),
    /// QoS 1 acknowledgment.
    Puback(Puback),
    /// Subscription request.
    Subscribe(Subscribe<'a>),
    /// Subscription acknowledgment.
    Suback(Suback),
    /// Keep-alive request.
    Pingreq(Pingreq),
    /// Keep-alive response.
    Pingresp(Pingresp),
    /// Clean disconnect.
    Disconnect(Disconnect),
}

impl<'a> Packet<'a> {
    /// Kind of the packet.
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Connect(_) => PacketKind::Connect,
            Packet::Connack(_) => PacketKind::Connack,
            Packet::Publish(_) => PacketKind::Publish,
            Packet::Puback(_) => PacketKind::Puback,
            Packet::Subscribe(_) => PacketKind::Subscribe,
            Packet::Suback(_) => PacketKind::Suback,
            Packet::Pingreq(_) => PacketKind::Pingreq,
            Packet::Pingresp(_) => PacketKind::Pingresp,
            Packet::Disconnect(_) => PacketKind::Disconnect,
        }
    }

    /// Write the packet to the start of `buf`, returning its length.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, Error> {
        match self {
            Packet::Connect(p) => p.encode(buf),
            Packet::Connack(p) => p.encode(buf),
            Packet::Publish(p) => p.encode(buf),
            Packet::Puback(p) => p.encode(buf),
            Packet::Subscribe(p) => p.encode(buf),
            Packet::Suback(p) => p.encode(buf),
            Packet::Pingreq(p) => p.encode(buf),
            Packet::Pingresp(p) => p.encode(buf),
            Packet::Disconnect(p) => p.encode(buf),
        }
    }

    /// Total length of the encoded packet.
    pub fn encoded_len(&self) -> usize {
        match self {
            Packet::Connect(p) => p.encoded_len(),
            Packet::Connack(p) => p.encoded_len(),
            Packet::Publish(p) => p.encoded_len(),
            Packet::Puback(p) => p.encoded_len(),
            Packet::Subscribe(p) => p.encoded_len(),
            Packet::Suback(p) => p.encoded_len(),
            Packet::Pingreq(p) => p.encoded_len(),
            Packet::Pingresp(p) => p.encoded_len(),
            Packet::Disconnect(p) => p.encoded_len(),
        }
    }

    /// Decode whichever packet `bytes` holds.
    ///
    /// CONNECT and SUBSCRIBE are only ever sent by a client and have no
    /// decoder; they, like the kinds this crate does not model, fail with
    /// [`Error::UnsupportedPacket`].
    pub fn decode(bytes: &'a [u8]) -> Result<Self, Error> {
        match header::peek_kind(bytes)? {
            PacketKind::Connack => Connack::decode(bytes).map(Packet::Connack),
            PacketKind::Publish => Publish::decode(bytes).map(Packet::Publish),
            PacketKind::Puback => Puback::decode(bytes).map(Packet::Puback),
            PacketKind::Suback => Suback::decode(bytes).map(Packet::Suback),
            PacketKind::Pingreq => Pingreq::decode(bytes).map(Packet::Pingreq),
            PacketKind::Pingresp => Pingresp::decode(bytes).map(Packet::Pingresp),
            PacketKind::Disconnect => Disconnect::decode(bytes).map(Packet::Disconnect),
            kind => Err(Error::UnsupportedPacket(kind)),
        }
    }
}

macro_rules! impl_from_packet {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl<'a> From<$ty> for Packet<'a> {
                fn from(packet: $ty) -> Self {
                    Packet::$variant(packet)
                }
            }
        )*
    };
}

impl_from_packet! {
    Connect => Connect<'a>,
    Connack => Connack,
    Publish => Publish<'a>,
    Puback => Puback,
    Subscribe => Subscribe<'a>,
    Suback => Suback,
    Pingreq => Pingreq,
    Pingresp => Pingresp,
    Disconnect => Disconnect,
}
