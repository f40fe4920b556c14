use super::{Decode, Encode, QoS};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::{self, Writer};
use crate::network::application::mqtt::string;

const DUP: u8 = 0b1000;
const QOS_MASK: u8 = 0b0110;
const RETAIN: u8 = 0b0001;

/// PUBLISH, an application message travelling in either direction.
///
/// The packet identifier is present on the wire if and only if the QoS is
/// above 0; encoding a value that breaks this rule fails with
/// [`Error::PacketIdMismatch`]. The payload is everything after the header
/// fields.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{Decode, Encode, Publish, QoS};
///
/// let publish = Publish {
///     qos: QoS::AtLeastOnce,
///     packet_id: Some(10),
///     ..Publish::new("sensors/temperature", b"23.5")
/// };
/// let bytes = publish.to_vec::<64>().unwrap();
/// assert_eq!(Publish::decode(&bytes).unwrap(), publish);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publish<'a> {
    /// Topic name, never containing wildcards.
    pub topic: &'a str,
    /// Delivery guarantee.
    pub qos: QoS,
    /// Application message, everything after the variable header.
    pub payload: &'a [u8],
    /// `Some` non-zero identifier exactly when `qos` is above 0.
    pub packet_id: Option<u16>,
    /// Set on redelivery.
    pub dup: bool,
    /// Ask the server to keep the message for future subscribers.
    pub retain: bool,
}

impl<'a> Publish<'a> {
    /// QoS 0 message without DUP or RETAIN.
    pub const fn new(topic: &'a str, payload: &'a [u8]) -> Self {
        Self {
            topic,
            qos: QoS::AtMostOnce,
            payload,
            packet_id: None,
            dup: false,
            retain: false,
        }
    }

    fn has_packet_id(&self) -> bool {
        self.qos != QoS::AtMostOnce
    }
}

impl Encode for Publish<'_> {
    const KIND: PacketKind = PacketKind::Publish;

    fn flags(&self) -> u8 {
        let mut flags = (self.qos as u8) << 1;
        if self.dup {
            flags |= DUP;
        }
        if self.retain {
            flags |= RETAIN;
        }
        flags
    }

    fn remaining_length(&self) -> usize {
        let id_len = if self.has_packet_id() { 2 } else { 0 };
        string::encoded_len(self.topic) + id_len + self.payload.len()
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        w.put_str(self.topic)?;
        match (self.has_packet_id(), self.packet_id) {
            (true, Some(id)) if id != 0 => w.put_u16(id)?,
            (false, None) => {}
            _ => return Err(Error::PacketIdMismatch),
        }
        w.put_slice(self.payload)
    }
}

impl<'a> Decode<'a> for Publish<'a> {
    fn decode(bytes: &'a [u8]) -> Result<Self, Error> {
        let frame = Frame::open(bytes, Self::KIND)?;
        let qos = QoS::from_u8((frame.flags & QOS_MASK) >> 1)?;

        let (topic, offset) = string::decode(frame.body, 0)?;
        let (packet_id, offset) = if qos == QoS::AtMostOnce {
            (None, offset)
        } else {
            let (id, offset) = wire::read_u16(frame.body, offset)?;
            (Some(id), offset)
        };

        Ok(Self {
            topic,
            qos,
            payload: &frame.body[offset..],
            packet_id,
            dup: frame.flags & DUP != 0,
            retain: frame.flags & RETAIN != 0,
        })
    }
}
