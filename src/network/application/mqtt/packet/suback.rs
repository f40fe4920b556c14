use super::{Decode, Encode, QoS};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::{self, Writer};

const BODY_LEN: usize = 3;

/// SUBACK for a single-filter SUBSCRIBE.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{Decode, QoS, Suback};
///
/// let suback = Suback::decode(&[0x90, 0x03, 0x00, 0x01, 0x01]).unwrap();
/// assert!(suback.is_success());
/// assert_eq!(suback.granted_qos(), Some(QoS::AtLeastOnce));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suback {
    /// Identifier of the SUBSCRIBE being answered.
    pub packet_id: u16,
    /// Granted QoS (0, 1 or 2) or [`Suback::FAILURE`].
    pub return_code: u8,
}

impl Suback {
    /// Return code signalling that the subscription was refused.
    pub const FAILURE: u8 = 0x80;

    /// Whether the server granted the subscription.
    pub const fn is_success(&self) -> bool {
        self.return_code != Self::FAILURE
    }

    /// QoS the server granted, or `None` on failure or an undefined code.
    pub fn granted_qos(&self) -> Option<QoS> {
        QoS::from_u8(self.return_code).ok()
    }
}

impl Encode for Suback {
    const KIND: PacketKind = PacketKind::Suback;

    fn remaining_length(&self) -> usize {
        BODY_LEN
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        w.put_u16(self.packet_id)?;
        w.put_u8(self.return_code)
    }
}

impl Decode<'_> for Suback {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let frame = Frame::open_fixed(bytes, Self::KIND, BODY_LEN)?;
        let (packet_id, offset) = wire::read_u16(frame.body, 0)?;
        let (return_code, _) = wire::read_u8(frame.body, offset)?;
        Ok(Self {
            packet_id,
            return_code,
        })
    }
}
