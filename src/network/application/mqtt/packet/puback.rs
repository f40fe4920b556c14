use super::{Decode, Encode};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::{self, Writer};

const BODY_LEN: usize = 2;

/// PUBACK, the acknowledgment of a QoS 1 PUBLISH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puback {
    /// Identifier of the acknowledged PUBLISH.
    pub packet_id: u16,
}

impl Encode for Puback {
    const KIND: PacketKind = PacketKind::Puback;

    fn remaining_length(&self) -> usize {
        BODY_LEN
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        w.put_u16(self.packet_id)
    }
}

impl Decode<'_> for Puback {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let frame = Frame::open_fixed(bytes, Self::KIND, BODY_LEN)?;
        let (packet_id, _) = wire::read_u16(frame.body, 0)?;
        Ok(Self { packet_id })
    }
}
