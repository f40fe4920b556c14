//! Keep-alive probes. Both packets are a bare fixed header.

use super::{Decode, Encode};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::Writer;

/// PINGREQ, sent by the client when it has been idle for the keep-alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pingreq;

/// PINGRESP, the server's answer to PINGREQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pingresp;

impl Encode for Pingreq {
    const KIND: PacketKind = PacketKind::Pingreq;

    fn remaining_length(&self) -> usize {
        0
    }

    fn encode_body(&self, _w: &mut Writer<'_>) -> Result<(), Error> {
        Ok(())
    }
}

impl Decode<'_> for Pingreq {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Frame::open_fixed(bytes, Self::KIND, 0)?;
        Ok(Pingreq)
    }
}

impl Encode for Pingresp {
    const KIND: PacketKind = PacketKind::Pingresp;

    fn remaining_length(&self) -> usize {
        0
    }

    fn encode_body(&self, _w: &mut Writer<'_>) -> Result<(), Error> {
        Ok(())
    }
}

impl Decode<'_> for Pingresp {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Frame::open_fixed(bytes, Self::KIND, 0)?;
        Ok(Pingresp)
    }
}
