use super::{Decode, Encode};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::Writer;

/// DISCONNECT, the last packet a client sends. It has no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disconnect;

impl Encode for Disconnect {
    const KIND: PacketKind = PacketKind::Disconnect;

    fn remaining_length(&self) -> usize {
        0
    }

    fn encode_body(&self, _w: &mut Writer<'_>) -> Result<(), Error> {
        Ok(())
    }
}

impl Decode<'_> for Disconnect {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        Frame::open_fixed(bytes, Self::KIND, 0)?;
        Ok(Disconnect)
    }
}
