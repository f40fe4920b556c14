use super::{Encode, QoS};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::PacketKind;
use crate::network::application::mqtt::string;
use crate::network::application::mqtt::wire::Writer;

/// SUBSCRIBE for a single topic filter.
///
/// Written with the fixed flag nibble `0010`. Only clients send it, so there
/// is no decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscribe<'a> {
    /// Echoed back in the SUBACK.
    pub packet_id: u16,
    /// Pattern to subscribe to.
    pub topic_filter: &'a str,
    /// Highest QoS the client wants to receive on this filter.
    pub qos: QoS,
}

impl Encode for Subscribe<'_> {
    const KIND: PacketKind = PacketKind::Subscribe;

    fn remaining_length(&self) -> usize {
        2 + string::encoded_len(self.topic_filter) + 1
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        w.put_u16(self.packet_id)?;
        w.put_str(self.topic_filter)?;
        w.put_u8(self.qos as u8)
    }
}
