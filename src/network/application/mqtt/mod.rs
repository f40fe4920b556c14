//! MQTT 3.1.1 codec for embedded systems.
//!
//! Everything a client needs to speak MQTT over a byte stream without an
//! allocator:
//!
//! - [`varint`] and [`string`]: the Remaining Length and UTF-8 field formats
//! - [`header`]: packet kinds and fixed header checks
//! - [`packet`]: one value type per packet kind with [`Encode`] / [`Decode`]
//! - [`frame`]: cutting exactly one packet out of a transport stream
//! - [`topic`]: topic validation and `+` / `#` filter matching
//! - [`client`]: a thin blocking session on top of the above
//!
//! Encoding and decoding are pure functions over caller buffers. Decoded
//! packets borrow their strings and payload from the buffer they came from.
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{Decode, Encode, Packet, Publish, QoS};
//!
//! let publish = Publish {
//!     qos: QoS::AtLeastOnce,
//!     packet_id: Some(10),
//!     ..Publish::new("sensors/temperature", b"23.5")
//! };
//! let bytes = publish.to_vec::<64>().unwrap();
//!
//! match Packet::decode(&bytes).unwrap() {
//!     Packet::Publish(received) => {
//!         assert_eq!(received.topic, "sensors/temperature");
//!         assert_eq!(received.payload, b"23.5");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert_eq!(Publish::decode(&bytes).unwrap().packet_id, Some(10));
//! ```

pub mod client;
mod error;
pub mod frame;
pub mod header;
pub mod packet;
pub mod string;
pub mod topic;
pub mod varint;
pub mod wire;

pub use client::{Client, Options};
pub use error::Error;
pub use frame::{read_frame, read_frame_into};
#[cfg(feature = "async")]
pub use frame::read_frame_into_async;
pub use header::PacketKind;
pub use packet::{
    Connack, ConnectReturnCode, Connect, Decode, Disconnect, Encode, LastWill, Packet, Pingreq,
    Pingresp, Puback, Publish, QoS, Suback, Subscribe,
};
pub use topic::{Topic, TopicFilter, matches};
