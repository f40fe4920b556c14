//! # Application Layer Protocols
//!
//! Protocols that sit on top of the [`Connection`](crate::network::Connection)
//! traits. Each protocol is connection agnostic: it works with any type that
//! can read and write raw bytes, and it never allocates.
//!
//! ## Available Protocols
//!
//! - **[`mqtt`]**: MQTT 3.1.1 packet codec, stream deframer, topic matching
//!   and a thin blocking client built on them
//!
//! ## Usage Pattern
//!
//! 1. Create a connection using your transport layer
//! 2. Encode packets into a buffer and write them out
//! 3. Deframe inbound bytes one packet at a time and decode them
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{Decode, Encode, Puback};
//!
//! let mut buf = [0u8; 4];
//! let len = Puback { packet_id: 7 }.encode(&mut buf).unwrap();
//! assert_eq!(&buf[..len], &[0x40, 0x02, 0x00, 0x07]);
//!
//! let decoded = Puback::decode(&buf[..len]).unwrap();
//! assert_eq!(decoded.packet_id, 7);
//! ```

/// MQTT 3.1.1 codec and client.
///
/// Provides the wire format (remaining length, UTF-8 fields, per-packet
/// layouts), the stream deframer and topic filter matching.
pub mod mqtt;
