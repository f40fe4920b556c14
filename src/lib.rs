//! # libmqtt - MQTT 3.1.1 client codec
//!
//! A `no_std` Rust library for talking MQTT 3.1.1 from embedded devices and
//! small hosts. It turns packets into bytes and bytes into packets, pulls
//! exactly one packet at a time out of a byte stream, and matches topics
//! against wildcard filters. Nothing in it allocates.
//!
//! ## Features
//!
//! - Remaining Length and UTF-8 field codecs
//! - CONNECT, CONNACK, PUBLISH, PUBACK, SUBSCRIBE, SUBACK, PINGREQ, PINGRESP
//!   and DISCONNECT packets, with strict fixed header validation
//! - Stream deframing over any transport implementing [`network::Read`]
//! - Topic name and filter validation, `+` / `#` matching
//! - A thin blocking [`Client`](network::application::mqtt::Client)
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libmqtt = "0.1.0"
//! ```
//!
//! ### Decoding a packet
//!
//! ```rust
//! use libmqtt::network::application::mqtt::{Packet, Suback};
//!
//! let bytes = [0x90, 0x03, 0x00, 0x01, 0x01];
//! assert_eq!(
//!     Packet::decode(&bytes),
//!     Ok(Packet::Suback(Suback { packet_id: 1, return_code: 1 }))
//! );
//! ```
//!
//! ### MQTT Client Example
//!
//! ```rust,no_run
//! use libmqtt::network::application::mqtt::{Client, Options, QoS};
//! # use libmqtt::network::Connection;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl libmqtt::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libmqtt::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libmqtt::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn main() -> Result<(), libmqtt::network::application::mqtt::Error> {
//! let options = Options::new("my_device");
//! let mut client: Client<_, 512> = Client::connect(MockConnection, &options)?;
//! client.publish("sensors/temperature", b"23.5", QoS::AtMostOnce)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based IoT devices (Raspberry Pi, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `async`: Enable the async transport traits and deframer
//! - `defmt`: Enable defmt formatting and logging for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Transport traits and the MQTT codec built on them.
pub mod network;
