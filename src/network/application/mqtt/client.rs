//! A small blocking MQTT 3.1.1 client over any [`Connection`].
//!
//! The client strings the codec together: it writes packets with [`Encode`],
//! reads them back with [`read_frame_into`] and decodes them with
//! [`Packet::decode`]. It keeps two fixed buffers of `N` bytes and a packet
//! identifier counter, and nothing else. There is no retry, no in-flight
//! tracking and no QoS 2 handshake; acknowledgments the broker sends for QoS 1
//! publishes come back through [`Client::poll`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use libmqtt::network::application::mqtt::{Client, Options, Packet, QoS};
//! # use libmqtt::network::Connection;
//! # struct TcpConnection;
//! # impl Connection for TcpConnection {}
//! # impl libmqtt::network::Read for TcpConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl libmqtt::network::Write for TcpConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl libmqtt::network::Close for TcpConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn main() -> Result<(), libmqtt::network::application::mqtt::Error> {
//! let options = Options::from_json(r#"{"client_id":"weather_station","keep_alive_seconds":120}"#)?;
//! let mut client: Client<_> = Client::connect(TcpConnection, &options)?;
//!
//! client.subscribe("commands/+", QoS::AtLeastOnce)?;
//! client.publish("sensors/temperature", b"23.5", QoS::AtMostOnce)?;
//!
//! if let Packet::Publish(message) = client.poll()? {
//!     if let Some(id) = message.packet_id {
//!         client.acknowledge(id)?;
//!     }
//! }
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```

use super::error::Error;
use super::frame::{read_frame_into, write_all};
use super::packet::{
    Connect, Disconnect, Encode, Packet, Pingreq, Puback, Publish, QoS, Subscribe,
};
use super::topic::{Topic, TopicFilter};
use crate::network::Connection;
use serde::Deserialize;

const DEFAULT_KEEP_ALIVE_SECONDS: u16 = 60;

fn default_keep_alive_seconds() -> u16 {
    DEFAULT_KEEP_ALIVE_SECONDS
}

fn default_clean_session() -> bool {
    true
}

/// Connection options.
///
/// Usually built in code, but can also be read from a JSON document so that
/// device configuration can live next to the firmware image:
///
/// ```rust
/// use libmqtt::network::application::mqtt::Options;
///
/// let options = Options::from_json(r#"{"client_id":"my_iot_device","username":"dev"}"#).unwrap();
/// assert_eq!(options.client_id, "my_iot_device");
/// assert_eq!(options.keep_alive_seconds, 60);
/// assert!(options.clean_session);
/// assert_eq!(options.username, Some("dev"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Options<'a> {
    /// The client identifier, unique per broker.
    ///
    /// Brokers must accept identifiers of 1-23 bytes; many accept longer ones.
    /// If another client connects with the same identifier the broker
    /// disconnects the older one.
    pub client_id: &'a str,

    /// Maximum idle time in seconds before the broker considers the client
    /// gone. Zero disables keep-alive. Defaults to 60.
    #[serde(default = "default_keep_alive_seconds")]
    pub keep_alive_seconds: u16,

    /// Whether the broker should discard any previous session. Defaults to
    /// `true`.
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,

    /// Username, if the broker requires credentials.
    #[serde(default, borrow)]
    pub username: Option<&'a str>,

    /// Password, sent only together with a username.
    #[serde(default, borrow)]
    pub password: Option<&'a str>,
}

impl<'a> Options<'a> {
    /// Options with the defaults for everything but the client identifier.
    pub const fn new(client_id: &'a str) -> Self {
        Self {
            client_id,
            keep_alive_seconds: DEFAULT_KEEP_ALIVE_SECONDS,
            clean_session: true,
            username: None,
            password: None,
        }
    }

    /// Parse options from JSON. Strings are borrowed from `json` and must not
    /// contain escape sequences.
    pub fn from_json(json: &'a str) -> Result<Self, Error> {
        serde_json_core::from_str(json)
            .map(|(options, _)| options)
            .map_err(|_| Error::InvalidOptions)
    }
}

impl<'a> From<&Options<'a>> for Connect<'a> {
    fn from(options: &Options<'a>) -> Self {
        Connect {
            client_id: options.client_id,
            clean_session: options.clean_session,
            keep_alive_seconds: options.keep_alive_seconds,
            username: options.username,
            password: options.password.map(str::as_bytes),
            will: None,
        }
    }
}

/// An MQTT client session over connection `C`.
///
/// `N` is the size of each of the two packet buffers. Outbound packets that
/// do not fit fail with [`Error::BufferTooSmall`]; inbound ones with
/// [`Error::PacketTooLarge`].
pub struct Client<C: Connection, const N: usize = 1024> {
    connection: C,
    rx: [u8; N],
    tx: [u8; N],
    last_packet_id: u16,
    session_present: bool,
}

impl<C: Connection, const N: usize> core::fmt::Debug for Client<C, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Client")
            .field("buffer_size", &N)
            .field("last_packet_id", &self.last_packet_id)
            .field("session_present", &self.session_present)
            .finish_non_exhaustive()
    }
}

impl<C: Connection, const N: usize> Client<C, N> {
    /// Send CONNECT over `connection` and wait for the CONNACK.
    ///
    /// # Errors
    ///
    /// * [`Error::ConnectionRefused`] - the broker answered with a refusal code
    /// * [`Error::UnexpectedPacket`] - the broker answered with something else
    /// * any write, framing or decode error from the exchange
    pub fn connect(connection: C, options: &Options<'_>) -> Result<Self, Error> {
        let mut client = Self {
            connection,
            rx: [0; N],
            tx: [0; N],
            last_packet_id: 0,
            session_present: false,
        };

        client.send(&Connect::from(options))?;
        match client.receive()? {
            Packet::Connack(connack) if connack.is_success() => {
                client.session_present = connack.session_present;
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "Connected as {}, session present: {}",
                    options.client_id,
                    connack.session_present
                );
                Ok(client)
            }
            Packet::Connack(connack) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Connection refused: {}", connack.description());
                Err(Error::ConnectionRefused(connack.code()))
            }
            other => Err(Error::UnexpectedPacket(other.kind())),
        }
    }

    /// Whether the broker resumed a stored session.
    pub fn session_present(&self) -> bool {
        self.session_present
    }

    /// The underlying transport.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Give the connection back without sending DISCONNECT.
    pub fn into_inner(self) -> C {
        self.connection
    }

    /// Publish `payload` on `topic`.
    ///
    /// Returns the packet identifier used for QoS 1 and 2, so the caller can
    /// match the PUBACK that [`Client::poll`] later yields. Does not wait for
    /// any acknowledgment.
    pub fn publish(&mut self, topic: &str, payload: &[u8], qos: QoS) -> Result<Option<u16>, Error> {
        let topic = Topic::new(topic)?;
        let packet_id = match qos {
            QoS::AtMostOnce => None,
            _ => Some(self.next_packet_id()),
        };
        self.send(&Publish {
            topic: topic.as_str(),
            qos,
            payload,
            packet_id,
            dup: false,
            retain: false,
        })?;
        Ok(packet_id)
    }

    /// Subscribe to `filter` and wait for the SUBACK.
    ///
    /// Returns the QoS the broker granted. The SUBACK must be the next packet
    /// on the stream; a PUBLISH arriving first fails with
    /// [`Error::UnexpectedPacket`].
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidFilterSyntax`] - `filter` is not a valid filter
    /// * [`Error::UnexpectedPacketId`] - the SUBACK answers another request
    /// * [`Error::SubscriptionRejected`] - the broker refused the subscription
    pub fn subscribe(&mut self, filter: &str, qos: QoS) -> Result<QoS, Error> {
        let filter = TopicFilter::new(filter)?;
        let packet_id = self.next_packet_id();
        self.send(&Subscribe {
            packet_id,
            topic_filter: filter.as_str(),
            qos,
        })?;

        let suback = match self.receive()? {
            Packet::Suback(suback) => suback,
            other => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Expected SUBACK, got {}", other.kind());
                return Err(Error::UnexpectedPacket(other.kind()));
            }
        };
        if suback.packet_id != packet_id {
            return Err(Error::UnexpectedPacketId {
                expected: packet_id,
                actual: suback.packet_id,
            });
        }
        if !suback.is_success() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Subscription to {} rejected", filter.as_str());
            return Err(Error::SubscriptionRejected);
        }
        let granted = suback
            .granted_qos()
            .ok_or(Error::InvalidQoS(suback.return_code))?;
        #[cfg(feature = "defmt")]
        defmt::debug!("Subscribed to {} with {}", filter.as_str(), granted);
        Ok(granted)
    }

    /// Block until the next packet arrives and return it.
    ///
    /// The packet borrows the client's receive buffer and must be dropped
    /// before the client is used again.
    pub fn poll(&mut self) -> Result<Packet<'_>, Error> {
        self.receive()
    }

    /// Send the PUBACK for a received QoS 1 PUBLISH.
    pub fn acknowledge(&mut self, packet_id: u16) -> Result<(), Error> {
        self.send(&Puback { packet_id })
    }

    /// Send PINGREQ and wait for the PINGRESP.
    pub fn ping(&mut self) -> Result<(), Error> {
        self.send(&Pingreq)?;
        match self.receive()? {
            Packet::Pingresp(_) => Ok(()),
            other => Err(Error::UnexpectedPacket(other.kind())),
        }
    }

    /// Send DISCONNECT and close the connection.
    pub fn disconnect(mut self) -> Result<(), Error> {
        self.send(&Disconnect)?;
        self.connection.close().map_err(|_| Error::WriteError)
    }

    fn send<P: Encode>(&mut self, packet: &P) -> Result<(), Error> {
        let len = packet.encode(&mut self.tx)?;
        write_all(&mut self.connection, &self.tx[..len])
    }

    fn receive(&mut self) -> Result<Packet<'_>, Error> {
        let frame = read_frame_into(&mut self.connection, &mut self.rx)?;
        Packet::decode(frame)
    }

    // Identifiers are non-zero; the counter wraps from 65535 back to 1.
    fn next_packet_id(&mut self) -> u16 {
        self.last_packet_id = match self.last_packet_id.wrapping_add(1) {
            0 => 1,
            id => id,
        };
        self.last_packet_id
    }
}
