use super::{Encode, QoS};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::PacketKind;
use crate::network::application::mqtt::string;
use crate::network::application::mqtt::wire::Writer;

/// Protocol name carried in every CONNECT.
pub const PROTOCOL_NAME: &str = "MQTT";
/// Protocol level for MQTT 3.1.1.
pub const PROTOCOL_LEVEL: u8 = 4;

// connect flags, bit 0 is reserved and always 0
const USERNAME: u8 = 0b1000_0000;
const PASSWORD: u8 = 0b0100_0000;
const WILL_RETAIN: u8 = 0b0010_0000;
const WILL_QOS_SHIFT: u8 = 3;
const WILL: u8 = 0b0000_0100;
const CLEAN_SESSION: u8 = 0b0000_0010;

// protocol name field + level + flags + keep-alive
const VARIABLE_HEADER_LEN: usize = 2 + PROTOCOL_NAME.len() + 1 + 1 + 2;

/// Message the server publishes on the client's behalf if it vanishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastWill<'a> {
    /// Topic the will is published to.
    pub topic: &'a str,
    /// Will payload.
    pub message: &'a [u8],
    /// QoS of the will message.
    pub qos: QoS,
    /// Whether the will is retained.
    pub retain: bool,
}

/// CONNECT, the first packet a client sends.
///
/// Only the client writes this packet, so there is no decoder.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{Connect, Encode};
///
/// let connect = Connect {
///     keep_alive_seconds: 30,
///     ..Connect::new("sensor-7")
/// };
/// let mut buf = [0u8; 32];
/// let len = connect.encode(&mut buf).unwrap();
/// assert_eq!(&buf[2..9], &[0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04]);
/// assert_eq!(len, 2 + 10 + 2 + 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connect<'a> {
    /// Identifies the client to the server.
    pub client_id: &'a str,
    /// Discard any stored session on connect.
    pub clean_session: bool,
    /// Longest silence the server tolerates, in seconds; 0 disables it.
    pub keep_alive_seconds: u16,
    /// Username for brokers that require credentials.
    pub username: Option<&'a str>,
    /// Password bytes; requires a username.
    pub password: Option<&'a [u8]>,
    /// Last will, published if the client disconnects uncleanly.
    pub will: Option<LastWill<'a>>,
}

impl<'a> Connect<'a> {
    /// Clean session, 60 second keep-alive, no credentials and no will.
    pub const fn new(client_id: &'a str) -> Self {
        Self {
            client_id,
            clean_session: true,
            keep_alive_seconds: 60,
            username: None,
            password: None,
            will: None,
        }
    }

    /// The connect-flags byte of the variable header.
    pub fn connect_flags(&self) -> u8 {
        let mut flags = 0;
        if self.username.is_some() {
            flags |= USERNAME;
        }
        if self.password.is_some() {
            flags |= PASSWORD;
        }
        if let Some(will) = &self.will {
            flags |= WILL | ((will.qos as u8) << WILL_QOS_SHIFT);
            if will.retain {
                flags |= WILL_RETAIN;
            }
        }
        if self.clean_session {
            flags |= CLEAN_SESSION;
        }
        flags
    }
}

impl Encode for Connect<'_> {
    const KIND: PacketKind = PacketKind::Connect;

    fn remaining_length(&self) -> usize {
        let mut len = VARIABLE_HEADER_LEN + string::encoded_len(self.client_id);
        if let Some(will) = &self.will {
            len += string::encoded_len(will.topic) + 2 + will.message.len();
        }
        if let Some(username) = self.username {
            len += string::encoded_len(username);
        }
        if let Some(password) = self.password {
            len += 2 + password.len();
        }
        len
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        // a password is only allowed together with a user name
        if self.password.is_some() && self.username.is_none() {
            return Err(Error::MalformedFlags {
                kind: Self::KIND,
                flags: self.connect_flags(),
            });
        }

        w.put_str(PROTOCOL_NAME)?;
        w.put_u8(PROTOCOL_LEVEL)?;
        w.put_u8(self.connect_flags())?;
        w.put_u16(self.keep_alive_seconds)?;

        w.put_str(self.client_id)?;
        if let Some(will) = &self.will {
            w.put_str(will.topic)?;
            w.put_binary(will.message)?;
        }
        if let Some(username) = self.username {
            w.put_str(username)?;
        }
        if let Some(password) = self.password {
            w.put_binary(password)?;
        }
        Ok(())
    }
}
