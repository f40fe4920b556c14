use super::{Decode, Encode};
use crate::network::application::mqtt::error::Error;
use crate::network::application::mqtt::header::{Frame, PacketKind};
use crate::network::application::mqtt::wire::Writer;

const BODY_LEN: usize = 2;
const SESSION_PRESENT: u8 = 0b0000_0001;

/// Outcome of a connection attempt, as reported in CONNACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectReturnCode {
    Accepted,
    UnacceptableProtocolVersion,
    IdentifierRejected,
    ServerUnavailable,
    BadUserNameOrPassword,
    NotAuthorized,
    /// A code above 5, which MQTT 3.1.1 does not define.
    Unknown(u8),
}

impl ConnectReturnCode {
    /// Numeric value as carried on the wire.
    pub const fn code(self) -> u8 {
        match self {
            ConnectReturnCode::Accepted => 0,
            ConnectReturnCode::UnacceptableProtocolVersion => 1,
            ConnectReturnCode::IdentifierRejected => 2,
            ConnectReturnCode::ServerUnavailable => 3,
            ConnectReturnCode::BadUserNameOrPassword => 4,
            ConnectReturnCode::NotAuthorized => 5,
            ConnectReturnCode::Unknown(code) => code,
        }
    }

    /// Human-readable meaning of the code.
    pub const fn description(self) -> &'static str {
        match self {
            ConnectReturnCode::Accepted => "Connection Accepted",
            ConnectReturnCode::UnacceptableProtocolVersion => {
                "Connection Refused: unacceptable protocol version"
            }
            ConnectReturnCode::IdentifierRejected => "Connection Refused: identifier rejected",
            ConnectReturnCode::ServerUnavailable => "Connection Refused: server unavailable",
            ConnectReturnCode::BadUserNameOrPassword => {
                "Connection Refused: bad user name or password"
            }
            ConnectReturnCode::NotAuthorized => "Connection Refused: not authorized",
            ConnectReturnCode::Unknown(_) => "Connection Refused: unknown error",
        }
    }
}

impl From<u8> for ConnectReturnCode {
    fn from(code: u8) -> Self {
        match code {
            0 => ConnectReturnCode::Accepted,
            1 => ConnectReturnCode::UnacceptableProtocolVersion,
            2 => ConnectReturnCode::IdentifierRejected,
            3 => ConnectReturnCode::ServerUnavailable,
            4 => ConnectReturnCode::BadUserNameOrPassword,
            5 => ConnectReturnCode::NotAuthorized,
            other => ConnectReturnCode::Unknown(other),
        }
    }
}

/// CONNACK, the server's answer to CONNECT.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{Connack, Decode};
///
/// let connack = Connack::decode(&[0x20, 0x02, 0x01, 0x00]).unwrap();
/// assert!(connack.session_present);
/// assert!(connack.is_success());
/// assert_eq!(connack.description(), "Connection Accepted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connack {
    /// Whether the server resumed a stored session.
    pub session_present: bool,
    /// Raw return code; see [`Connack::code`].
    pub return_code: u8,
}

impl Connack {
    /// CONNACK with the given flag and raw return code.
    pub const fn new(session_present: bool, return_code: u8) -> Self {
        Self {
            session_present,
            return_code,
        }
    }

    /// Whether the connection was accepted.
    pub const fn is_success(&self) -> bool {
        self.return_code == 0
    }

    /// Return code as a [`ConnectReturnCode`].
    pub fn code(&self) -> ConnectReturnCode {
        ConnectReturnCode::from(self.return_code)
    }

    /// Human-readable meaning of the return code.
    pub fn description(&self) -> &'static str {
        self.code().description()
    }
}

impl Encode for Connack {
    const KIND: PacketKind = PacketKind::Connack;

    fn remaining_length(&self) -> usize {
        BODY_LEN
    }

    fn encode_body(&self, w: &mut Writer<'_>) -> Result<(), Error> {
        w.put_u8(if self.session_present { SESSION_PRESENT } else { 0 })?;
        w.put_u8(self.return_code)
    }
}

impl Decode<'_> for Connack {
    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let frame = Frame::open_fixed(bytes, Self::KIND, BODY_LEN)?;
        let ack_flags = frame.body[0];
        if ack_flags & !SESSION_PRESENT != 0 {
            return Err(Error::MalformedFlags {
                kind: Self::KIND,
                flags: ack_flags,
            });
        }
        Ok(Self {
            session_present: ack_flags & SESSION_PRESENT != 0,
            return_code: frame.body[1],
        })
    }
}
