//! Fixed length payloads exchanged with the device
//!
//! Every payload is 64 bytes long. Effect commands start with a 10 byte header:
//!
//! | offset | len | field                        |
//! |--------|-----|------------------------------|
//! | 0      | 1   | prefix (`0x5a`)              |
//! | 1      | 2   | request type, big endian     |
//! | 3      | 2   | intermediate (`0x0196`)      |
//! | 5      | 1   | feature code                 |
//! | 6      | 4   | value, big endian            |
//!
//! The rest of the payload is zero. The report id expected by hidapi is added by the
//! transport, not here.

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::{INTERMEDIATE, PREFIX};

/// Length of a payload in bytes
pub const PACKET_LEN: usize = 64;

/// Length of a payload as lowercase hex characters
pub const PACKET_HEX_LEN: usize = PACKET_LEN * 2;

/// Length of the meaningful part of an effect command
pub const HEADER_LEN: usize = 10;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PacketError {
    #[error("expected a payload of {expected} hex characters, but it had {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unexpected character {found:?} at offset {offset}, payloads must match ^[a-f0-9]{{128}}$")]
    InvalidCharacter { offset: usize, found: char },

    #[error("hex decoding failed: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Stages a value (`Data`) or applies the staged value (`Commit`)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RequestType {
    Data,
    Commit,
}

impl RequestType {
    pub const fn code(self) -> u16 {
        match self {
            RequestType::Data => 0x1207,
            RequestType::Commit => 0x1103,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x1207 => Some(RequestType::Data),
            0x1103 => Some(RequestType::Commit),
            _ => None,
        }
    }

    /// Code as it appears in a hex encoded payload
    pub fn hex_code(self) -> String {
        format!("{:04x}", self.code())
    }
}

/// A single 64 byte payload
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Packet(Bytes);

impl Packet {
    /// Assembles an effect command
    pub fn build(request_type: RequestType, feature_code: u8, value: u32) -> Self {
        let mut buf = BytesMut::with_capacity(PACKET_LEN);
        buf.put_u8(PREFIX);
        buf.put_u16(request_type.code());
        buf.put_u16(INTERMEDIATE);
        buf.put_u8(feature_code);
        buf.put_u32(value);

        assert_eq!(
            buf.len(),
            HEADER_LEN,
            "assembled header should be {} hex characters, but it had {}: {}",
            HEADER_LEN * 2,
            buf.len() * 2,
            hex::encode(&buf)
        );

        buf.resize(PACKET_LEN, 0);

        assert_eq!(
            buf.len(),
            PACKET_LEN,
            "assembled payload should be {} hex characters, but it had {}",
            PACKET_HEX_LEN,
            buf.len() * 2
        );

        Packet(buf.freeze())
    }

    /// Builds the data packet carrying `value`, followed by its commit packet
    pub fn pair(feature_code: u8, value: u32) -> [Packet; 2] {
        [
            Packet::build(RequestType::Data, feature_code, value),
            Packet::build(RequestType::Commit, feature_code, 0),
        ]
    }

    /// Parses a recorded payload line
    pub fn from_hex(line: &str) -> Result<Self, PacketError> {
        let actual = line.chars().count();
        if actual != PACKET_HEX_LEN {
            return Err(PacketError::InvalidLength {
                expected: PACKET_HEX_LEN,
                actual,
            });
        }

        if let Some((offset, found)) = line
            .char_indices()
            .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(PacketError::InvalidCharacter { offset, found });
        }

        Ok(Packet(Bytes::from(hex::decode(line)?)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn header(&self) -> &[u8] {
        &self.0[..HEADER_LEN]
    }

    pub fn request_type(&self) -> Option<RequestType> {
        RequestType::from_code((&self.0[1..3]).get_u16())
    }

    pub fn feature_code(&self) -> u8 {
        self.0[5]
    }

    pub fn value(&self) -> u32 {
        (&self.0[6..HEADER_LEN]).get_u32()
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet {{ header: {:02x?}, request: {:?} }}",
            self.header(),
            self.request_type()
        )
    }
}
