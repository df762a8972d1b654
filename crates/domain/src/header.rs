use crate::address::{Address, AddressType};
use crate::cursor::ByteCursor;
use crate::errors::ProtocolError;
use crate::identity::Identity;

/// Smallest buffer worth parsing: fixed fields plus a minimal address.
pub const MIN_HEADER_LEN: usize = 24;

/// Requested outbound network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Tcp,
    Udp,
}

impl Command {
    pub fn code(&self) -> u8 {
        match self {
            Self::Tcp => 1,
            Self::Udp => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Tcp),
            2 => Ok(Self::Udp),
            other => Err(ProtocolError::UnsupportedCommand(other)),
        }
    }
}

/// Fields decoded from the first message of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub version: u8,
    pub command: Command,
    pub port: u16,
    pub address: Address,
    /// Offset in the raw message where the forwarded payload begins.
    pub raw_data_index: usize,
}

impl ParsedHeader {
    pub fn is_udp(&self) -> bool {
        self.command == Command::Udp
    }

    pub fn is_dns(&self) -> bool {
        self.is_udp() && self.port == 53
    }

    pub fn response_header(&self) -> ResponseHeader {
        ResponseHeader::new(self.version)
    }

    /// Trailing payload of `raw`, the message this header was parsed from.
    pub fn payload<'a>(&self, raw: &'a [u8]) -> &'a [u8] {
        raw.get(self.raw_data_index..).unwrap_or_default()
    }
}

/// Two-byte `[version, 0]` prefix sent once ahead of the first reply chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader([u8; 2]);

impl ResponseHeader {
    pub fn new(version: u8) -> Self {
        Self([version, 0])
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// Prepends the header to `chunk`.
    pub fn prefix(&self, chunk: &[u8]) -> Vec<u8> {
        let mut framed = Vec::with_capacity(self.0.len() + chunk.len());
        framed.extend_from_slice(&self.0);
        framed.extend_from_slice(chunk);
        framed
    }
}

/// Decodes a request header and checks it against `expected`.
///
/// Field offsets depend on the options length and on the address encoding,
/// so decoding walks a single cursor from the first byte to the payload.
pub fn parse_header(raw: &[u8], expected: &Identity) -> Result<ParsedHeader, ProtocolError> {
    if raw.len() < MIN_HEADER_LEN {
        return Err(ProtocolError::TooShort {
            needed: MIN_HEADER_LEN,
            available: raw.len(),
        });
    }

    let cursor = ByteCursor::new(raw);
    let (version, cursor) = cursor.read_u8()?;

    let (identity, cursor) = cursor.read_bytes(Identity::LEN)?;
    if !expected.matches(identity) {
        return Err(ProtocolError::AuthFailed);
    }

    let (options_len, cursor) = cursor.read_u8()?;
    let cursor = cursor.skip(options_len as usize)?;

    let (command, cursor) = cursor.read_u8()?;
    let command = Command::try_from(command)?;

    let (port, cursor) = cursor.read_u16_be()?;
    let (address_type, cursor) = cursor.read_u8()?;
    let (address, cursor) = AddressType::try_from(address_type)?.decode(cursor)?;

    Ok(ParsedHeader {
        version,
        command,
        port,
        address,
        raw_data_index: cursor.position(),
    })
}
