use crate::cursor::ByteCursor;
use crate::errors::ProtocolError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address encoding tag carried in the request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    Ipv4,
    Domain,
    Ipv6,
}

impl AddressType {
    pub fn tag(&self) -> u8 {
        match self {
            Self::Ipv4 => 1,
            Self::Domain => 2,
            Self::Ipv6 => 3,
        }
    }

    /// Decodes one address of this type starting at `cursor`.
    pub fn decode<'a>(
        &self,
        cursor: ByteCursor<'a>,
    ) -> Result<(Address, ByteCursor<'a>), ProtocolError> {
        match self {
            Self::Ipv4 => {
                let (octets, next) = cursor.read_array::<4>()?;
                Ok((Address::Ipv4(Ipv4Addr::from(octets)), next))
            }
            Self::Domain => {
                let (len, next) = cursor.read_u8()?;
                if len == 0 {
                    return Err(ProtocolError::InvalidAddress(
                        "empty domain name".to_string(),
                    ));
                }
                let (raw, next) = next.read_bytes(len as usize)?;
                let name = std::str::from_utf8(raw).map_err(|e| {
                    ProtocolError::InvalidAddress(format!("domain is not valid UTF-8: {}", e))
                })?;
                Ok((Address::Domain(name.to_string()), next))
            }
            Self::Ipv6 => {
                let (octets, next) = cursor.read_array::<16>()?;
                Ok((Address::Ipv6(Ipv6Addr::from(octets)), next))
            }
        }
    }
}

impl TryFrom<u8> for AddressType {
    type Error = ProtocolError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::Ipv4),
            2 => Ok(Self::Domain),
            3 => Ok(Self::Ipv6),
            other => Err(ProtocolError::UnsupportedAddressType(other)),
        }
    }
}

/// Destination address decoded from a request header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    Ipv4(Ipv4Addr),
    Domain(String),
    Ipv6(Ipv6Addr),
}

impl Address {
    pub fn address_type(&self) -> AddressType {
        match self {
            Self::Ipv4(_) => AddressType::Ipv4,
            Self::Domain(_) => AddressType::Domain,
            Self::Ipv6(_) => AddressType::Ipv6,
        }
    }

    /// Host string suitable for an outbound connect.
    pub fn host(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(ip) => write!(f, "{}", ip),
            Self::Domain(name) => f.write_str(name),
            // Full eight-group form, no zero compression.
            Self::Ipv6(ip) => {
                for (i, segment) in ip.segments().iter().enumerate() {
                    if i > 0 {
                        f.write_str(":")?;
                    }
                    write!(f, "{:x}", segment)?;
                }
                Ok(())
            }
        }
    }
}

/// Decodes an address of `address_type` beginning at `start_index`.
///
/// Returns the address and the number of bytes consumed.
pub fn decode(
    buffer: &[u8],
    address_type: u8,
    start_index: usize,
) -> Result<(Address, usize), ProtocolError> {
    let kind = AddressType::try_from(address_type)?;
    let cursor = ByteCursor::at(buffer, start_index);
    let (address, next) = kind.decode(cursor)?;
    Ok((address, next.position() - start_index))
}
