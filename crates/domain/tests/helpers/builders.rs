#![allow(dead_code)]
use vless_relay_domain::{Address, Command, Identity};
use std::net::{Ipv4Addr, Ipv6Addr};

pub const TEST_IDENTITY: &str = "d342d11e-d424-4583-b36e-524ab1f0afa4";

pub fn test_identity() -> Identity {
    TEST_IDENTITY.parse().unwrap()
}

/// Assembles request headers byte by byte.
pub struct HeaderBuilder {
    version: u8,
    identity: [u8; 16],
    options: Vec<u8>,
    command: u8,
    port: u16,
    address_type: u8,
    address: Vec<u8>,
    payload: Vec<u8>,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self {
            version: 0,
            identity: *test_identity().as_bytes(),
            options: vec![],
            command: Command::Tcp.code(),
            port: 443,
            address_type: 1,
            address: vec![93, 184, 216, 34],
            payload: vec![],
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn identity(mut self, identity: [u8; 16]) -> Self {
        self.identity = identity;
        self
    }

    pub fn options(mut self, options: &[u8]) -> Self {
        self.options = options.to_vec();
        self
    }

    pub fn command(mut self, command: u8) -> Self {
        self.command = command;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn address(mut self, address: &Address) -> Self {
        self.address_type = address.address_type().tag();
        self.address.clear();
        encode_address(address, &mut self.address);
        self
    }

    pub fn ipv4(self, ip: [u8; 4]) -> Self {
        self.address(&Address::Ipv4(Ipv4Addr::from(ip)))
    }

    pub fn ipv6(self, ip: [u8; 16]) -> Self {
        self.address(&Address::Ipv6(Ipv6Addr::from(ip)))
    }

    pub fn domain(self, name: &str) -> Self {
        self.address(&Address::Domain(name.to_string()))
    }

    pub fn raw_address(mut self, address_type: u8, bytes: &[u8]) -> Self {
        self.address_type = address_type;
        self.address = bytes.to_vec();
        self
    }

    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(22 + self.options.len() + self.address.len());
        buf.push(self.version);
        buf.extend_from_slice(&self.identity);
        buf.push(self.options.len() as u8);
        buf.extend_from_slice(&self.options);
        buf.push(self.command);
        buf.extend_from_slice(&self.port.to_be_bytes());
        buf.push(self.address_type);
        buf.extend_from_slice(&self.address);
        buf.extend_from_slice(&self.payload);
        buf
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form of `address` without the type tag.
///
/// Panics on domains the one-byte length prefix cannot describe.
pub fn encode_address(address: &Address, buf: &mut Vec<u8>) {
    match address {
        Address::Ipv4(ip) => buf.extend_from_slice(&ip.octets()),
        Address::Domain(name) => {
            let len = u8::try_from(name.len()).expect("domain longer than 255 bytes");
            buf.push(len);
            buf.extend_from_slice(name.as_bytes());
        }
        Address::Ipv6(ip) => buf.extend_from_slice(&ip.octets()),
    }
}
