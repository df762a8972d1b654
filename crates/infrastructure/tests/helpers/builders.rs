#![allow(dead_code)]
use std::net::{SocketAddr, SocketAddrV4};
use std::sync::Arc;
use vless_relay_application::use_cases::HandleSessionUseCase;
use vless_relay_domain::{Identity, UpstreamEndpoint};
use vless_relay_infrastructure::TcpConnector;

pub const TEST_IDENTITY: &str = "d342d11e-d424-4583-b36e-524ab1f0afa4";

pub fn test_identity() -> Identity {
    TEST_IDENTITY.parse().unwrap()
}

pub fn session_use_case(dns_upstream: SocketAddr) -> Arc<HandleSessionUseCase> {
    let upstream = UpstreamEndpoint::new(dns_upstream.ip().to_string(), dns_upstream.port());
    Arc::new(HandleSessionUseCase::new(
        Arc::new(test_identity()),
        Arc::new(TcpConnector::new(true, None)),
        upstream,
    ))
}

/// First WebSocket message of a session, IPv4 destination only.
pub struct RequestBuilder {
    identity: [u8; 16],
    command: u8,
    destination: SocketAddrV4,
    payload: Vec<u8>,
}

impl RequestBuilder {
    pub fn tcp(destination: SocketAddr) -> Self {
        let destination = match destination {
            SocketAddr::V4(v4) => v4,
            SocketAddr::V6(_) => panic!("IPv4 destinations only"),
        };
        Self {
            identity: *test_identity().as_bytes(),
            command: 1,
            destination,
            payload: vec![],
        }
    }

    pub fn udp(destination: SocketAddr) -> Self {
        Self {
            command: 2,
            ..Self::tcp(destination)
        }
    }

    pub fn identity(mut self, identity: [u8; 16]) -> Self {
        self.identity = identity;
        self
    }

    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.payload = payload.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![0u8];
        buf.extend_from_slice(&self.identity);
        buf.push(0);
        buf.push(self.command);
        buf.extend_from_slice(&self.destination.port().to_be_bytes());
        buf.push(1);
        buf.extend_from_slice(&self.destination.ip().octets());
        buf.extend_from_slice(&self.payload);
        buf
    }
}
