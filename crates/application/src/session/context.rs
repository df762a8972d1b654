use super::state::SessionState;
use std::fmt;
use std::net::SocketAddr;
use tracing::debug;
use vless_relay_domain::{Command, ParsedHeader};

/// Per-session values carried into every log line of that session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: u64,
    peer: Option<SocketAddr>,
    destination: Option<(String, u16)>,
    command: Option<Command>,
    state: SessionState,
}

impl SessionContext {
    pub fn new(id: u64, peer: Option<SocketAddr>) -> Self {
        Self {
            id,
            peer,
            destination: None,
            command: None,
            state: SessionState::AwaitingHeader,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn destination(&self) -> Option<(&str, u16)> {
        self.destination
            .as_ref()
            .map(|(host, port)| (host.as_str(), *port))
    }

    pub fn record_header(&mut self, header: &ParsedHeader) {
        self.destination = Some((header.address.host(), header.port));
        self.command = Some(header.command);
    }

    pub fn transition(&mut self, next: SessionState) {
        debug!(session = %self, from = %self.state, to = %next, "Session state change");
        self.state = next;
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)?;
        if let Some(peer) = self.peer {
            write!(f, " {}", peer)?;
        }
        if let Some((host, port)) = &self.destination {
            if host.contains(':') {
                write!(f, " -> [{}]:{}", host, port)?;
            } else {
                write!(f, " -> {}:{}", host, port)?;
            }
        }
        if let Some(command) = self.command {
            write!(f, " {}", command.as_str())?;
        }
        Ok(())
    }
}
