use std::fmt;

/// Lifecycle of one client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHeader,
    Authenticating,
    Rejected,
    Dispatching,
    DnsRelay,
    TcpRelay,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingHeader => "awaiting_header",
            Self::Authenticating => "authenticating",
            Self::Rejected => "rejected",
            Self::Dispatching => "dispatching",
            Self::DnsRelay => "dns_relay",
            Self::TcpRelay => "tcp_relay",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
