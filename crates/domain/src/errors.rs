use thiserror::Error;

/// Errors raised while decoding a request header.
///
/// Every variant is fatal to the session that produced it and is never
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Request header too short: needed {needed} bytes, got {available}")]
    TooShort { needed: usize, available: usize },

    #[error("Identity mismatch")]
    AuthFailed,

    #[error("Command {0} is not supported")]
    UnsupportedCommand(u8),

    #[error("Invalid address type: {0}")]
    UnsupportedAddressType(u8),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[derive(Error, Debug, Clone)]
pub enum TunnelError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Failed to connect to {target}: {reason}")]
    ConnectFailed { target: String, reason: String },

    #[error("Relay I/O error: {0}")]
    RelayIo(String),

    #[error("Transport closed before a request header arrived")]
    TransportClosed,

    #[error("Transport error: {0}")]
    Transport(String),
}

impl TunnelError {
    pub fn connect_failed(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::ConnectFailed {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for TunnelError {
    fn from(e: std::io::Error) -> Self {
        Self::RelayIo(e.to_string())
    }
}
