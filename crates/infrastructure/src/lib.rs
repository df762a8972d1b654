//! VLESS Relay Infrastructure Layer
pub mod outbound;
pub mod server;
pub mod transport;

pub use outbound::TcpConnector;
pub use server::TunnelServer;
