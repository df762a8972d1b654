pub mod dns;
pub mod errors;
pub mod logging;
pub mod outbound;
pub mod root;
pub mod server;
pub mod tunnel;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use outbound::OutboundConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use tunnel::TunnelConfig;
