//! VLESS Relay Domain Layer
pub mod address;
pub mod config;
pub mod cursor;
pub mod endpoint;
pub mod errors;
pub mod header;
pub mod identity;

pub use address::{Address, AddressType};
pub use config::{CliOverrides, Config, ConfigError};
pub use cursor::ByteCursor;
pub use endpoint::UpstreamEndpoint;
pub use errors::{ProtocolError, TunnelError};
pub use header::{parse_header, Command, ParsedHeader, ResponseHeader, MIN_HEADER_LEN};
pub use identity::Identity;
