mod dns;
mod engine;
mod response_state;

pub use dns::DnsQueryHandler;
pub use engine::{ClosedBy, RelayEngine, RelaySummary, DEFAULT_BUFFER_SIZE};
pub use response_state::ResponseHeaderState;
