mod outbound_connector;
mod retry_hook;
mod transport;

pub use outbound_connector::{BoxedStream, OutboundConnector, OutboundStream};
pub use retry_hook::{NoRetry, RetryHook};
pub use transport::{FrameSink, MessageSource};
