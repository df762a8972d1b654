use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use vless_relay_domain::TunnelError;

pub trait OutboundStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> OutboundStream for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

pub type BoxedStream = Box<dyn OutboundStream>;

#[async_trait]
pub trait OutboundConnector: Send + Sync {
    /// Opens one stream to `host:port`. Never retried by the caller.
    async fn connect(&self, host: &str, port: u16) -> Result<BoxedStream, TunnelError>;
}
