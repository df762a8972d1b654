use async_trait::async_trait;
use bytes::Bytes;
use vless_relay_domain::TunnelError;

/// Inbound half of a message-oriented client connection.
#[async_trait]
pub trait MessageSource: Send {
    /// Next inbound message, or `None` once the peer has closed.
    async fn next_message(&mut self) -> Option<Result<Bytes, TunnelError>>;
}

/// Outbound half of a message-oriented client connection.
#[async_trait]
pub trait FrameSink: Send {
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), TunnelError>;

    /// Tells the peer no more frames will follow.
    async fn end_stream(&mut self) -> Result<(), TunnelError>;

    /// Best-effort close. Safe to call more than once.
    async fn close(&mut self);
}
