use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::WebSocketStream;
use tracing::trace;
use vless_relay_application::ports::{FrameSink, MessageSource};
use vless_relay_domain::TunnelError;

/// Splits an accepted WebSocket into the two halves a session consumes.
pub fn split<S>(ws: WebSocketStream<S>) -> (WsMessageSource<S>, WsFrameSink<S>)
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    let (sink, stream) = ws.split();
    (
        WsMessageSource { inner: stream },
        WsFrameSink {
            inner: sink,
            closed: false,
        },
    )
}

pub struct WsMessageSource<S> {
    inner: SplitStream<WebSocketStream<S>>,
}

#[async_trait]
impl<S> MessageSource for WsMessageSource<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn next_message(&mut self) -> Option<Result<Bytes, TunnelError>> {
        while let Some(item) = self.inner.next().await {
            match item {
                Ok(Message::Binary(data)) => return Some(Ok(data)),
                Ok(Message::Text(text)) => {
                    return Some(Ok(Bytes::copy_from_slice(text.as_bytes())))
                }
                Ok(Message::Close(frame)) => {
                    trace!(frame = ?frame, "WebSocket close received");
                    return None;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => continue,
                Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(TunnelError::Transport(e.to_string()))),
            }
        }
        None
    }
}

pub struct WsFrameSink<S> {
    inner: SplitSink<WebSocketStream<S>, Message>,
    closed: bool,
}

#[async_trait]
impl<S> FrameSink for WsFrameSink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), TunnelError> {
        if self.closed {
            return Err(TunnelError::TransportClosed);
        }
        self.inner
            .send(Message::Binary(frame))
            .await
            .map_err(|e| TunnelError::Transport(e.to_string()))
    }

    async fn end_stream(&mut self) -> Result<(), TunnelError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.inner
            .send(Message::Close(None))
            .await
            .map_err(|e| TunnelError::Transport(e.to_string()))
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.inner.close().await {
            trace!(error = %e, "WebSocket close failed");
        }
    }
}
