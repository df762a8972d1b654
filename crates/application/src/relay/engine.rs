use super::response_state::ResponseHeaderState;
use crate::ports::{BoxedStream, FrameSink, MessageSource, NoRetry, RetryHook};
use crate::session::SessionContext;
use futures::future::{self, Either};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};
use vless_relay_domain::{ResponseHeader, TunnelError};

pub const DEFAULT_BUFFER_SIZE: usize = 16 * 1024;

/// Which side ended the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedBy {
    Outbound,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub closed_by: ClosedBy,
    /// Bytes written to the outbound socket, trailing header payload included.
    pub uplink_bytes: u64,
    /// Bytes read from the outbound socket, response header excluded.
    pub downlink_bytes: u64,
}

/// Pumps bytes between a client transport and an outbound stream.
///
/// Both directions are polled concurrently inside the session task. The
/// first direction to finish or fail ends the relay; the other one is
/// dropped and the outbound socket is shut down.
pub struct RelayEngine {
    retry: Arc<dyn RetryHook>,
    buffer_size: usize,
}

impl RelayEngine {
    pub fn new() -> Self {
        Self {
            retry: Arc::new(NoRetry),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_retry_hook(mut self, hook: Arc<dyn RetryHook>) -> Self {
        self.retry = hook;
        self
    }

    pub async fn run<S, K>(
        &self,
        ctx: &SessionContext,
        outbound: BoxedStream,
        first_payload: &[u8],
        response_header: ResponseHeader,
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let (mut reader, mut writer) = tokio::io::split(outbound);

        if !first_payload.is_empty() {
            writer
                .write_all(first_payload)
                .await
                .map_err(|e| self.outbound_error(ctx, e))?;
        }

        let mut uplink_bytes = first_payload.len() as u64;
        let mut downlink_bytes = 0u64;

        let result = {
            let uplink = self.pump_uplink(ctx, source, &mut writer, &mut uplink_bytes);
            let downlink = self.pump_downlink(
                ctx,
                &mut reader,
                sink,
                response_header,
                &mut downlink_bytes,
            );

            tokio::pin!(uplink);
            tokio::pin!(downlink);

            match future::select(uplink, downlink).await {
                Either::Left((result, _)) => result.map(|()| ClosedBy::Transport),
                Either::Right((result, _)) => result.map(|()| ClosedBy::Outbound),
            }
        };

        let _ = writer.shutdown().await;

        let closed_by = result?;
        debug!(
            session = %ctx,
            closed_by = ?closed_by,
            uplink_bytes,
            downlink_bytes,
            "Relay finished"
        );

        Ok(RelaySummary {
            closed_by,
            uplink_bytes,
            downlink_bytes,
        })
    }

    async fn pump_uplink<S, W>(
        &self,
        ctx: &SessionContext,
        source: &mut S,
        writer: &mut W,
        transferred: &mut u64,
    ) -> Result<(), TunnelError>
    where
        S: MessageSource + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        while let Some(message) = source.next_message().await {
            let chunk = message?;
            if chunk.is_empty() {
                continue;
            }
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| self.outbound_error(ctx, e))?;
            *transferred += chunk.len() as u64;
            trace!(session = %ctx, bytes = chunk.len(), "client -> outbound");
        }

        debug!(session = %ctx, "Transport closed");
        Ok(())
    }

    async fn pump_downlink<R, K>(
        &self,
        ctx: &SessionContext,
        reader: &mut R,
        sink: &mut K,
        response_header: ResponseHeader,
        transferred: &mut u64,
    ) -> Result<(), TunnelError>
    where
        R: AsyncRead + Unpin + ?Sized,
        K: FrameSink + ?Sized,
    {
        let mut header = ResponseHeaderState::new(response_header);
        let mut buf = vec![0u8; self.buffer_size];

        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| self.outbound_error(ctx, e))?;

            if n == 0 {
                debug!(session = %ctx, "Outbound closed, ending stream");
                sink.end_stream().await?;
                return Ok(());
            }

            sink.send_frame(header.frame(&buf[..n])).await?;
            *transferred += n as u64;
            trace!(session = %ctx, bytes = n, "outbound -> client");
        }
    }

    fn outbound_error(&self, ctx: &SessionContext, e: std::io::Error) -> TunnelError {
        let error = TunnelError::RelayIo(e.to_string());
        warn!(session = %ctx, error = %error, "Outbound socket error");
        self.retry.on_outbound_error(ctx, &error);
        error
    }
}

impl Default for RelayEngine {
    fn default() -> Self {
        Self::new()
    }
}
