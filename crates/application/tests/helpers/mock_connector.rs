#![allow(dead_code)]

use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream, ReadBuf};
use tokio::sync::mpsc;
use vless_relay_application::ports::{BoxedStream, OutboundConnector, RetryHook};
use vless_relay_application::session::SessionContext;
use vless_relay_domain::TunnelError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Connect,
    Refuse,
    Broken,
}

/// Hands the far end of every outbound connection to the test.
pub struct MockConnector {
    attempts: Mutex<Vec<(String, u16)>>,
    remotes: mpsc::UnboundedSender<DuplexStream>,
    mode: Mode,
}

pub struct Remotes {
    rx: mpsc::UnboundedReceiver<DuplexStream>,
}

impl MockConnector {
    pub fn new() -> (Arc<Self>, Remotes) {
        Self::with_mode(Mode::Connect)
    }

    pub fn refusing() -> (Arc<Self>, Remotes) {
        Self::with_mode(Mode::Refuse)
    }

    /// Connects, but every read from the outbound stream fails.
    pub fn broken() -> (Arc<Self>, Remotes) {
        Self::with_mode(Mode::Broken)
    }

    fn with_mode(mode: Mode) -> (Arc<Self>, Remotes) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connector = Arc::new(Self {
            attempts: Mutex::new(Vec::new()),
            remotes: tx,
            mode,
        });
        (connector, Remotes { rx })
    }

    pub fn attempts(&self) -> Vec<(String, u16)> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutboundConnector for MockConnector {
    async fn connect(&self, host: &str, port: u16) -> Result<BoxedStream, TunnelError> {
        self.attempts.lock().unwrap().push((host.to_string(), port));
        match self.mode {
            Mode::Refuse => Err(TunnelError::connect_failed(
                format!("{}:{}", host, port),
                "connection refused",
            )),
            Mode::Broken => Ok(Box::new(BrokenStream)),
            Mode::Connect => {
                let (local, remote) = tokio::io::duplex(64 * 1024);
                let _ = self.remotes.send(remote);
                Ok(Box::new(local))
            }
        }
    }
}

impl Remotes {
    pub async fn next(&mut self) -> DuplexStream {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for outbound connection")
            .expect("connector dropped")
    }
}

struct BrokenStream;

impl AsyncRead for BrokenStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )))
    }
}

impl AsyncWrite for BrokenStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Counts outbound failures reported to the hook.
#[derive(Default)]
pub struct RecordingRetryHook {
    errors: Mutex<Vec<String>>,
}

impl RecordingRetryHook {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl RetryHook for RecordingRetryHook {
    fn on_outbound_error(&self, _ctx: &SessionContext, error: &TunnelError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
