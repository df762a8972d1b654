#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tokio::sync::mpsc;
use vless_relay_application::ports::{FrameSink, MessageSource};
use vless_relay_domain::TunnelError;

pub type SourceHandle = mpsc::UnboundedSender<Result<Bytes, TunnelError>>;

/// Inbound messages fed by the test through a channel. Dropping the handle
/// closes the transport.
pub struct MockSource {
    rx: mpsc::UnboundedReceiver<Result<Bytes, TunnelError>>,
}

impl MockSource {
    pub fn new() -> (SourceHandle, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    pub fn with_first(message: Vec<u8>) -> (SourceHandle, Self) {
        let (tx, source) = Self::new();
        tx.send(Ok(Bytes::from(message))).unwrap();
        (tx, source)
    }
}

#[async_trait]
impl MessageSource for MockSource {
    async fn next_message(&mut self) -> Option<Result<Bytes, TunnelError>> {
        self.rx.recv().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Frame(Vec<u8>),
    EndOfStream,
    Closed,
}

/// Records everything the session sends toward the client.
pub struct MockSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
    fail_frames: bool,
}

pub struct SinkEvents {
    rx: mpsc::UnboundedReceiver<SinkEvent>,
}

impl MockSink {
    pub fn new() -> (Self, SinkEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                fail_frames: false,
            },
            SinkEvents { rx },
        )
    }

    pub fn failing() -> (Self, SinkEvents) {
        let (mut sink, events) = Self::new();
        sink.fail_frames = true;
        (sink, events)
    }
}

#[async_trait]
impl FrameSink for MockSink {
    async fn send_frame(&mut self, frame: Bytes) -> Result<(), TunnelError> {
        if self.fail_frames {
            return Err(TunnelError::Transport("peer gone".to_string()));
        }
        let _ = self.tx.send(SinkEvent::Frame(frame.to_vec()));
        Ok(())
    }

    async fn end_stream(&mut self) -> Result<(), TunnelError> {
        let _ = self.tx.send(SinkEvent::EndOfStream);
        Ok(())
    }

    async fn close(&mut self) {
        let _ = self.tx.send(SinkEvent::Closed);
    }
}

impl SinkEvents {
    pub async fn next(&mut self) -> SinkEvent {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for sink event")
            .expect("sink dropped")
    }

    /// Remaining events once the session task has finished.
    pub fn drain(&mut self) -> Vec<SinkEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
