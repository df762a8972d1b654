use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;
use vless_relay_application::ports::{BoxedStream, OutboundConnector};
use vless_relay_domain::config::OutboundConfig;
use vless_relay_domain::TunnelError;

/// Dials destinations with a plain tokio `TcpStream`, one attempt per call.
pub struct TcpConnector {
    nodelay: bool,
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new(nodelay: bool, connect_timeout: Option<Duration>) -> Self {
        Self {
            nodelay,
            connect_timeout,
        }
    }

    pub fn from_config(config: &OutboundConfig) -> Self {
        Self::new(config.nodelay, config.connect_timeout())
    }

    async fn dial(&self, host: &str, port: u16) -> Result<TcpStream, TunnelError> {
        let target = display_target(host, port);
        let connect = TcpStream::connect((host, port));

        let stream = match self.connect_timeout {
            Some(timeout) => tokio::time::timeout(timeout, connect)
                .await
                .map_err(|_| {
                    TunnelError::connect_failed(
                        target.clone(),
                        format!("timed out after {}s", timeout.as_secs()),
                    )
                })?,
            None => connect.await,
        }
        .map_err(|e| TunnelError::connect_failed(target.clone(), e))?;

        if self.nodelay {
            stream
                .set_nodelay(true)
                .map_err(|e| TunnelError::connect_failed(target, e))?;
        }

        Ok(stream)
    }
}

#[async_trait]
impl OutboundConnector for TcpConnector {
    async fn connect(&self, host: &str, port: u16) -> Result<BoxedStream, TunnelError> {
        let stream = self.dial(host, port).await?;
        debug!(
            target_addr = %display_target(host, port),
            local = ?stream.local_addr().ok(),
            "Outbound TCP connected"
        );
        Ok(Box::new(stream))
    }
}

fn display_target(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
