use crate::transport;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vless_relay_application::session::SessionContext;
use vless_relay_application::use_cases::HandleSessionUseCase;

/// Pause after a failed `accept`, e.g. while the process is out of descriptors.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Accepts WebSocket clients and runs one independent session per connection.
pub struct TunnelServer {
    listener: TcpListener,
    use_case: Arc<HandleSessionUseCase>,
    next_session: AtomicU64,
}

impl TunnelServer {
    pub fn bind(addr: SocketAddr, use_case: Arc<HandleSessionUseCase>) -> io::Result<Self> {
        let listener = create_tcp_listener(addr)?;
        Ok(Self {
            listener,
            use_case,
            next_session: AtomicU64::new(1),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `shutdown` is cancelled.
    ///
    /// Sessions already running are left to finish on their own.
    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        let local = self.listener.local_addr()?;
        info!(listen = %local, "Tunnel server listening");

        loop {
            let (stream, peer) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Tunnel server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        if !accept_backoff(&shutdown).await {
                            info!("Tunnel server shutting down");
                            return Ok(());
                        }
                        continue;
                    }
                },
            };

            let id = self.next_session.fetch_add(1, Ordering::Relaxed);
            let use_case = self.use_case.clone();
            tokio::spawn(async move {
                serve_connection(id, stream, peer, use_case).await;
            });
        }
    }
}

async fn serve_connection(
    id: u64,
    stream: TcpStream,
    peer: SocketAddr,
    use_case: Arc<HandleSessionUseCase>,
) {
    let mut ctx = SessionContext::new(id, Some(peer));

    let ws = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(session = %ctx, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    debug!(session = %ctx, "Session accepted");
    let (mut source, mut sink) = transport::split(ws);
    if let Err(e) = use_case.execute(&mut ctx, &mut source, &mut sink).await {
        debug!(session = %ctx, error = %e, "Session task finished with error");
    }
}

/// Waits out `ACCEPT_ERROR_BACKOFF`. Returns `false` if `shutdown` fired first.
async fn accept_backoff(shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => true,
    }
}

fn create_tcp_listener(socket_addr: SocketAddr) -> io::Result<TcpListener> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
