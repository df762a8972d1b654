use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use vless_relay_application::use_cases::HandleSessionUseCase;
use vless_relay_infrastructure::TunnelServer;

pub async fn start_tunnel_server(
    bind_addr: String,
    use_case: Arc<HandleSessionUseCase>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let server = TunnelServer::bind(socket_addr, use_case)?;

    info!(bind_address = %server.local_addr()?, "Starting tunnel server");
    server.run(shutdown).await?;
    Ok(())
}
