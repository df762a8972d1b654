use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use vless_relay_domain::CliOverrides;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "vless-relay")]
#[command(version)]
#[command(about = "VLESS over WebSocket relay with DNS-over-TCP forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen port
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<u16>,

    /// Client identity (UUID)
    #[arg(short = 'u', long, env = "UUID")]
    identity: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver for tunnelled DNS (HOST:PORT)
    #[arg(long)]
    dns_upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        identity: cli.identity.clone(),
        dns_upstream: cli.dns_upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting VLESS Relay v{}", env!("CARGO_PKG_VERSION"));

    let use_cases = di::UseCases::new(&config)?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    server::start_tunnel_server(
        config.server.listen_addr(),
        use_cases.handle_session,
        shutdown,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
