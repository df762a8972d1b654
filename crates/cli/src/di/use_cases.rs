use std::sync::Arc;
use tracing::info;
use vless_relay_application::ports::OutboundConnector;
use vless_relay_application::use_cases::HandleSessionUseCase;
use vless_relay_domain::Config;
use vless_relay_infrastructure::TcpConnector;

pub struct UseCases {
    pub handle_session: Arc<HandleSessionUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let identity = Arc::new(config.tunnel.identity()?);
        let dns_upstream = config.dns.upstream_endpoint()?;
        let connector: Arc<dyn OutboundConnector> =
            Arc::new(TcpConnector::from_config(&config.outbound));

        info!(
            dns_upstream = %dns_upstream,
            nodelay = config.outbound.nodelay,
            connect_timeout = ?config.outbound.connect_timeout(),
            "Session pipeline ready"
        );

        Ok(Self {
            handle_session: Arc::new(HandleSessionUseCase::new(
                identity,
                connector,
                dns_upstream,
            )),
        })
    }
}
