use crate::ports::{FrameSink, MessageSource, NoRetry, OutboundConnector, RetryHook};
use crate::relay::{DnsQueryHandler, RelayEngine, RelaySummary};
use crate::session::{SessionContext, SessionState};
use std::sync::Arc;
use tracing::{debug, info, warn};
use vless_relay_domain::{parse_header, Identity, ParsedHeader, TunnelError, UpstreamEndpoint};

/// Drives one client session from its first message to teardown.
///
/// The first transport message is parsed as the request header exactly once;
/// everything after it is relay payload. A session ends in `Rejected` when it
/// fails before relaying (bad header, wrong identity, failed connect) and in
/// `Closed` otherwise. The transport is closed on every exit path.
pub struct HandleSessionUseCase {
    identity: Arc<Identity>,
    connector: Arc<dyn OutboundConnector>,
    relay: Arc<RelayEngine>,
    dns: DnsQueryHandler,
}

impl HandleSessionUseCase {
    pub fn new(
        identity: Arc<Identity>,
        connector: Arc<dyn OutboundConnector>,
        dns_upstream: UpstreamEndpoint,
    ) -> Self {
        Self::with_retry_hook(identity, connector, dns_upstream, Arc::new(NoRetry))
    }

    pub fn with_retry_hook(
        identity: Arc<Identity>,
        connector: Arc<dyn OutboundConnector>,
        dns_upstream: UpstreamEndpoint,
        retry: Arc<dyn RetryHook>,
    ) -> Self {
        let relay = Arc::new(RelayEngine::new().with_retry_hook(retry));
        let dns = DnsQueryHandler::new(connector.clone(), dns_upstream, relay.clone());
        Self {
            identity,
            connector,
            relay,
            dns,
        }
    }

    pub async fn execute<S, K>(
        &self,
        ctx: &mut SessionContext,
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let outcome = self.run(ctx, source, sink).await;
        sink.close().await;

        match &outcome {
            Ok(summary) => {
                ctx.transition(SessionState::Closed);
                info!(
                    session = %ctx,
                    uplink_bytes = summary.uplink_bytes,
                    downlink_bytes = summary.downlink_bytes,
                    "Session closed"
                );
            }
            Err(e) if ctx.state() == SessionState::Rejected => {
                warn!(session = %ctx, error = %e, "Session rejected");
            }
            Err(e) => {
                ctx.transition(SessionState::Closed);
                warn!(session = %ctx, error = %e, "Session ended with error");
            }
        }

        outcome
    }

    async fn run<S, K>(
        &self,
        ctx: &mut SessionContext,
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let first = match source.next_message().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => {
                ctx.transition(SessionState::Rejected);
                return Err(e);
            }
            None => {
                ctx.transition(SessionState::Rejected);
                return Err(TunnelError::TransportClosed);
            }
        };

        ctx.transition(SessionState::Authenticating);
        let header = match parse_header(&first, &self.identity) {
            Ok(header) => header,
            Err(e) => {
                ctx.transition(SessionState::Rejected);
                return Err(e.into());
            }
        };

        ctx.record_header(&header);
        ctx.transition(SessionState::Dispatching);

        let payload = header.payload(&first);
        if header.is_dns() {
            ctx.transition(SessionState::DnsRelay);
            return self.dns_relay(ctx, &header, payload, source, sink).await;
        }

        ctx.transition(SessionState::TcpRelay);
        self.tcp_relay(ctx, &header, payload, source, sink).await
    }

    async fn tcp_relay<S, K>(
        &self,
        ctx: &mut SessionContext,
        header: &ParsedHeader,
        payload: &[u8],
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let host = header.address.host();
        let stream = match self.connector.connect(&host, header.port).await {
            Ok(stream) => stream,
            Err(e) => {
                ctx.transition(SessionState::Rejected);
                return Err(e);
            }
        };

        debug!(session = %ctx, payload_len = payload.len(), "Outbound connected");
        self.relay
            .run(ctx, stream, payload, header.response_header(), source, sink)
            .await
    }

    async fn dns_relay<S, K>(
        &self,
        ctx: &mut SessionContext,
        header: &ParsedHeader,
        query: &[u8],
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        match self
            .dns
            .handle(ctx, query, header.response_header(), source, sink)
            .await
        {
            Err(e @ TunnelError::ConnectFailed { .. }) => {
                ctx.transition(SessionState::Rejected);
                Err(e)
            }
            other => other,
        }
    }
}
