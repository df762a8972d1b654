use super::engine::{RelayEngine, RelaySummary};
use crate::ports::{FrameSink, MessageSource, OutboundConnector};
use crate::session::SessionContext;
use std::sync::Arc;
use tracing::debug;
use vless_relay_domain::{ResponseHeader, TunnelError, UpstreamEndpoint};

/// Sends DNS queries tunnelled as UDP to port 53 to a fixed resolver over TCP.
///
/// The client already frames each query with a two-byte length, which is
/// exactly the DNS-over-TCP framing, so chunks pass through unchanged.
pub struct DnsQueryHandler {
    connector: Arc<dyn OutboundConnector>,
    upstream: UpstreamEndpoint,
    relay: Arc<RelayEngine>,
}

impl DnsQueryHandler {
    pub fn new(
        connector: Arc<dyn OutboundConnector>,
        upstream: UpstreamEndpoint,
        relay: Arc<RelayEngine>,
    ) -> Self {
        Self {
            connector,
            upstream,
            relay,
        }
    }

    pub async fn handle<S, K>(
        &self,
        ctx: &SessionContext,
        query: &[u8],
        response_header: ResponseHeader,
        source: &mut S,
        sink: &mut K,
    ) -> Result<RelaySummary, TunnelError>
    where
        S: MessageSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let stream = self
            .connector
            .connect(&self.upstream.host, self.upstream.port)
            .await?;

        debug!(
            session = %ctx,
            upstream = %self.upstream,
            query_len = query.len(),
            "Forwarding DNS query over TCP"
        );

        self.relay
            .run(ctx, stream, query, response_header, source, sink)
            .await
    }
}
