use crate::session::SessionContext;
use vless_relay_domain::TunnelError;

/// Notified when the outbound leg of a relay fails.
///
/// The relay never reconnects on its own; an implementation may record or
/// report the failure but the session still ends.
pub trait RetryHook: Send + Sync {
    fn on_outbound_error(&self, _ctx: &SessionContext, _error: &TunnelError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoRetry;

impl RetryHook for NoRetry {}
