use bytes::Bytes;
use vless_relay_domain::ResponseHeader;

/// Whether the one-shot response header still has to go out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHeaderState {
    Pending(ResponseHeader),
    Sent,
}

impl ResponseHeaderState {
    pub fn new(header: ResponseHeader) -> Self {
        Self::Pending(header)
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Builds the next transport-bound frame for `chunk`, prefixing the
    /// header on the first call only.
    pub fn frame(&mut self, chunk: &[u8]) -> Bytes {
        match std::mem::replace(self, Self::Sent) {
            Self::Pending(header) => Bytes::from(header.prefix(chunk)),
            Self::Sent => Bytes::copy_from_slice(chunk),
        }
    }
}
