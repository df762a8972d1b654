use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use uuid::Uuid;

/// 16-byte shared token every request header must carry.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity([u8; 16]);

impl Identity {
    pub const LEN: usize = 16;

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Byte-for-byte comparison against a candidate taken off the wire.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        candidate.len() == Self::LEN && bool::from(self.0[..].ct_eq(candidate))
    }
}

impl FromStr for Identity {
    type Err = String;

    /// Accepts the hyphenated UUID form or the bare 32-digit hex form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(|uuid| Self(*uuid.as_bytes()))
            .map_err(|e| format!("Invalid identity '{}': {}", s, e))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Uuid::from_bytes(self.0).hyphenated())
    }
}

// Keeps the full token out of log lines.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
