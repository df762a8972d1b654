use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutboundConfig {
    #[serde(default = "default_true")]
    pub nodelay: bool,

    /// Unset means connect attempts wait on the OS timeout.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl OutboundConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            nodelay: true,
            connect_timeout_secs: None,
        }
    }
}

fn default_true() -> bool {
    true
}
