use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::identity::Identity;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TunnelConfig {
    /// Shared identity as a UUID, hyphens optional.
    #[serde(default = "default_identity")]
    pub identity: String,
}

impl TunnelConfig {
    pub fn identity(&self) -> Result<Identity, ConfigError> {
        self.identity
            .parse::<Identity>()
            .map_err(ConfigError::InvalidIdentity)
    }
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}

fn default_identity() -> String {
    "d342d11e-d424-4583-b36e-524ab1f0afa4".to_string()
}
