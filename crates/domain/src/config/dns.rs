use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::endpoint::UpstreamEndpoint;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Resolver that receives DNS queries tunnelled as UDP to port 53.
    #[serde(default = "default_upstream")]
    pub upstream: String,
}

impl DnsConfig {
    pub fn upstream_endpoint(&self) -> Result<UpstreamEndpoint, ConfigError> {
        self.upstream
            .parse::<UpstreamEndpoint>()
            .map_err(ConfigError::Validation)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
        }
    }
}

fn default_upstream() -> String {
    "8.8.4.4:53".to_string()
}
