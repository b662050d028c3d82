//! Engine configuration.

use crate::error::PackingError;
use serde::{Deserialize, Serialize};

/// Which packing strategy backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Embedded library, in-process.
    #[default]
    Local,
    /// Remote packing service over HTTP.
    Remote,
}

/// Connection settings for the packing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Service root, e.g. `http://packer:8080`.
    pub base_url: String,
    /// Path of the pack operation.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Default request timeout, used when the call context sets none.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "/pack".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl GatewayConfig {
    /// Creates a config with the default endpoint and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Sets the endpoint path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the default timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy selected at construction.
    pub backend: BackendKind,
    /// Required when `backend` is [`BackendKind::Remote`].
    pub gateway: Option<GatewayConfig>,
}

impl EngineConfig {
    /// Creates a local-backend configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the gateway settings.
    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, PackingError> {
        serde_json::from_str(json)
            .map_err(|e| PackingError::Configuration(format!("invalid engine config: {e}")))
    }
}
