use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Request-read deadline applied when the settings file does not name one.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 30;

/// Optional gateway tunables, loaded from a YAML file via `--config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySettings {
    /// Host name used when building 301 redirect links.
    pub advertised_host: Option<String>,
    /// Seconds a client may take to deliver its request line and headers.
    /// Zero disables the deadline.
    pub client_timeout_secs: Option<u64>,
}

impl GatewaySettings {
    pub fn from_yaml(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Resolved gateway configuration, threaded into the server at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub listen_port: u16,
    pub web_root: PathBuf,
    pub backend_host: String,
    pub backend_port: u16,
    pub advertised_host: String,
    pub client_timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(
        listen_port: u16,
        web_root: PathBuf,
        backend_host: String,
        backend_port: u16,
        settings: GatewaySettings,
    ) -> Self {
        let advertised_host = settings
            .advertised_host
            .unwrap_or_else(|| "localhost".to_string());
        let secs = settings
            .client_timeout_secs
            .unwrap_or(DEFAULT_CLIENT_TIMEOUT_SECS);
        let client_timeout = (secs > 0).then(|| Duration::from_secs(secs));

        Self {
            listen_port,
            web_root,
            backend_host,
            backend_port,
            advertised_host,
            client_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub db_file: PathBuf,
    pub listen_port: u16,
}
