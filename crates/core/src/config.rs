//! Environment configuration shared by the image and chat clients.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header that tells the public tunnel in front of the backend to skip its
/// browser interstitial page.
pub const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Errors raised while loading an [`EnvironmentConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Base URLs and network settings for the Galleria clients.
///
/// # Example
///
/// ```toml
/// apiUrl = "https://gallery.example.com/api/v1"
/// mcpUrl = "https://gallery.example.com/api/v1/mcp"
/// networkTimeout = 12000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentConfig {
    /// Base URL of the REST image service.
    pub api_url: String,
    /// Base URL of the chat service.
    pub mcp_url: String,
    /// Request deadline in milliseconds. When unset each client keeps its own
    /// default.
    #[serde(rename = "networkTimeout", skip_serializing_if = "Option::is_none")]
    pub network_timeout_ms: Option<u64>,
    /// Declared retry budget. Not consulted by either client.
    pub retry_attempts: u32,
    /// Whether to send [`TUNNEL_BYPASS_HEADER`] with every request.
    pub bypass_tunnel_warning: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            mcp_url: default_mcp_url(),
            network_timeout_ms: None,
            retry_attempts: default_retry_attempts(),
            bypass_tunnel_warning: true,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:3000/api/v1".to_owned()
}

fn default_mcp_url() -> String {
    "http://localhost:3000/api/v1/mcp".to_owned()
}

fn default_retry_attempts() -> u32 {
    3
}

impl EnvironmentConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `GALLERIA_API_URL`
    /// - `GALLERIA_MCP_URL`
    /// - `GALLERIA_NETWORK_TIMEOUT_MS`
    /// - `GALLERIA_RETRY_ATTEMPTS`
    /// - `GALLERIA_BYPASS_TUNNEL_WARNING` (`true`/`false`)
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with variables supplied by `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("GALLERIA_API_URL").unwrap_or(defaults.api_url),
            mcp_url: lookup("GALLERIA_MCP_URL").unwrap_or(defaults.mcp_url),
            network_timeout_ms: lookup("GALLERIA_NETWORK_TIMEOUT_MS")
                .and_then(|s| s.parse::<u64>().ok()),
            retry_attempts: lookup("GALLERIA_RETRY_ATTEMPTS")
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(defaults.retry_attempts),
            bypass_tunnel_warning: lookup("GALLERIA_BYPASS_TUNNEL_WARNING")
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(defaults.bypass_tunnel_warning),
        }
    }

    /// The configured request deadline, if any.
    pub fn network_timeout(&self) -> Option<Duration> {
        self.network_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_mcp_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_url = url.into();
        self
    }

    #[must_use]
    pub fn with_network_timeout(mut self, timeout: Duration) -> Self {
        self.network_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_bypass_tunnel_warning(mut self, enabled: bool) -> Self {
        self.bypass_tunnel_warning = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000/api/v1");
        assert_eq!(config.mcp_url, "http://localhost:3000/api/v1/mcp");
        assert_eq!(config.network_timeout(), None);
        assert_eq!(config.retry_attempts, 3);
        assert!(config.bypass_tunnel_warning);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = EnvironmentConfig::from_toml_str("").unwrap();
        assert_eq!(config, EnvironmentConfig::default());
    }

    #[test]
    fn toml_recognized_keys() {
        let toml = r#"
            apiUrl = "https://gallery.example.com/api/v1"
            mcpUrl = "https://gallery.example.com/api/v1/mcp"
            networkTimeout = 30000
            retryAttempts = 5
            bypassTunnelWarning = false
        "#;
        let config = EnvironmentConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.api_url, "https://gallery.example.com/api/v1");
        assert_eq!(config.mcp_url, "https://gallery.example.com/api/v1/mcp");
        assert_eq!(config.network_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.retry_attempts, 5);
        assert!(!config.bypass_tunnel_warning);
    }

    #[test]
    fn toml_type_mismatch_is_parse_error() {
        let err = EnvironmentConfig::from_toml_str("networkTimeout = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = EnvironmentConfig::load("/nonexistent/galleria.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn vars_override_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("GALLERIA_API_URL", "http://10.0.0.5:3000/api/v1"),
            ("GALLERIA_NETWORK_TIMEOUT_MS", "2500"),
            ("GALLERIA_RETRY_ATTEMPTS", "not-a-number"),
            ("GALLERIA_BYPASS_TUNNEL_WARNING", "false"),
        ]);
        let config = EnvironmentConfig::from_vars(|k| vars.get(k).map(ToString::to_string));
        assert_eq!(config.api_url, "http://10.0.0.5:3000/api/v1");
        assert_eq!(config.mcp_url, "http://localhost:3000/api/v1/mcp");
        assert_eq!(config.network_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.retry_attempts, 3);
        assert!(!config.bypass_tunnel_warning);
    }

    #[test]
    fn builder_overrides() {
        let config = EnvironmentConfig::default()
            .with_api_url("http://api")
            .with_mcp_url("http://mcp")
            .with_network_timeout(Duration::from_secs(4))
            .with_bypass_tunnel_warning(false);
        assert_eq!(config.api_url, "http://api");
        assert_eq!(config.mcp_url, "http://mcp");
        assert_eq!(config.network_timeout_ms, Some(4000));
        assert!(!config.bypass_tunnel_warning);
    }
}
