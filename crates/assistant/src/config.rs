use std::time::Duration;

use galleria_core::EnvironmentConfig;

/// Default chat request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the HTTP chat client.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Base URL of the chat service (e.g., `https://gallery.example.com/api/v1/mcp`).
    pub endpoint: String,
    /// Request deadline.
    pub timeout: Duration,
    /// Whether to send the tunnel interstitial bypass header.
    pub tunnel_header: bool,
}

impl AssistantConfig {
    /// Create a new config for the given chat service base URL.
    ///
    /// Uses a 10s timeout and sends the tunnel bypass header.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            tunnel_header: true,
        }
    }

    /// Derive the chat settings from the shared environment configuration.
    pub fn from_environment(env: &EnvironmentConfig) -> Self {
        Self::new(&env.mcp_url)
            .with_timeout(env.network_timeout().unwrap_or(DEFAULT_TIMEOUT))
            .with_tunnel_header(env.bypass_tunnel_warning)
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable the tunnel bypass header.
    #[must_use]
    pub fn with_tunnel_header(mut self, enabled: bool) -> Self {
        self.tunnel_header = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AssistantConfig::new("http://localhost:3000/api/v1/mcp/");
        assert_eq!(config.endpoint, "http://localhost:3000/api/v1/mcp");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.tunnel_header);
    }

    #[test]
    fn config_builder() {
        let config = AssistantConfig::new("http://localhost:3000/api/v1/mcp")
            .with_timeout(Duration::from_secs(30))
            .with_tunnel_header(false);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.tunnel_header);
    }

    #[test]
    fn from_environment() {
        let env = EnvironmentConfig::default()
            .with_mcp_url("https://gallery.example.com/api/v1/mcp")
            .with_network_timeout(Duration::from_secs(4));
        let config = AssistantConfig::from_environment(&env);
        assert_eq!(config.endpoint, "https://gallery.example.com/api/v1/mcp");
        assert_eq!(config.timeout, Duration::from_secs(4));

        let config = AssistantConfig::from_environment(&EnvironmentConfig::default());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint, "http://localhost:3000/api/v1/mcp");
    }
}
