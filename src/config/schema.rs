//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the dashboard.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where the status document is fetched from.
    pub source: SourceConfig,

    /// Polling schedule.
    pub refresh: RefreshConfig,

    /// Embedded board server.
    pub server: ServerConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Gateway status endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the gateway's Revolver resources.
    pub base_url: String,

    /// Status path, resolved relative to `base_url`.
    pub status_path: String,

    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,

    /// User-Agent sent with every fetch.
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/revolver/".to_string(),
            status_path: "v1/metadata/status".to_string(),
            timeout_ms: 3000,
            user_agent: concat!("revolver-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Polling schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Period between passes in milliseconds. The first pass runs immediately.
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Board server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Serve the board over HTTP.
    pub enabled: bool,

    /// Bind address (e.g., "127.0.0.1:8090").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8090".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh.interval_ms, 5000);
        assert_eq!(config.source.status_path, "v1/metadata/status");
        assert!(config.server.enabled);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [source]
            base_url = "http://gateway:8080/revolver/"

            [refresh]
            interval_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.source.base_url, "http://gateway:8080/revolver/");
        assert_eq!(config.source.timeout_ms, 3000);
        assert_eq!(config.refresh.interval_ms, 1000);
        assert_eq!(config.server.bind_address, "127.0.0.1:8090");
    }
}
