use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Bridge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Loki push endpoint
    #[serde(default = "default_loki_url")]
    pub loki_url: String,

    /// Static label set attached to every pushed stream
    #[serde(default = "default_stream_labels")]
    pub stream_labels: BTreeMap<String, String>,

    /// Request timeout in seconds, applied to both inbound requests and the
    /// outbound push
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            loki_url: default_loki_url(),
            stream_labels: default_stream_labels(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from an optional `bridge.*` file, overridden by
    /// `LOGPUSH_BRIDGE__*` environment variables
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("bridge").required(false))
            .add_source(config::Environment::with_prefix("LOGPUSH_BRIDGE").separator("__"));

        let config: BridgeConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_loki_url() -> String {
    "http://loki:3100/loki/api/v1/push".to_string()
}

fn default_stream_labels() -> BTreeMap<String, String> {
    BTreeMap::from([("job".to_string(), "cloudflare-logpush".to_string())])
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size_mb, 10);
        assert_eq!(cfg.loki_url, "http://loki:3100/loki/api/v1/push");
        assert_eq!(
            cfg.stream_labels.get("job").map(String::as_str),
            Some("cloudflare-logpush")
        );
    }

    #[test]
    fn test_socket_addr() {
        let cfg = BridgeConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_max_body_size_in_bytes() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.max_body_size(), 10 * 1024 * 1024);
    }
}
