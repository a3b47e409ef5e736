//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags and environment variables (applied in `main`).
//!
//! ```yaml
//! host: "0.0.0.0"
//! port: 8787
//! allowed_origins:
//!   - "https://opentrust.example.org"
//!   - "http://localhost:8787"
//! body_limit_bytes: 1048576
//! rate_limit:
//!   max_requests: 20
//!   window: "1m"
//! ```

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Port used when neither the config file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 8787;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-client request limit on the evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per client IP within one window
    pub max_requests: u32,

    /// Window length, written as a human-readable duration ("1m", "30s")
    #[serde(with = "humantime_duration")]
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// Configuration for the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body
    pub body_limit_bytes: usize,

    pub rate_limit: RateLimitConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![
                "http://localhost:8787".to_string(),
                "http://127.0.0.1:8787".to_string(),
            ],
            body_limit_bytes: 1024 * 1024, // 1MB
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Parse a config from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check that the config can actually be served.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.max_requests must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.window.is_zero() {
            return Err(ConfigError::Invalid(
                "rate_limit.window must be longer than zero".to_string(),
            ));
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::Invalid(
                "body_limit_bytes must be at least 1".to_string(),
            ));
        }
        self.origin_headers()?;
        self.socket_addr()?;
        Ok(())
    }

    /// The allowed origins as header values for the CORS layer.
    pub fn origin_headers(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                let is_http = origin.starts_with("http://") || origin.starts_with("https://");
                if !is_http || origin.ends_with('/') {
                    return Err(ConfigError::Invalid(format!(
                        "allowed origin '{}' must look like scheme://host[:port]",
                        origin
                    )));
                }
                HeaderValue::from_str(origin).map_err(|e| {
                    ConfigError::Invalid(format!("allowed origin '{}': {}", origin, e))
                })
            })
            .collect()
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8787);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.body_limit_bytes, 1_048_576);
        assert_eq!(config.rate_limit.max_requests, 20);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ApiConfig::from_yaml(
            r#"
port: 9000
rate_limit:
  window: "30s"
"#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.rate_limit.max_requests, 20);
        assert_eq!(config.rate_limit.window, Duration::from_secs(30));
    }

    #[test]
    fn test_full_yaml() {
        let config = ApiConfig::from_yaml(
            r#"
host: "127.0.0.1"
port: 8080
allowed_origins:
  - "https://opentrust.example.org"
  - "https://staging.opentrust.example.org"
body_limit_bytes: 2048
rate_limit:
  max_requests: 5
  window: "2m 30s"
"#,
        )
        .unwrap();
        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.origin_headers().unwrap().len(), 2);
        assert_eq!(config.body_limit_bytes, 2048);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window, Duration::from_secs(150));
    }

    #[test]
    fn test_bad_window_rejected() {
        let result = ApiConfig::from_yaml("rate_limit:\n  window: \"soon\"\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = ApiConfig::from_yaml("rate_limit:\n  max_requests: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_origin_rejected() {
        let config = ApiConfig {
            allowed_origins: vec!["opentrust.example.org".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ApiConfig {
            allowed_origins: vec!["https://opentrust.example.org/".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = ApiConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.socket_addr(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_window_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&ApiConfig::default()).unwrap();
        assert_eq!(ApiConfig::from_yaml(&yaml).unwrap(), ApiConfig::default());
    }
}
