//! Gateway configuration
//!
//! Configuration for the provider client, the pagination bounds, and the
//! forwarder server, loadable from a YAML file with serde defaults. The
//! provider credential can always be supplied through the environment
//! instead of the file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted when the config carries no API key
pub const API_KEY_ENV: &str = "NEWS_DATA_APIKEY";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pagination bounds
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Forwarder server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl GatewayConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check endpoint URLs parse and bounds are sane
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.provider.latest_url)?;
        url::Url::parse(&self.provider.search_url)?;
        if self.pagination.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        if self.pagination.max_pages == 0 {
            return Err(Error::config("max_pages must be at least 1"));
        }
        Ok(())
    }
}

// ============================================================================
// Provider Config
// ============================================================================

/// Upstream provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint for country/category listings
    #[serde(default = "default_latest_url")]
    pub latest_url: String,

    /// Endpoint for free-text search
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Provider credential. Falls back to the `NEWS_DATA_APIKEY`
    /// environment variable when absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            latest_url: default_latest_url(),
            search_url: default_search_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the credential from the config or the environment.
    ///
    /// Failing here is an operator problem, not a caller problem, and is
    /// surfaced as a 500 at the forwarder boundary.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::config("API key not configured")),
        }
    }
}

fn default_latest_url() -> String {
    "https://newsdata.io/api/1/latest".to_string()
}

fn default_search_url() -> String {
    "https://newsdata.io/api/1/news".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("newsgate/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Pagination bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Articles requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Hard cap on navigable pages regardless of provider-reported totals
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_page_size() -> u32 {
    9
}

fn default_max_pages() -> u32 {
    10
}

// ============================================================================
// Server Config
// ============================================================================

/// Forwarder server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.provider.latest_url, "https://newsdata.io/api/1/latest");
        assert_eq!(config.provider.search_url, "https://newsdata.io/api/1/news");
        assert_eq!(config.pagination.page_size, 9);
        assert_eq!(config.pagination.max_pages, 10);
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
provider:
  api_key: "pub_test123"
server:
  port: 9000
"#;
        let config = GatewayConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("pub_test123"));
        assert_eq!(config.server.port, 9000);
        // Unspecified sections keep their defaults
        assert_eq!(config.pagination.page_size, 9);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let yaml = r#"
provider:
  latest_url: "not a url"
"#;
        assert!(GatewayConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let yaml = r#"
pagination:
  page_size: 0
"#;
        assert!(GatewayConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_resolve_api_key_from_config() {
        let provider = ProviderConfig {
            api_key: Some("pub_abc".to_string()),
            ..Default::default()
        };
        assert_eq!(provider.resolve_api_key().unwrap(), "pub_abc");
    }

    #[test]
    fn test_empty_api_key_is_not_configured() {
        let provider = ProviderConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        // Empty string is treated as absent; the env var may still rescue
        // it, so only assert the config value itself does not win.
        if std::env::var(API_KEY_ENV).is_err() {
            let err = provider.resolve_api_key().unwrap_err();
            assert_eq!(err.to_string(), "API key not configured");
        }
    }
}
