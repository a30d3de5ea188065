//! Application configuration module for freight-gallery
//!
//! Provides TOML-based configuration with environment variable override support.
//! Priority: CLI args > Environment variables > Config file > Defaults

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::client::default_user_agent;
use crate::api::WikiClient;
use crate::query::Mode;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// MediaWiki `api.php` endpoint
    #[serde(default = "default_endpoint")]
    endpoint: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    user_agent: String,

    /// Transport mode preselected at startup: all, rail, air, or sea
    #[serde(default = "default_mode")]
    default_mode: String,
}

fn default_endpoint() -> String {
    WikiClient::DEFAULT_ENDPOINT.to_string()
}

fn default_mode() -> String {
    Mode::default().to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            default_mode: default_mode(),
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("FREIGHT_GALLERY_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(user_agent) = std::env::var("FREIGHT_GALLERY_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(mode) = std::env::var("FREIGHT_GALLERY_MODE") {
            config.default_mode = mode;
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        fn pick(mine: &str, theirs: &str, default: String) -> String {
            if theirs != default {
                theirs.to_string()
            } else {
                mine.to_string()
            }
        }

        Self {
            endpoint: pick(&self.endpoint, &other.endpoint, default_endpoint()),
            user_agent: pick(&self.user_agent, &other.user_agent, default_user_agent()),
            default_mode: pick(&self.default_mode, &other.default_mode, default_mode()),
        }
    }

    /// Override endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Override default_mode
    pub fn with_default_mode(mut self, mode: Mode) -> Self {
        self.default_mode = mode.to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint '{}': {}", self.endpoint, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Endpoint must be an http or https URL, got '{}'",
                self.endpoint
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(anyhow!("user_agent must not be empty"));
        }

        self.default_mode.parse::<Mode>()?;

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    /// Build an API client from this configuration
    pub fn client(&self) -> WikiClient {
        WikiClient::with_config(Some(self.endpoint.clone()), Some(self.user_agent.clone()))
    }

    // Getters
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Parsed default mode; unknown ids fall back to `all`
    pub fn default_mode(&self) -> Mode {
        self.default_mode.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint(), "https://en.wikipedia.org/w/api.php");
        assert!(config.user_agent().starts_with("freight-gallery/"));
        assert_eq!(config.default_mode(), Mode::All);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = AppConfig::default().with_endpoint("not a url");
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_endpoint("ftp://example.org/api.php");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_mode() {
        let config: AppConfig = toml::from_str(r#"default_mode = "road""#).unwrap();
        assert!(config.validate().is_err());
        assert_eq!(config.default_mode(), Mode::All);
    }

    #[test]
    fn test_client_uses_config() {
        let config = AppConfig::default().with_endpoint("http://127.0.0.1:9/api.php");
        let client = config.client();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/api.php");
        assert_eq!(client.user_agent(), config.user_agent());
    }
}
