//! # Client configuration
//!
//! The source of truth for the two timing constants the rest of the crate
//! consumes, made explicit configuration instead of scattered literals:
//!
//! | Field | Default | Consumed by |
//! |-------|---------|-------------|
//! | `cache_ttl_secs` | 300 (5 min) | [`crate::ApiClient`] read-through cache |
//! | `freshness_window_secs` | 86 400 (24 h) | [`crate::SessionManager`] revalidation gate |
//! | `retry.max_attempts` | 3 | [`crate::RetryPolicy`] |
//! | `retry.base_delay_ms` | 1 000 | [`crate::RetryPolicy`] exponential backoff |
//!
//! All structs derive serde with per-field defaults, so a missing or partial
//! TOML file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Lingzhi API client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL prepended to every endpoint path. Empty means same-origin
    /// (the normal web deployment behind the platform's reverse proxy).
    #[serde(default)]
    pub base_url: String,
    /// TTL for read-through cached responses, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Age after which a stored session is revalidated on mount, in seconds.
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Bounded-retry settings for silent token revalidation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_freshness_window_secs() -> u64 {
    60 * 60 * 24
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
            freshness_window_secs: default_freshness_window_secs(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at an explicit backend origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.freshness_window_secs, 86_400);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            base_url = "https://lingzhi.example.com"

            [retry]
            max_attempts = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://lingzhi.example.com");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 1_000);
        assert_eq!(config.cache_ttl_secs, 300);
    }

    #[test]
    fn toml_roundtrip() {
        let config = ClientConfig::with_base_url("http://localhost:8080");
        let raw = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&raw).unwrap(), config);
    }
}
