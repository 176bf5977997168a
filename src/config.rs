//! Storefront configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::persist::DEFAULT_WISHLIST_KEY;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:1337/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:1337";
pub const DEFAULT_STORAGE_PATH: &str = "snkrs.db";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl HttpTimeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Content API root, without trailing slash.
    pub api_base_url: String,
    /// Prefix for relative product image paths.
    pub media_base_url: String,
    /// SQLite file holding the durable slots.
    pub storage_path: PathBuf,
    /// Slot name of the wishlist.
    pub wishlist_key: String,
    pub timeouts: HttpTimeouts,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            wishlist_key: DEFAULT_WISHLIST_KEY.to_string(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl StorefrontConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SNKRS_API_BASE_URL`: default `http://localhost:1337/api`
    /// - `SNKRS_MEDIA_BASE_URL`: default `http://localhost:1337`
    /// - `SNKRS_STORAGE_PATH`: default `snkrs.db`
    /// - `SNKRS_WISHLIST_KEY`: default `wishlist`
    /// - `SNKRS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SNKRS_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup("SNKRS_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let media_base_url = lookup("SNKRS_MEDIA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_MEDIA_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let storage_path = PathBuf::from(
            lookup("SNKRS_STORAGE_PATH").unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()),
        );
        let wishlist_key =
            lookup("SNKRS_WISHLIST_KEY").unwrap_or_else(|| DEFAULT_WISHLIST_KEY.to_string());
        if wishlist_key.trim().is_empty() {
            return Err(ConfigError::Empty {
                var: "SNKRS_WISHLIST_KEY",
            });
        }

        let timeouts = HttpTimeouts {
            request_secs: parse_secs(
                "SNKRS_REQUEST_TIMEOUT_SECS",
                lookup("SNKRS_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_secs(
                "SNKRS_CONNECT_TIMEOUT_SECS",
                lookup("SNKRS_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };

        Ok(Self {
            api_base_url,
            media_base_url,
            storage_path,
            wishlist_key,
            timeouts,
        })
    }
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, StorefrontConfig::default());
    }

    #[test]
    fn base_urls_drop_trailing_slash() {
        let cfg = StorefrontConfig::from_lookup(lookup_from(&[
            ("SNKRS_API_BASE_URL", "https://shop.example/api/"),
            ("SNKRS_MEDIA_BASE_URL", "https://cdn.example/"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_base_url, "https://shop.example/api");
        assert_eq!(cfg.media_base_url, "https://cdn.example");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[(
            "SNKRS_REQUEST_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "SNKRS_REQUEST_TIMEOUT_SECS",
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn blank_wishlist_key_is_rejected() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[("SNKRS_WISHLIST_KEY", " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: "SNKRS_WISHLIST_KEY" });
    }
}
