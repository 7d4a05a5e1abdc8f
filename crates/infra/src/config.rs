//! Process configuration, read from environment variables.
//!
//! | variable                           | default   |
//! |------------------------------------|-----------|
//! | `STOREFRONT_ADMIN_URL_PREFIX`      | `/admin/` |
//! | `STOREFRONT_DEFAULT_LIST_PER_PAGE` | `100`     |
//! | `STOREFRONT_LOG_FORMAT`            | `json`    |

use thiserror::Error;

use storefront_observability::LogFormat;

pub const ADMIN_URL_PREFIX: &str = "STOREFRONT_ADMIN_URL_PREFIX";
pub const DEFAULT_LIST_PER_PAGE: &str = "STOREFRONT_DEFAULT_LIST_PER_PAGE";
pub const LOG_FORMAT: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path prefix for links between admin listings, e.g. `/admin/`.
    pub admin_url_prefix: String,
    /// Page size for listings that do not set their own.
    pub default_list_per_page: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_url_prefix: "/admin/".to_string(),
            default_list_per_page: 100,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(prefix) = lookup(ADMIN_URL_PREFIX) {
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(ConfigError::invalid(
                    ADMIN_URL_PREFIX,
                    &prefix,
                    "must start and end with '/'",
                ));
            }
            config.admin_url_prefix = prefix;
        }

        if let Some(raw) = lookup(DEFAULT_LIST_PER_PAGE) {
            config.default_list_per_page = match raw.trim().parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::invalid(
                        DEFAULT_LIST_PER_PAGE,
                        &raw,
                        "must be at least 1",
                    ));
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError::invalid(DEFAULT_LIST_PER_PAGE, &raw, e.to_string()));
                }
            };
        }

        if let Some(raw) = lookup(LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|e: storefront_observability::UnknownLogFormat| {
                    ConfigError::invalid(LOG_FORMAT, &raw, e.to_string())
                })?;
        }

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup(&[
            (ADMIN_URL_PREFIX, "/backoffice/"),
            (DEFAULT_LIST_PER_PAGE, "25"),
            (LOG_FORMAT, "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.admin_url_prefix, "/backoffice/");
        assert_eq!(config.default_list_per_page, 25);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_values() {
        for pairs in [
            [(ADMIN_URL_PREFIX, "admin")],
            [(DEFAULT_LIST_PER_PAGE, "0")],
            [(DEFAULT_LIST_PER_PAGE, "ten")],
            [(LOG_FORMAT, "xml")],
        ] {
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            let ConfigError::Invalid { key, .. } = err;
            assert_eq!(key, pairs[0].0);
        }
    }
}
