//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use draftdeck_core::StoreConfig;
use draftdeck_core::preview::DEFAULT_PREVIEW_TTL;
use draftdeck_core::sources::DEFAULT_REFRESH_DELAY;
use draftdeck_infra::HttpApiConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: HttpApiConfig,
    pub store: StoreConfig,
    pub refresh_delay: Duration,
    pub preview_ttl: Duration,
    /// File cache location; in-memory when unset.
    pub cache_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: HttpApiConfig::default(),
            store: StoreConfig::default(),
            refresh_delay: DEFAULT_REFRESH_DELAY,
            preview_ttl: DEFAULT_PREVIEW_TTL,
            cache_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api = HttpApiConfig {
            base_url: env::var("API_BASE_URL").unwrap_or(defaults.api.base_url),
            timeout: parse_var::<u64>("API_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.api.timeout),
        };

        let store = StoreConfig {
            page_size: parse_var("PAGE_SIZE")?.unwrap_or(defaults.store.page_size),
            history_limit: parse_var("HISTORY_LIMIT")?,
        };

        Ok(Self {
            api,
            store,
            refresh_delay: parse_var::<u64>("GENERATION_REFRESH_DELAY_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_delay),
            preview_ttl: parse_var::<u64>("LINK_PREVIEW_TTL_HOURS")?
                .map(|h| Duration::from_secs(h * 60 * 60))
                .unwrap_or(defaults.preview_ttl),
            cache_path: env::var_os("CACHE_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.store.page_size, 200);
        assert_eq!(config.store.history_limit, None);
        assert_eq!(config.refresh_delay, Duration::from_secs(5));
        assert_eq!(config.preview_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_unset_var_is_none() {
        let value: Option<u32> = parse_var("DRAFTDECK_TEST_SURELY_UNSET").unwrap();
        assert_eq!(value, None);
    }
}
