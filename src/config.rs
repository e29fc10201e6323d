//! Client configuration.
//!
//! The only required value is the API base URL. Everything else has a
//! default and can be overridden from the environment:
//!
//! | Variable | Default |
//! |---|---|
//! | `MARKETVIEW_API_BASE_URL` | `http://localhost:8080/api` |
//! | `MARKETVIEW_REQUEST_TIMEOUT_MS` | `10000` |
//! | `MARKETVIEW_PAGE_SIZE` | `12` |
//! | `MARKETVIEW_BULK_LIMIT` | `100` |
//! | `MARKETVIEW_SEARCH_DEBOUNCE_MS` | `300` |
//! | `MARKETVIEW_RETRY_ATTEMPTS` | `1` |
//! | `MARKETVIEW_RETRY_BACKOFF_MS` | `200` |

use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::fetch::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub page_size: NonZeroUsize,
    /// Record cap for bulk fetches feeding client-side filtering.
    pub bulk_limit: u32,
    pub search_debounce: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            page_size: NonZeroUsize::new(12).unwrap_or(NonZeroUsize::MIN),
            bulk_limit: 100,
            search_debounce: Duration::from_millis(300),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            ..Self::default()
        })
    }

    /// Read configuration from `MARKETVIEW_*` environment variables.
    ///
    /// Unset or unparseable numeric values fall back to their defaults; only
    /// an invalid base URL is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let base_url = lookup("MARKETVIEW_API_BASE_URL").unwrap_or(defaults.base_url);

        let number = |name: &str, default: u64| -> u64 {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let page_size = usize::try_from(number("MARKETVIEW_PAGE_SIZE", 12))
            .ok()
            .and_then(NonZeroUsize::new)
            .unwrap_or(defaults.page_size);
        let bulk_limit = u32::try_from(number("MARKETVIEW_BULK_LIMIT", 100))
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.bulk_limit);
        let retry_attempts = usize::try_from(number("MARKETVIEW_RETRY_ATTEMPTS", 1)).unwrap_or(1);

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            request_timeout: Duration::from_millis(number("MARKETVIEW_REQUEST_TIMEOUT_MS", 10_000)),
            page_size,
            bulk_limit,
            search_debounce: Duration::from_millis(number("MARKETVIEW_SEARCH_DEBOUNCE_MS", 300)),
            retry: RetryPolicy::attempts(
                retry_attempts,
                number("MARKETVIEW_RETRY_BACKOFF_MS", defaults.retry.base_backoff_ms),
            ),
        })
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Join a path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    Ok(trimmed.to_string())
}
