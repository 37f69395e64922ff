//! Client configuration from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `FAQ_API_URL` | `http://localhost:5000/api/v1` |
//! | `FAQ_PAGE_LIMIT` | `20` |
//! | `FAQ_HTTP_TIMEOUT_SECS` | unset (no timeout) |

use std::time::Duration;

use thiserror::Error;

use crate::client::FaqClient;
use crate::store::FaqStore;
use crate::transport::UreqTransport;
use crate::types::DEFAULT_LIMIT;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_limit: u32,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            page_limit: DEFAULT_LIMIT,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("FAQ_API_URL") {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = get("FAQ_PAGE_LIMIT") {
            config.page_limit = positive("FAQ_PAGE_LIMIT", &raw)?;
        }
        if let Some(raw) = get("FAQ_HTTP_TIMEOUT_SECS") {
            config.timeout = Some(Duration::from_secs(u64::from(positive("FAQ_HTTP_TIMEOUT_SECS", &raw)?)));
        }
        Ok(config)
    }

    /// A store talking to `base_url` over a blocking ureq transport.
    pub fn connect(&self) -> FaqStore<UreqTransport> {
        FaqStore::new(FaqClient::new(&self.base_url), UreqTransport::new(self.timeout))
    }
}

fn positive(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
    }
}
