//! Client configuration
//!
//! Settings are read from the environment:
//!
//! | Variable | Default |
//! |---|---|
//! | `SCM_BASE_URL` | `https://api.strata.paloaltonetworks.com` |
//! | `SCM_ACCESS_TOKEN` | required |
//! | `SCM_TIMEOUT_SECS` | `30` |
//! | `SCM_MAX_LIMIT` | `2500` |

use std::time::Duration;

use crate::common::query::MaxLimit;
use crate::error::{ConfigIssue, ScmError};

pub const DEFAULT_BASE_URL: &str = "https://api.strata.paloaltonetworks.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection and paging settings for an [`Scm`](crate::scm::Scm) handle
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
    pub max_limit: MaxLimit,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_limit", &self.max_limit)
            .finish()
    }
}

impl ClientConfig {
    /// Config with defaults for everything but the token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_limit: MaxLimit::default(),
        }
    }

    /// Read the configuration from `SCM_*` environment variables
    pub fn from_env() -> Result<Self, ScmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("SCM_ACCESS_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ScmError::invalid_configuration(
                    "SCM_ACCESS_TOKEN",
                    ConfigIssue::Missing,
                    "environment variable must be set",
                )
            })?;

        let mut config = Self::new(access_token);

        if let Some(base_url) = lookup("SCM_BASE_URL").filter(|u| !u.is_empty()) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup("SCM_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ScmError::invalid_configuration(
                    "SCM_TIMEOUT_SECS",
                    ConfigIssue::InvalidType,
                    format!("'{raw}' is not a whole number of seconds"),
                )
            })?;
            if secs == 0 {
                return Err(ScmError::invalid_configuration(
                    "SCM_TIMEOUT_SECS",
                    ConfigIssue::BelowMinimum,
                    "timeout must be greater than 0",
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("SCM_MAX_LIMIT") {
            config.max_limit = MaxLimit::parse(&raw)?;
        }

        Ok(config)
    }
}
