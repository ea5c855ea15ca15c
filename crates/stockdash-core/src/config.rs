//! Configuration for the market data service connection

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Request timeout used when none is configured, or when the configured value is 0
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Roster size requested from `/companies`
pub const DEFAULT_COMPANIES_LIMIT: u32 = 15;

/// History window requested from `/stock/{symbol}`
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

const ENV_BASE_URL: &str = "STOCKDASH_API_BASE_URL";
const ENV_TIMEOUT_MS: &str = "STOCKDASH_API_TIMEOUT";
const ENV_COMPANIES_LIMIT: &str = "STOCKDASH_COMPANIES_LIMIT";
const ENV_HISTORY_DAYS: &str = "STOCKDASH_HISTORY_DAYS";

/// Configuration for the dashboard's data layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the market data service, e.g. `http://localhost:5000/api`
    pub base_url: String,

    /// Per-request timeout applied by the HTTP transport
    pub request_timeout: Duration,

    /// Number of companies requested for the roster
    pub companies_limit: u32,

    /// Number of days of history requested for a selection
    pub history_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            companies_limit: DEFAULT_COMPANIES_LIMIT,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load configuration from `STOCKDASH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashboardError::ConfigError(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(DashboardError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.companies_limit == 0 {
            return Err(DashboardError::ConfigError(
                "companies_limit must be greater than 0".to_string(),
            ));
        }

        if self.history_days == 0 {
            return Err(DashboardError::ConfigError(
                "history_days must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Request timeout in milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.request_timeout.as_millis() as u64
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    companies_limit: Option<u32>,
    history_days: Option<u32>,
}

impl DashboardConfigBuilder {
    /// Set the service base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout in milliseconds (0 means default)
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(self, timeout: Duration) -> Self {
        self.timeout_ms(timeout.as_millis() as u64)
    }

    /// Set the roster size
    pub fn companies_limit(mut self, limit: u32) -> Self {
        self.companies_limit = Some(limit);
        self
    }

    /// Set the history window in days
    pub fn history_days(mut self, days: u32) -> Self {
        self.history_days = Some(days);
        self
    }

    /// Fill unset fields from `STOCKDASH_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_lookup(stockdash_utils::env_var)
    }

    /// Fill unset fields from an arbitrary key lookup
    ///
    /// Values that fail to parse are ignored, as if unset.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.base_url.is_none() {
            self.base_url = lookup(ENV_BASE_URL);
        }
        if self.timeout_ms.is_none() {
            self.timeout_ms = lookup(ENV_TIMEOUT_MS).and_then(|v| v.trim().parse().ok());
        }
        if self.companies_limit.is_none() {
            self.companies_limit =
                lookup(ENV_COMPANIES_LIMIT).and_then(|v| v.trim().parse().ok());
        }
        if self.history_days.is_none() {
            self.history_days = lookup(ENV_HISTORY_DAYS).and_then(|v| v.trim().parse().ok());
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let timeout_ms = self
            .timeout_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let config = DashboardConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            request_timeout: Duration::from_millis(timeout_ms),
            companies_limit: self.companies_limit.unwrap_or(defaults.companies_limit),
            history_days: self.history_days.unwrap_or(defaults.history_days),
        };

        config.validate()?;
        Ok(config)
    }
}
