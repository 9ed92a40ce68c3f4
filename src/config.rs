// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact gateway.
//!
//! Defaults match the site contact form: five submissions per client per
//! hour, hourly sweep of stale counters.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Configuration for the contact gateway service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Outbound notification configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// HTTP surface configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Fixed-window throttle settings for the contact endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum submissions per identifier per window (default: 5)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds (default: one hour)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// How often expired records are swept, in seconds (default: 3600)
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

/// Where and how contact messages are delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Sender address (default: noreply@example.com)
    #[serde(default = "default_email_from")]
    pub from: String,

    /// Recipient address (default: hello@example.com)
    #[serde(default = "default_email_to")]
    pub to: String,

    /// Mail API endpoint. When unset, messages are only logged.
    #[serde(default)]
    pub endpoint: Option<Url>,

    /// Bearer token for the mail API
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Upper bound on a single delivery attempt in milliseconds (default: 10000)
    #[serde(default = "default_notifier_timeout_ms")]
    pub timeout_ms: u64,
}

/// HTTP surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Origins allowed to post the form (default: https://localhost).
    /// A `*` entry allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Largest accepted request body in bytes (default: 65536)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_ms() -> u64 {
    60 * 60 * 1000
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_email_from() -> String {
    "noreply@example.com".to_string()
}

fn default_email_to() -> String {
    "hello@example.com".to_string()
}

fn default_notifier_timeout_ms() -> u64 {
    10_000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["https://localhost".to_string()]
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            notifier: NotifierConfig::default(),
            http: HttpConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            from: default_email_from(),
            to: default_email_to(),
            endpoint: None,
            api_key: None,
            timeout_ms: default_notifier_timeout_ms(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the sweep interval
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl NotifierConfig {
    /// Get the per-delivery timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set-but-unparseable values are
    /// an error so a typo never silently disables throttling.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let rate_limit = RateLimitConfig {
            max_requests: parse_or(&lookup, "RATE_LIMIT_MAX", defaults.rate_limit.max_requests)?,
            window_ms: parse_or(&lookup, "RATE_LIMIT_WINDOW_MS", defaults.rate_limit.window_ms)?,
            sweep_interval_secs: parse_or(
                &lookup,
                "SWEEP_INTERVAL_SECS",
                defaults.rate_limit.sweep_interval_secs,
            )?,
        };

        if rate_limit.max_requests == 0 {
            return Err(ConfigError::OutOfRange {
                key: "RATE_LIMIT_MAX",
                reason: "must be greater than zero",
            });
        }
        if rate_limit.window_ms == 0 {
            return Err(ConfigError::OutOfRange {
                key: "RATE_LIMIT_WINDOW_MS",
                reason: "must be greater than zero",
            });
        }
        if rate_limit.sweep_interval_secs == 0 {
            return Err(ConfigError::OutOfRange {
                key: "SWEEP_INTERVAL_SECS",
                reason: "must be greater than zero",
            });
        }

        let endpoint = match non_blank(&lookup, "NOTIFIER_ENDPOINT") {
            Some(raw) => {
                let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                    key: "NOTIFIER_ENDPOINT",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(ConfigError::InvalidUrl {
                        key: "NOTIFIER_ENDPOINT",
                        value: raw,
                        reason: "scheme must be http or https".to_string(),
                    });
                }
                Some(url)
            }
            None => None,
        };

        let notifier = NotifierConfig {
            from: non_blank(&lookup, "EMAIL_FROM").unwrap_or(defaults.notifier.from),
            to: non_blank(&lookup, "EMAIL_TO").unwrap_or(defaults.notifier.to),
            endpoint,
            api_key: non_blank(&lookup, "NOTIFIER_API_KEY"),
            timeout_ms: parse_or(&lookup, "NOTIFIER_TIMEOUT_MS", defaults.notifier.timeout_ms)?,
        };

        if notifier.timeout_ms == 0 {
            return Err(ConfigError::OutOfRange {
                key: "NOTIFIER_TIMEOUT_MS",
                reason: "must be greater than zero",
            });
        }

        let allowed_origins = match non_blank(&lookup, "ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.http.allowed_origins,
        };

        let http = HttpConfig {
            allowed_origins,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", defaults.http.max_body_bytes)?,
        };

        let metrics = MetricsConfig {
            enabled: parse_or(&lookup, "METRICS_ENABLED", defaults.metrics.enabled)?,
            ..defaults.metrics
        };

        Ok(Config {
            bind_addr: non_blank(&lookup, "BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit,
            notifier,
            http,
            metrics,
        })
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_blank(lookup, key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
