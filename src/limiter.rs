// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for the contact endpoint.
//!
//! Each identifier owns one record: a counter and the absolute time at which
//! its window closes. A record whose window has closed is treated as absent,
//! so the periodic sweep only reclaims memory and never changes a decision.

use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Prefix applied to every identifier before it is used as a store key.
const KEY_PREFIX: &str = "rate_limit:";

/// Counter state for one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateLimitRecord {
    /// Requests admitted in the current window
    count: u32,
    /// Window end, milliseconds since the Unix epoch
    reset_at: i64,
}

impl RateLimitRecord {
    fn is_expired(&self, now: i64) -> bool {
        now >= self.reset_at
    }
}

/// Outcome of a single throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub admitted: bool,
    /// Configured limit for the window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Window end, milliseconds since the Unix epoch
    pub reset_at: i64,
}

impl RateLimitDecision {
    /// Seconds a rejected caller should wait, rounded up.
    ///
    /// Always at least 1 so a `Retry-After` header never tells a client to
    /// retry immediately.
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let delta = (self.reset_at - now_ms).max(0) as u64;
        delta.div_ceil(1000).max(1)
    }

    /// Window end formatted as an ISO-8601 string with millisecond precision.
    pub fn reset_iso8601(&self) -> String {
        format_reset(self.reset_at)
    }
}

/// Format an epoch-millisecond reset time as ISO-8601 UTC, e.g.
/// `2023-11-14T22:13:20.123Z`.
pub fn format_reset(reset_at_ms: i64) -> String {
    Utc.timestamp_millis_opt(reset_at_ms)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Thread-safe fixed-window rate limiter.
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    records: Arc<RwLock<HashMap<String, RateLimitRecord>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Create a rate limiter driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a rate limiter driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Current time according to this limiter's clock.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Count a request from `identifier` against a window of `window_ms`
    /// milliseconds allowing `limit` requests.
    ///
    /// The read and the increment happen under one write guard, so two
    /// concurrent requests can never both observe `count < limit` for the
    /// last slot.
    pub async fn check(&self, identifier: &str, limit: u32, window_ms: u64) -> RateLimitDecision {
        let limit = limit.max(1);
        let window_ms = i64::try_from(window_ms.max(1)).unwrap_or(i64::MAX);
        let key = format!("{KEY_PREFIX}{identifier}");

        let mut records = self.records.write().await;
        let now = self.clock.now_ms();

        match records.get_mut(&key) {
            Some(record) if !record.is_expired(now) => {
                if record.count >= limit {
                    debug!(%identifier, count = record.count, limit, "Rate limit exceeded");
                    return RateLimitDecision {
                        admitted: false,
                        limit,
                        remaining: 0,
                        reset_at: record.reset_at,
                    };
                }

                record.count += 1;
                RateLimitDecision {
                    admitted: true,
                    limit,
                    remaining: limit - record.count,
                    reset_at: record.reset_at,
                }
            }
            _ => {
                let record = RateLimitRecord {
                    count: 1,
                    reset_at: now.saturating_add(window_ms),
                };
                records.insert(key, record);
                debug!(%identifier, reset_at = record.reset_at, "Opened new rate limit window");
                RateLimitDecision {
                    admitted: true,
                    limit,
                    remaining: limit - 1,
                    reset_at: record.reset_at,
                }
            }
        }
    }

    /// Remove every record whose window has closed. Returns how many were
    /// removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut records = self.records.write().await;
        let now = self.clock.now_ms();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }

    /// Number of records currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
