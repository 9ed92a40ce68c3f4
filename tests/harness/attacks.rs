// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Hostile traffic patterns against the contact endpoint.

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of unique client identifiers to rotate through
    pub unique_ips: usize,
    /// Simulated milliseconds between submissions
    pub spacing_ms: i64,
    /// Fraction of submissions that fill the honeypot (0.0-1.0)
    pub honeypot_ratio: f64,
    /// Fraction of submissions with unparseable bodies (0.0-1.0)
    pub malformed_ratio: f64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            spacing_ms: 1_000,
            honeypot_ratio: 0.0,
            malformed_ratio: 0.0,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client hammering the form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 200,
            unique_ips: 1,
            spacing_ms: 10,
            ..Default::default()
        }
    }

    /// Many clients, a handful of submissions each.
    pub fn distributed_attack() -> Self {
        Self {
            total_requests: 500,
            unique_ips: 100,
            spacing_ms: 20,
            ..Default::default()
        }
    }

    /// Form-filling bots that also fill the bait field.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 50,
            honeypot_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Garbage bodies from many clients.
    pub fn malformed_spray() -> Self {
        Self {
            total_requests: 60,
            unique_ips: 20,
            malformed_ratio: 1.0,
            ..Default::default()
        }
    }

    /// One client spread over several windows, never more than the limit in
    /// any of them.
    pub fn slow_drip(window_ms: i64, per_window: usize) -> Self {
        Self {
            total_requests: per_window * 4,
            unique_ips: 1,
            spacing_ms: window_ms / per_window as i64 + 1,
            ..Default::default()
        }
    }
}

/// Expected outcomes for different attack types.
pub struct AttackExpectations {
    /// Maximum submissions that may reach the notifier
    pub max_delivered: usize,
    /// Description of expected behavior
    pub description: &'static str,
}

impl AttackConfig {
    /// Get expected outcomes for this attack pattern under `limit`
    /// submissions per client per window, assuming the whole attack fits in
    /// one window.
    pub fn expectations(&self, limit: usize) -> AttackExpectations {
        if self.honeypot_ratio >= 1.0 {
            AttackExpectations {
                max_delivered: 0,
                description: "Every bot submission should be filtered silently",
            }
        } else if self.malformed_ratio >= 1.0 {
            AttackExpectations {
                max_delivered: 0,
                description: "Every garbage body should be rejected",
            }
        } else {
            AttackExpectations {
                max_delivered: self.unique_ips * limit,
                description: "Each client should be capped at the window limit",
            }
        }
    }
}
