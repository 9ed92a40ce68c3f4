// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for contact submissions.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Terminal state of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    /// Honeypot hit; reported to the caller as accepted
    Filtered,
    RateLimited,
    ValidationFailed,
    Malformed,
    NotifyFailed,
}

impl Outcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Filtered => "filtered",
            Self::RateLimited => "rate_limited",
            Self::ValidationFailed => "validation_failed",
            Self::Malformed => "malformed",
            Self::NotifyFailed => "notify_failed",
        }
    }
}

/// Service-local metrics registry.
#[derive(Clone)]
pub struct ContactMetrics {
    registry: Registry,
    submissions: IntCounterVec,
    swept: IntCounter,
}

impl ContactMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Contact form submissions by outcome",
            ),
            &["outcome"],
        )?;
        let swept = IntCounter::new(
            "rate_limit_records_swept_total",
            "Expired rate limit records removed by the sweeper",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(swept.clone()))?;

        Ok(Self {
            registry,
            submissions,
            swept,
        })
    }

    pub fn record(&self, outcome: Outcome) {
        self.submissions
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    pub fn record_swept(&self, removed: usize) {
        self.swept.inc_by(removed as u64);
    }

    /// Current count for `outcome`.
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.submissions
            .with_label_values(&[outcome.as_label()])
            .get()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
