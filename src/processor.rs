// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact submission pipeline.
//!
//! One call to [`SubmissionProcessor::process`] takes a raw request body
//! through throttle, parse, validation, honeypot, sanitization and delivery,
//! stopping at the first stage that rejects it. Every path ends in exactly
//! one [`SubmissionResult`]; nothing is retried here.

use crate::config::{NotifierConfig, RateLimitConfig};
use crate::email::OutboundEmail;
use crate::error::NotifyError;
use crate::limiter::{RateLimitDecision, RateLimiter};
use crate::metrics::{ContactMetrics, Outcome};
use crate::notifier::Notifier;
use crate::sanitize::sanitize_contact;
use crate::validator::{self, FieldErrors};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Delivered, or silently filtered by the honeypot. The two are
    /// indistinguishable from here on.
    Accepted { rate_limit: RateLimitDecision },
    RateLimited {
        limit: u32,
        remaining: u32,
        reset_at: i64,
        retry_after_secs: u64,
    },
    ValidationFailed {
        field_errors: FieldErrors,
    },
    NotifyFailed,
    MalformedInput,
}

impl SubmissionResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionResult::Accepted { .. })
    }
}

/// Runs the contact pipeline against a shared limiter and notifier.
pub struct SubmissionProcessor {
    limiter: Arc<RateLimiter>,
    notifier: Arc<dyn Notifier>,
    metrics: ContactMetrics,
    rate_limit: RateLimitConfig,
    notifier_config: NotifierConfig,
}

impl SubmissionProcessor {
    pub fn new(
        limiter: Arc<RateLimiter>,
        notifier: Arc<dyn Notifier>,
        metrics: ContactMetrics,
        rate_limit: RateLimitConfig,
        notifier_config: NotifierConfig,
    ) -> Self {
        Self {
            limiter,
            notifier,
            metrics,
            rate_limit,
            notifier_config,
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn metrics(&self) -> &ContactMetrics {
        &self.metrics
    }

    /// Process one raw submission body from `identifier`.
    pub async fn process(&self, identifier: &str, body: &[u8]) -> SubmissionResult {
        let result = self.run(identifier, body).await;
        debug!(%identifier, ?result, "Contact submission processed");
        result
    }

    async fn run(&self, identifier: &str, body: &[u8]) -> SubmissionResult {
        // Every request spends budget, even ones that fail to parse.
        let decision = self
            .limiter
            .check(
                identifier,
                self.rate_limit.max_requests,
                self.rate_limit.window_ms,
            )
            .await;

        if !decision.admitted {
            let retry_after_secs = decision.retry_after_secs(self.limiter.now_ms());
            warn!(
                %identifier,
                limit = decision.limit,
                retry_after_secs,
                "Contact submission rate limited"
            );
            self.metrics.record(Outcome::RateLimited);
            return SubmissionResult::RateLimited {
                limit: decision.limit,
                remaining: decision.remaining,
                reset_at: decision.reset_at,
                retry_after_secs,
            };
        }

        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => object,
            Ok(_) => {
                info!(%identifier, "Contact body is not a JSON object");
                self.metrics.record(Outcome::Malformed);
                return SubmissionResult::MalformedInput;
            }
            Err(err) => {
                info!(%identifier, error = %err, "Contact body is not valid JSON");
                self.metrics.record(Outcome::Malformed);
                return SubmissionResult::MalformedInput;
            }
        };

        let contact = match validator::validate_json(&object) {
            Ok(contact) => contact,
            Err(field_errors) => {
                info!(
                    %identifier,
                    fields = ?field_errors.iter().map(|(f, _)| f).collect::<Vec<_>>(),
                    "Contact submission failed validation"
                );
                self.metrics.record(Outcome::ValidationFailed);
                return SubmissionResult::ValidationFailed { field_errors };
            }
        };

        if contact.is_honeypot_tripped() {
            warn!(%identifier, "Honeypot triggered, discarding submission");
            self.metrics.record(Outcome::Filtered);
            return SubmissionResult::Accepted {
                rate_limit: decision,
            };
        }

        let clean = sanitize_contact(&contact);
        let email = OutboundEmail::for_contact(&clean, &self.notifier_config);

        match self.deliver(&email).await {
            Ok(()) => {
                info!(%identifier, subject = %email.subject, "Contact message delivered");
                self.metrics.record(Outcome::Accepted);
                SubmissionResult::Accepted {
                    rate_limit: decision,
                }
            }
            Err(err) => {
                error!(%identifier, error = %err, "Failed to deliver contact message");
                self.metrics.record(Outcome::NotifyFailed);
                SubmissionResult::NotifyFailed
            }
        }
    }

    async fn deliver(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let timeout = self.notifier_config.timeout();
        match tokio::time::timeout(timeout, self.notifier.send(email)).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout(self.notifier_config.timeout_ms)),
        }
    }
}
