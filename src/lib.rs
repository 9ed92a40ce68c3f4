// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway
//!
//! Server-side core of a portfolio site's contact form:
//!
//! - Fixed-window throttle per client (5 submissions per hour default)
//! - Typed validation reporting every violated rule per field
//! - Honeypot filtering indistinguishable from success
//! - HTML escaping of submitted text before it is rendered into mail
//! - Delivery through a pluggable notifier with a bounded timeout

pub mod client_ip;
pub mod clock;
pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod notifier;
pub mod processor;
pub mod sanitize;
pub mod validator;

pub use config::Config;
pub use limiter::{RateLimitDecision, RateLimiter};
pub use notifier::Notifier;
pub use processor::{SubmissionProcessor, SubmissionResult};
pub use validator::{ContactSubmission, FieldErrors, ValidContact};
