// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the contact gateway.

use thiserror::Error;

/// Failure to deliver an outbound notification.
///
/// These never reach the caller verbatim; the HTTP boundary maps every
/// variant to the same generic 500 body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notifier timed out after {0} ms")]
    Timeout(u64),

    #[error("Notifier transport error: {0}")]
    Transport(String),

    #[error("Notifier rejected message with status {status}")]
    Rejected { status: u16 },
}

/// Invalid service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Value for {key} is out of range: {reason}")]
    OutOfRange {
        key: &'static str,
        reason: &'static str,
    },

    #[error("Invalid URL for {key} ({value}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, NotifyError>;
