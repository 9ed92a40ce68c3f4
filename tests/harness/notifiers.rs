// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Notifier doubles.

use async_trait::async_trait;
use contact_gateway::{email::OutboundEmail, error::NotifyError, notifier::Notifier};
use std::sync::Mutex;
use std::time::Duration;

/// Records every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Always fails as if the mail API were down.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("connection refused".to_string()))
    }
}

/// Never answers within any sane timeout.
#[derive(Debug, Default)]
pub struct HangingNotifier;

#[async_trait]
impl Notifier for HangingNotifier {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), NotifyError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Panics mid-delivery.
#[derive(Debug, Default)]
pub struct PanickingNotifier;

#[async_trait]
impl Notifier for PanickingNotifier {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), NotifyError> {
        panic!("mail client exploded");
    }
}
