// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound delivery of contact notifications.
//!
//! Two backends are provided:
//!
//! - [`LogNotifier`] writes the message to the log and always succeeds. It is
//!   used when no mail API endpoint is configured.
//! - [`HttpNotifier`] posts the message as JSON to a transactional mail API
//!   with bearer authentication.

use crate::config::NotifierConfig;
use crate::email::OutboundEmail;
use crate::error::{NotifyError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Delivers a rendered contact message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        info!(
            from = %email.from,
            to = %email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            body = %email.text,
            "Contact email (log only)"
        );
        Ok(())
    }
}

/// Mail API client.
pub struct HttpNotifier {
    endpoint: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpNotifier {
    /// Create a new mail API client
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let mut request = self.client.post(self.endpoint.clone()).json(email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(endpoint = %self.endpoint, status = status.as_u16(), "Mail API accepted message");
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

/// Pick the backend the configuration asks for.
pub fn from_config(config: &NotifierConfig) -> Arc<dyn Notifier> {
    match &config.endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "Delivering contact messages via mail API");
            Arc::new(HttpNotifier::new(endpoint.clone(), config.api_key.clone()))
        }
        None => {
            info!("No mail API configured, contact messages will only be logged");
            Arc::new(LogNotifier)
        }
    }
}
