// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway Service
//!
//! Serves `POST /api/contact` for a portfolio site: throttles each client,
//! validates and escapes the submission, then hands it to a notifier.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (a `.env` file is read
//! first when present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_MAX`: Submissions per client per window (default: 5)
//! - `RATE_LIMIT_WINDOW_MS`: Window length (default: 3600000)
//! - `SWEEP_INTERVAL_SECS`: Expired-record sweep interval (default: 3600)
//! - `EMAIL_FROM` / `EMAIL_TO`: Sender and recipient addresses
//! - `NOTIFIER_ENDPOINT` / `NOTIFIER_API_KEY`: Mail API; log-only when unset
//! - `NOTIFIER_TIMEOUT_MS`: Delivery timeout (default: 10000)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins
//! - `MAX_BODY_BYTES`: Request body cap (default: 65536)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_gateway::{
    config::Config,
    handlers::{build_router, AppState},
    limiter::RateLimiter,
    metrics::ContactMetrics,
    notifier,
    processor::SubmissionProcessor,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window_ms,
        sweep_interval_secs = config.rate_limit.sweep_interval_secs,
        email_to = %config.notifier.to,
        "Starting contact gateway"
    );

    // Create application state
    let limiter = Arc::new(RateLimiter::new());
    let metrics = ContactMetrics::new()?;
    let processor = SubmissionProcessor::new(
        limiter.clone(),
        notifier::from_config(&config.notifier),
        metrics.clone(),
        config.rate_limit.clone(),
        config.notifier.clone(),
    );

    let state = Arc::new(AppState {
        processor,
        config: config.clone(),
    });

    // Spawn sweep task
    let sweep_interval = config.rate_limit.sweep_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        // The first tick completes immediately; nothing can have expired yet.
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = limiter.sweep_expired().await;
            metrics.record_swept(removed);
            debug!(removed, "Swept expired rate limit records");
        }
    });

    // Build router
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
