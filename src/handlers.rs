// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact gateway.
//!
//! The contact route maps each [`SubmissionResult`] to a status code, a JSON
//! body of the form `{success, message | error, details?}` and, where the
//! throttle has something to say, `X-RateLimit-*` and `Retry-After` headers.

use crate::client_ip::client_identifier;
use crate::config::Config;
use crate::limiter::format_reset;
use crate::processor::{SubmissionProcessor, SubmissionResult};
use crate::validator::FieldErrors;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, warn};

/// Reply for an accepted message. Honeypot hits get the same reply.
pub const ACCEPTED_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const RATE_LIMITED_ERROR: &str = "Too many requests. Please try again later.";
pub const MALFORMED_ERROR: &str = "Invalid JSON in request body";
pub const VALIDATION_ERROR: &str = "Validation failed";
pub const NOTIFY_ERROR: &str = "Failed to send email. Please try again later.";
pub const INTERNAL_ERROR: &str = "An unexpected error occurred. Please try again later.";
pub const METHOD_NOT_ALLOWED_ERROR: &str = "Method not allowed";
pub const PAYLOAD_TOO_LARGE_ERROR: &str = "Request body too large";

/// Shared application state.
pub struct AppState {
    pub processor: SubmissionProcessor,
    pub config: Config,
}

/// Body of every `/api/contact` response.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl ContactResponse {
    fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message: Some(message),
            error: None,
            details: None,
        }
    }

    fn err(error: &'static str) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error),
            details: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-gateway",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /api/contact`
pub async fn contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let identifier = client_identifier(&headers);
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return reject_body(&identifier, rejection),
    };
    debug!(%identifier, bytes = body.len(), "Received contact submission");

    let result = state.processor.process(&identifier, &body).await;
    render(result)
}

/// Turn a pipeline result into an HTTP response.
pub fn render(result: SubmissionResult) -> Response {
    match result {
        SubmissionResult::Accepted { rate_limit } => (
            StatusCode::OK,
            [
                ("X-RateLimit-Limit", rate_limit.limit.to_string()),
                ("X-RateLimit-Remaining", rate_limit.remaining.to_string()),
                ("X-RateLimit-Reset", rate_limit.reset_iso8601()),
            ],
            Json(ContactResponse::ok(ACCEPTED_MESSAGE)),
        )
            .into_response(),
        SubmissionResult::RateLimited {
            limit,
            remaining,
            reset_at,
            retry_after_secs,
        } => (
            StatusCode::TOO_MANY_REQUESTS,
            [
                ("X-RateLimit-Limit", limit.to_string()),
                ("X-RateLimit-Remaining", remaining.to_string()),
                ("X-RateLimit-Reset", format_reset(reset_at)),
                ("Retry-After", retry_after_secs.to_string()),
            ],
            Json(ContactResponse::err(RATE_LIMITED_ERROR)),
        )
            .into_response(),
        SubmissionResult::ValidationFailed { field_errors } => (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse {
                details: Some(field_errors),
                ..ContactResponse::err(VALIDATION_ERROR)
            }),
        )
            .into_response(),
        SubmissionResult::MalformedInput => (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::err(MALFORMED_ERROR)),
        )
            .into_response(),
        SubmissionResult::NotifyFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ContactResponse::err(NOTIFY_ERROR)),
        )
            .into_response(),
    }
}

/// A body that could not be read, most often one over the size cap.
fn reject_body(identifier: &str, rejection: BytesRejection) -> Response {
    let status = rejection.status();
    warn!(%identifier, %status, error = %rejection.body_text(), "Rejected contact body");

    let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
        PAYLOAD_TOO_LARGE_ERROR
    } else {
        MALFORMED_ERROR
    };
    (status, Json(ContactResponse::err(error))).into_response()
}

/// Any method other than `POST` on the contact route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ContactResponse::err(METHOD_NOT_ALLOWED_ERROR)),
    )
        .into_response()
}

/// Prometheus scrape endpoint.
pub async fn scrape_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.processor.metrics().render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Converts a handler panic into the generic server error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "Contact handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ContactResponse::err(INTERNAL_ERROR)),
    )
        .into_response()
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.http.allowed_origins;

    // `AllowOrigin::list` panics on a wildcard entry.
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse::<HeaderValue>().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the service router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = &state.config;

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route(
            "/api/contact",
            post(contact).fallback(method_not_allowed),
        );

    if config.metrics.enabled {
        router = router.route(&config.metrics.path, get(scrape_metrics));
    }

    router
        .layer(DefaultBodyLimit::max(config.http.max_body_bytes))
        .layer(cors_layer(config))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
