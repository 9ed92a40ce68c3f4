// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Client identifier derivation from proxy headers.
//!
//! Headers are consulted in a fixed order: the first hop of
//! `X-Forwarded-For`, then `X-Real-IP`, then `CF-Connecting-IP`. When none is
//! present the literal `"unknown"` is used, so all header-less clients share
//! one bucket.
//!
//! The first `X-Forwarded-For` hop is whatever the client sent unless a
//! trusted proxy overwrites it. Deployments that do not strip client-supplied
//! forwarding headers let callers pick their own bucket.

use axum::http::HeaderMap;

/// Identifier used when no proxy header names the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const CF_CONNECTING_IP: &str = "cf-connecting-ip";

/// Derive the throttle identifier for a request.
pub fn client_identifier(headers: &HeaderMap) -> String {
    header_str(headers, FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_str(headers, REAL_IP))
        .or_else(|| header_str(headers, CF_CONNECTING_IP))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
