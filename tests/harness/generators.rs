// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Payload and client generators for the contact endpoint.

use serde_json::json;

/// Generate a pool of client identifiers.
pub fn generate_ips(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{a}.{b}.{c}")
        })
        .collect()
}

/// A well-formed submission that should pass validation.
pub fn valid_body(i: usize) -> Vec<u8> {
    json!({
        "name": format!("Visitor {i}"),
        "email": format!("visitor{i}@example.com"),
        "subject": "Project enquiry",
        "message": format!("Hello, I saw project #{i} and would like to chat."),
    })
    .to_string()
    .into_bytes()
}

/// A well-formed submission with the bait field filled in, as a form-filling
/// bot would send it.
pub fn bot_body(i: usize) -> Vec<u8> {
    json!({
        "name": format!("Bot {i}"),
        "email": format!("bot{i}@spam.example"),
        "subject": "Cheap pills",
        "message": "Best prices on everything, click now!",
        "honeypot": format!("http://spam.example/{i}"),
    })
    .to_string()
    .into_bytes()
}

/// Markup injection attempts for free-text fields.
pub fn generate_xss_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "\"><svg onload=alert(document.cookie)>",
        "'; DROP TABLE messages; --",
        "</p><iframe src='javascript:alert(1)'></iframe>",
        "<a href=\"javascript:void(0)\">click me please</a>",
    ]
}

/// A valid submission whose message is `payload`.
pub fn xss_body(payload: &str) -> Vec<u8> {
    json!({
        "name": "Mallory",
        "email": "mallory@example.com",
        "subject": "<b>urgent</b>",
        "message": format!("Please read this: {payload}"),
    })
    .to_string()
    .into_bytes()
}

/// Bodies the parser must reject outright.
pub fn generate_malformed_bodies() -> Vec<&'static [u8]> {
    vec![
        &b""[..],
        &b"not json"[..],
        &b"{\"name\": \"Ada\""[..],
        &b"[\"name\", \"Ada\"]"[..],
        &b"\"just a string\""[..],
        &b"42"[..],
        &b"null"[..],
        &b"{'name': 'single quotes'}"[..],
        &b"\xff\xfe\x00garbage"[..],
    ]
}

/// Bodies that parse but fail validation, with the fields expected to fail.
pub fn generate_invalid_bodies() -> Vec<(serde_json::Value, Vec<&'static str>)> {
    vec![
        (json!({}), vec!["email", "message", "name"]),
        (
            json!({"name": "a", "email": "not-an-email", "message": "short"}),
            vec!["email", "message", "name"],
        ),
        (
            json!({"name": "Ada", "email": "ada@example.com", "message": 12345678901_u64}),
            vec!["message"],
        ),
        (
            json!({"name": "Ada", "email": "ada@example.com", "message": "long enough text", "subject": "s".repeat(201)}),
            vec!["subject"],
        ),
        (
            json!({"name": "   ", "email": "   ", "message": "          "}),
            vec!["email", "message", "name"],
        ),
        (
            json!({"name": "Ada", "email": "ada@example.com", "message": "long enough text", "honeypot": 1}),
            vec!["honeypot"],
        ),
    ]
}
