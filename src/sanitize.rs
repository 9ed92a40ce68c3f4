// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTML escaping for submitted free text.

use crate::validator::ValidContact;

/// A contact whose free-text fields are safe to interpolate into HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    pub name: String,
    /// Lower-cased and trimmed; not escaped
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Escape the characters that can open a tag, close an attribute or start
/// a closing tag.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape name, subject and message; normalise the email address.
pub fn sanitize_contact(contact: &ValidContact) -> SanitizedContact {
    SanitizedContact {
        name: escape_html(&contact.name),
        email: contact.email.trim().to_lowercase(),
        subject: escape_html(&contact.subject),
        message: escape_html(&contact.message),
    }
}
