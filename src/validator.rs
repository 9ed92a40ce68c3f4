// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form validation.
//!
//! Every field is trimmed before its rules run, and every violated rule is
//! reported: a submission with a short name and a bad address gets messages
//! for both fields in one response.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const SUBJECT_MAX: usize = 200;
pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 5000;

/// Contact form with every field known to be a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub honeypot: Option<String>,
}

/// A submission that passed validation. All fields are trimmed and the
/// email address is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    /// Empty when the submitter left it out
    pub subject: String,
    pub message: String,
    pub honeypot: Option<String>,
}

impl ValidContact {
    /// Whether the hidden bait field was filled in.
    pub fn is_honeypot_tripped(&self) -> bool {
        matches!(&self.honeypot, Some(value) if !value.trim().is_empty())
    }
}

/// Field name to the messages for every rule that field violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Validate a typed submission.
pub fn validate(submission: &ContactSubmission) -> Result<ValidContact, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = check_name(&submission.name, &mut errors);
    let email = check_email(&submission.email, &mut errors);
    let subject = check_subject(submission.subject.as_deref(), &mut errors);
    let message = check_message(&submission.message, &mut errors);

    finish(errors, name, email, subject, message, submission.honeypot.clone())
}

/// Validate a decoded JSON object whose field types have not been checked.
///
/// Missing required fields and non-string values are reported alongside
/// rule violations on the fields that are well-typed. A type error replaces
/// any rule message for the same field.
pub fn validate_json(object: &Map<String, Value>) -> Result<ValidContact, FieldErrors> {
    let mut type_errors = FieldErrors::new();

    let submission = ContactSubmission {
        name: required_str(object, "name", &mut type_errors).to_string(),
        email: required_str(object, "email", &mut type_errors).to_string(),
        subject: optional_str(object, "subject", &mut type_errors).map(str::to_string),
        message: required_str(object, "message", &mut type_errors).to_string(),
        honeypot: optional_str(object, "honeypot", &mut type_errors).map(str::to_string),
    };

    match validate(&submission) {
        Ok(contact) if type_errors.is_empty() => Ok(contact),
        Ok(_) => Err(type_errors),
        Err(mut errors) => {
            errors.0.extend(type_errors.0);
            Err(errors)
        }
    }
}

fn finish(
    errors: FieldErrors,
    name: String,
    email: String,
    subject: String,
    message: String,
    honeypot: Option<String>,
) -> Result<ValidContact, FieldErrors> {
    if !errors.is_empty() {
        debug!(fields = errors.len(), "Contact submission failed validation");
        return Err(errors);
    }

    Ok(ValidContact {
        name,
        email,
        subject,
        message,
        honeypot,
    })
}

fn check_name(raw: &str, errors: &mut FieldErrors) -> String {
    let name = raw.trim();
    let len = name.chars().count();
    if len < NAME_MIN {
        errors.push("name", "Name must be at least 2 characters");
    }
    if len > NAME_MAX {
        errors.push("name", "Name must be less than 100 characters");
    }
    name.to_string()
}

fn check_email(raw: &str, errors: &mut FieldErrors) -> String {
    let email = raw.trim();
    if !is_valid_email(email) {
        errors.push("email", "Please provide a valid email address");
    }
    if email.chars().count() > EMAIL_MAX {
        errors.push("email", "Email must be less than 255 characters");
    }
    email.to_lowercase()
}

fn check_subject(raw: Option<&str>, errors: &mut FieldErrors) -> String {
    let subject = raw.map(str::trim).unwrap_or_default();
    if subject.chars().count() > SUBJECT_MAX {
        errors.push("subject", "Subject must be less than 200 characters");
    }
    subject.to_string()
}

fn check_message(raw: &str, errors: &mut FieldErrors) -> String {
    let message = raw.trim();
    let len = message.chars().count();
    if len < MESSAGE_MIN {
        errors.push("message", "Message must be at least 10 characters");
    }
    if len > MESSAGE_MAX {
        errors.push("message", "Message must be less than 5000 characters");
    }
    message.to_string()
}

/// The string value of `field`, or `""` after recording why there is none.
fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> &'a str {
    match object.get(field) {
        None => {
            errors.push(field, "Required");
            ""
        }
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            errors.push(field, type_mismatch(other));
            ""
        }
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match object.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.push(field, type_mismatch(other));
            None
        }
    }
}

fn type_mismatch(value: &Value) -> String {
    let received = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("Expected string, received {received}")
}

/// Check an address against the accepted shape: a dotted local part that
/// neither starts with nor doubles a dot, an `@`, and a domain of
/// hyphenated labels ending in an alphabetic TLD of two or more letters.
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let regex = RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("Failed to compile email regex pattern")
    });

    !email.starts_with('.') && !email.contains("..") && regex.is_match(email)
}
