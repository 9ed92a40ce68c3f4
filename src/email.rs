// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rendering of contact form notifications.
//!
//! Both renderings interpolate the sanitized fields as-is; escaping has
//! already happened in [`crate::sanitize`].

use crate::config::NotifierConfig;
use crate::sanitize::SanitizedContact;
use serde::Serialize;

/// A fully rendered message ready for a notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub reply_to: String,
}

impl OutboundEmail {
    /// Build the notification for `contact` using the configured sender and
    /// recipient.
    pub fn for_contact(contact: &SanitizedContact, config: &NotifierConfig) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: subject_line(contact),
            text: render_text(contact),
            html: render_html(contact),
            reply_to: contact.email.clone(),
        }
    }
}

/// `Contact Form: {subject}` when a subject was given, otherwise
/// `New message from {name}`.
pub fn subject_line(contact: &SanitizedContact) -> String {
    if contact.subject.is_empty() {
        format!("New message from {}", contact.name)
    } else {
        format!("Contact Form: {}", contact.subject)
    }
}

pub fn render_text(contact: &SanitizedContact) -> String {
    let subject = if contact.subject.is_empty() {
        String::new()
    } else {
        format!("Subject: {}\n", contact.subject)
    };

    format!(
        "New Contact Form Submission\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         {subject}\n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         This email was sent from your website contact form.\n\
         Reply directly to this email to respond to {name}.",
        name = contact.name,
        email = contact.email,
        subject = subject,
        message = contact.message,
    )
}

pub fn render_html(contact: &SanitizedContact) -> String {
    let subject_row = if contact.subject.is_empty() {
        String::new()
    } else {
        detail_row("Subject", &contact.subject)
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>New Contact Form Submission</title>
</head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f4f4f4;">
  <table width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: #f4f4f4; padding: 20px;">
    <tr>
      <td align="center">
        <table width="600" cellpadding="0" cellspacing="0" border="0" style="background-color: #ffffff; border-radius: 8px;">
          <tr>
            <td style="background-color: #667eea; padding: 30px; text-align: center;">
              <h1 style="margin: 0; color: #ffffff; font-size: 24px;">New Contact Form Submission</h1>
            </td>
          </tr>
          <tr>
            <td style="padding: 30px;">
              <p style="margin: 0 0 20px; color: #333333; font-size: 16px;">You have received a new message from your website contact form:</p>
              <table width="100%" cellpadding="10" cellspacing="0" border="0" style="margin-bottom: 20px;">
{name_row}
{email_row}
{subject_row}
{message_row}
              </table>
              <p style="text-align: center;">
                <a href="mailto:{email}" style="display: inline-block; background-color: #667eea; color: #ffffff; text-decoration: none; padding: 12px 30px; border-radius: 6px; font-weight: bold;">Reply to {name}</a>
              </p>
            </td>
          </tr>
          <tr>
            <td style="background-color: #f8f9fa; padding: 20px; text-align: center;">
              <p style="margin: 0; color: #666666; font-size: 12px;">This email was sent from your website contact form</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        name_row = detail_row("Name", &contact.name),
        email_row = detail_row(
            "Email",
            &format!(
                r#"<a href="mailto:{0}" style="color: #667eea; text-decoration: none;">{0}</a>"#,
                contact.email
            ),
        ),
        subject_row = subject_row,
        message_row = detail_row("Message", &contact.message),
        email = contact.email,
        name = contact.name,
    )
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        r#"                <tr>
                  <td style="background-color: #f8f9fa; border-radius: 4px; padding: 15px;">
                    <p style="margin: 0 0 10px; color: #666666; font-size: 12px; text-transform: uppercase;">{label}</p>
                    <p style="margin: 0; color: #333333; font-size: 16px; white-space: pre-wrap;">{value}</p>
                  </td>
                </tr>"#
    )
}
