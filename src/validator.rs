// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact form and chat message validator.
//!
//! Implements ingress-level validation for portfolio submissions:
//! - Honeypot bot trap (silent success, nothing validated or delivered)
//! - Name/email/message presence and length rules
//! - Basic email format check
//! - HTML tag stripping on accepted name and message fields
//!
//! All field rules are checked independently; a submission violating several
//! rules reports every violation at once, in field order.

use crate::config::ValidationConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// A single violated field rule. The display string is the user-facing
/// message returned to the client verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be {0} characters or less")]
    NameTooLong(usize),

    #[error("Email is required")]
    EmailRequired,

    #[error("Email format is invalid")]
    EmailInvalid,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message must be {0} characters or less")]
    MessageTooLong(usize),
}

/// A contact submission that passed validation, trimmed and tag-stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Outcome of contact form validation.
#[derive(Debug, Clone)]
pub enum ContactValidation {
    /// All fields valid; payload is sanitized and ready for delivery
    Valid(ContactSubmission),
    /// Honeypot field was filled: a bot. The caller reports success without
    /// delivering anything.
    Honeypot,
    /// One or more field rules violated, in field order
    Invalid(Vec<ValidationError>),
}

/// Portfolio submission validator.
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given limits.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a contact form submission.
    ///
    /// Absent fields and non-string values are passed as `None` by the
    /// handler and reported as the field's "required" violation.
    pub fn validate_contact(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        message: Option<&str>,
        honeypot: Option<&str>,
    ) -> ContactValidation {
        // Bot trap: a filled honeypot short-circuits everything else.
        if honeypot.is_some_and(|h| !h.is_empty()) {
            debug!("Honeypot filled, treating submission as bot");
            return ContactValidation::Honeypot;
        }

        let name = name.map(str::trim).unwrap_or("");
        let email = email.map(str::trim).unwrap_or("");
        let message = message.map(str::trim).unwrap_or("");

        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(ValidationError::NameRequired);
        } else if name.chars().count() > self.config.max_name_chars {
            errors.push(ValidationError::NameTooLong(self.config.max_name_chars));
        }

        if email.is_empty() {
            errors.push(ValidationError::EmailRequired);
        } else if !is_valid_email(email) {
            errors.push(ValidationError::EmailInvalid);
        }

        if message.is_empty() {
            errors.push(ValidationError::MessageRequired);
        } else if message.chars().count() > self.config.max_message_chars {
            errors.push(ValidationError::MessageTooLong(
                self.config.max_message_chars,
            ));
        }

        if !errors.is_empty() {
            debug!(count = errors.len(), "Contact validation failed");
            return ContactValidation::Invalid(errors);
        }

        ContactValidation::Valid(ContactSubmission {
            name: strip_html(name),
            email: email.to_string(),
            message: strip_html(message),
        })
    }

    /// Validate a chat message, returning the trimmed text.
    pub fn validate_chat(&self, message: Option<&str>) -> Result<String, ValidationError> {
        let message = message.map(str::trim).unwrap_or("");

        if message.is_empty() {
            return Err(ValidationError::MessageRequired);
        }
        if message.chars().count() > self.config.max_chat_chars {
            return Err(ValidationError::MessageTooLong(self.config.max_chat_chars));
        }

        Ok(message.to_string())
    }
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Strip HTML-tag-like fragments (`<` through the next `>`) from a string.
/// Text between tags is kept; an unterminated `<` is left alone.
fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Basic `local@domain.tld` shape check.
fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
