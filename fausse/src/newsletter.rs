//! Newsletter subscribers.
//!
//! Subscriptions are keyed by normalized email, so subscribing twice is a
//! no-op. Storage lives in [`Database::subscribe`](crate::Database::subscribe).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::reservation::request::FieldError;

/// Maximum length of an email address, in characters.
pub const MAX_EMAIL_LEN: usize = 254;

/// A newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Subscriber {
    /// Returns the subscribed email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns when the email first subscribed.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trims, lower-cases and validates an email address.
///
/// # Errors
///
/// Returns a [`FieldError`] on the `email` field if the address is empty,
/// too long, or malformed.
///
/// # Examples
///
/// ```
/// use fausse::newsletter::normalize_email;
///
/// assert_eq!(normalize_email(" Priya.Shah@Example.com ").unwrap(), "priya.shah@example.com");
/// assert_eq!(normalize_email("not-an-email").unwrap_err().field, "email");
/// ```
pub fn normalize_email(raw: &str) -> Result<String, FieldError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(FieldError::new("email", "email is required"));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(FieldError::new(
            "email",
            format!("email must be at most {MAX_EMAIL_LEN} characters"),
        ));
    }
    if !email.validate_email() {
        return Err(FieldError::new("email", "email address is malformed"));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(
            normalize_email("  Diego.Romero@EXAMPLE.com\n").unwrap(),
            "diego.romero@example.com"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["not-an-email", "a@", "@example.com", "two@@example.com", "spa ce@example.com"] {
            let err = normalize_email(raw).unwrap_err();
            assert_eq!(err.field, "email", "{raw} should be rejected");
        }
    }

    #[test]
    fn test_rejects_empty() {
        let err = normalize_email("   ").unwrap_err();
        assert!(err.message.contains("required"));
    }

    #[test]
    fn test_rejects_too_long() {
        let raw = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));
        let err = normalize_email(&raw).unwrap_err();
        assert!(err.message.contains("at most"));
    }
}
