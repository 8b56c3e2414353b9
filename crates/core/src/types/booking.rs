//! Booking request records and the validation of public submissions.
//!
//! A [`BookingSubmission`] is exactly what the public form posts. Validating
//! it yields a [`NewBookingRequest`], the only value the store accepts for
//! insertion. Stored rows come back as [`BookingRequest`] and are never
//! modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::BookingRequestId;

/// Errors raised when a submission is missing required fields.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingValidationError {
    /// `name` is absent or blank.
    #[error("name is required")]
    MissingName,
    /// `email` is absent or blank.
    #[error("email is required")]
    MissingEmail,
}

/// Raw booking form submission, as posted by the public page.
///
/// Every field is optional at this stage so that a missing `name` or `email`
/// surfaces as a [`BookingValidationError`] rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub city_venue: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, alias = "optIn")]
    pub marketing_opt_in: Option<bool>,
}

impl BookingSubmission {
    /// Trim every text field and check the required ones.
    ///
    /// Optional fields that are blank after trimming become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingValidationError::MissingName`] or
    /// [`BookingValidationError::MissingEmail`] when the field is absent or
    /// empty after trimming. The name is checked first.
    pub fn validate(self) -> Result<NewBookingRequest, BookingValidationError> {
        let name = non_blank(self.name).ok_or(BookingValidationError::MissingName)?;
        let email = non_blank(self.email).ok_or(BookingValidationError::MissingEmail)?;

        Ok(NewBookingRequest {
            name,
            email,
            city_venue: non_blank(self.city_venue),
            event_date: non_blank(self.event_date),
            details: non_blank(self.details),
            marketing_opt_in: self.marketing_opt_in.unwrap_or(false),
        })
    }
}

/// A validated booking request, ready to be inserted.
///
/// Only constructed through [`BookingSubmission::validate`], so `name` and
/// `email` are guaranteed non-empty and all text is trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookingRequest {
    name: String,
    email: String,
    city_venue: Option<String>,
    event_date: Option<String>,
    details: Option<String>,
    marketing_opt_in: bool,
}

impl NewBookingRequest {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn city_venue(&self) -> Option<&str> {
        self.city_venue.as_deref()
    }

    #[must_use]
    pub fn event_date(&self) -> Option<&str> {
        self.event_date.as_deref()
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    #[must_use]
    pub const fn marketing_opt_in(&self) -> bool {
        self.marketing_opt_in
    }
}

/// A stored booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: BookingRequestId,
    pub name: String,
    pub email: String,
    pub city_venue: Option<String>,
    pub event_date: Option<String>,
    pub details: Option<String>,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

/// Trim a text field, mapping absent and blank input to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str) -> BookingSubmission {
        BookingSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            ..BookingSubmission::default()
        }
    }

    #[test]
    fn test_validate_trims_required_fields() {
        let new = submission("  Ana  ", "\ta@x.com\n").validate().unwrap();
        assert_eq!(new.name(), "Ana");
        assert_eq!(new.email(), "a@x.com");
        assert!(!new.marketing_opt_in());
    }

    #[test]
    fn test_validate_missing_name() {
        let err = BookingSubmission {
            email: Some("a@x.com".to_string()),
            ..BookingSubmission::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, BookingValidationError::MissingName);
    }

    #[test]
    fn test_validate_blank_email() {
        let err = submission("Ana", "   ").validate().unwrap_err();
        assert_eq!(err, BookingValidationError::MissingEmail);
    }

    #[test]
    fn test_validate_both_missing_reports_name() {
        let err = BookingSubmission::default().validate().unwrap_err();
        assert_eq!(err, BookingValidationError::MissingName);
    }

    #[test]
    fn test_validate_optional_fields() {
        let new = BookingSubmission {
            city_venue: Some(" Miami Beach Bandshell ".to_string()),
            event_date: Some("2025-06-01".to_string()),
            details: Some("   ".to_string()),
            marketing_opt_in: Some(true),
            ..submission("Ana", "a@x.com")
        }
        .validate()
        .unwrap();

        assert_eq!(new.city_venue(), Some("Miami Beach Bandshell"));
        assert_eq!(new.event_date(), Some("2025-06-01"));
        assert_eq!(new.details(), None);
        assert!(new.marketing_opt_in());
    }

    #[test]
    fn test_email_is_not_format_checked() {
        let new = submission("Ana", "call me maybe").validate().unwrap();
        assert_eq!(new.email(), "call me maybe");
    }

    #[test]
    fn test_submission_deserializes_camel_case() {
        let json = r#"{
            "name": "Ana",
            "email": "a@x.com",
            "cityVenue": "Wynwood",
            "eventDate": "2025-06-01",
            "details": "Two sets",
            "marketingOptIn": true
        }"#;
        let parsed: BookingSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.city_venue.as_deref(), Some("Wynwood"));
        assert_eq!(parsed.marketing_opt_in, Some(true));
    }

    #[test]
    fn test_submission_tolerates_missing_and_null_fields() {
        let parsed: BookingSubmission =
            serde_json::from_str(r#"{"name": null, "details": "hi"}"#).unwrap();
        assert_eq!(parsed.name, None);
        assert_eq!(parsed.email, None);
        assert_eq!(parsed.details.as_deref(), Some("hi"));
    }

    #[test]
    fn test_booking_request_serializes_camel_case() {
        let record = BookingRequest {
            id: "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap(),
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            city_venue: None,
            event_date: Some("2025-06-01".to_string()),
            details: None,
            marketing_opt_in: false,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["eventDate"], "2025-06-01");
        assert_eq!(value["marketingOptIn"], false);
        assert!(value["cityVenue"].is_null());
    }
}
