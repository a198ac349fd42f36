//! Error types for the fausse library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! falls into three families the HTTP layer maps to status codes:
//!
//! - client input problems ([`Error::Validation`], [`Error::InvalidRequest`])
//! - business-rule conflicts ([`Error::Unavailable`])
//! - storage failures ([`Error::Database`], [`Error::LockTimeout`], ...)

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::reservation::request::{FieldError, ValidationErrors};
use crate::slot::Slot;

/// Result type alias for operations that may fail with a fausse error.
///
/// # Examples
///
/// ```
/// use fausse::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(50)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fausse library.
#[derive(Debug, Error)]
pub enum Error {
    /// A single field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A reservation request had one or more invalid fields.
    #[error("invalid reservation request: {0}")]
    InvalidRequest(ValidationErrors),

    /// The requested slot cannot accept the party.
    #[error("slot {slot} unavailable: {reason} ({remaining_capacity} seats remaining)")]
    Unavailable {
        /// The slot that was requested.
        slot: Slot,
        /// Why the slot cannot take the booking.
        reason: UnavailableReason,
        /// Seats still free across the requested seating.
        remaining_capacity: u32,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

/// Reason a slot cannot accept a booking.
///
/// Serialized in `snake_case` so API clients can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Overlapping confirmed reservations leave too few seats.
    FullyBooked,
    /// Seats remain but every table is taken during the seating.
    NoTableAvailable,
    /// The party is larger than the whole dining room.
    PartyTooLarge,
}

impl UnavailableReason {
    /// Returns the stable machine-readable name of the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullyBooked => "fully_booked",
            Self::NoTableAvailable => "no_table_available",
            Self::PartyTooLarge => "party_too_large",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullyBooked => write!(f, "fully booked"),
            Self::NoTableAvailable => write!(f, "no table available"),
            Self::PartyTooLarge => write!(f, "party exceeds restaurant capacity"),
        }
    }
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidRequest(errors)
    }
}

impl Error {
    /// Returns true for errors caused by the caller's input.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::Error;
    ///
    /// let err = Error::Validation { field: "email".into(), message: "malformed".into() };
    /// assert!(err.is_client_error());
    /// ```
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidRequest(_))
    }

    /// Returns true when the error is a capacity or table conflict.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Returns the field-level errors carried by a validation failure.
    ///
    /// A single-field [`Error::Validation`] is returned as a one-element list.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::Validation { field, message } => vec![FieldError::new(field, message)],
            Self::InvalidRequest(errors) => errors.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }
}
