//! Errors surfaced by the `fausse` binary and their process exit codes.
//!
//! | code | meaning                                     |
//! |------|---------------------------------------------|
//! | 0    | success                                     |
//! | 1    | the request was understood but refused      |
//! | 2    | gave up waiting for the database lock       |
//! | 3    | no database and auto-init disabled          |
//! | 4    | bad arguments or reservation fields         |
//! | 5    | I/O failure                                 |
//! | 6    | any other library failure                   |
//! | 7    | configuration could not be loaded or is bad |

use fausse::Error as LibError;
use thiserror::Error;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Anything the library reports that has no dedicated variant.
    #[error(transparent)]
    Library(LibError),

    /// A flag or argument could not be used.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading or writing outside the database failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The busy timeout expired.
    #[error("Timeout waiting for database lock")]
    Timeout,

    /// The database is missing and may not be created.
    #[error("Data directory not found (run `fausse init` or drop --disable-autoinit)")]
    NoDataDirectory,

    /// Configuration failed to load or validate.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A check the user asked for came out negative.
    #[error("{0}")]
    SemanticFailure(String),
}

impl CliError {
    /// Process exit code; see the module table.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SemanticFailure(_) => 1,
            Self::Timeout => 2,
            Self::NoDataDirectory => 3,
            Self::InvalidArguments(_) => 4,
            Self::Io(_) => 5,
            Self::Config(_) => 7,
            Self::Library(inner) => library_exit_code(inner),
        }
    }
}

fn library_exit_code(err: &LibError) -> i32 {
    match err {
        LibError::Unavailable { .. } => 1,
        LibError::Validation { .. } | LibError::InvalidRequest(_) => 4,
        LibError::Io(_) => 5,
        LibError::Configuration(_) => 7,
        _ => 6,
    }
}

impl From<LibError> for CliError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::LockTimeout { .. } => Self::Timeout,
            LibError::DataDirectoryNotFound { .. } => Self::NoDataDirectory,
            other => Self::Library(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fausse::{Slot, UnavailableReason};
    use std::path::PathBuf;

    fn code_for(err: LibError) -> i32 {
        CliError::from(err).exit_code()
    }

    #[test]
    fn test_library_errors_map_to_exit_codes() {
        let slot = Slot::parse("2030-06-01", "19:00").unwrap();
        assert_eq!(
            code_for(LibError::Unavailable {
                slot,
                reason: UnavailableReason::FullyBooked,
                remaining_capacity: 0,
            }),
            1
        );
        assert_eq!(code_for(LibError::LockTimeout { seconds: 5 }), 2);
        assert_eq!(
            code_for(LibError::DataDirectoryNotFound {
                path: PathBuf::from("/nowhere"),
            }),
            3
        );
        assert_eq!(
            code_for(LibError::Validation {
                field: "email".into(),
                message: "email is invalid".into(),
            }),
            4
        );
        assert_eq!(code_for(LibError::Io(std::io::Error::other("disk"))), 5);
    }

    #[test]
    fn test_library_message_is_passed_through() {
        let err = CliError::from(LibError::Validation {
            field: "email".into(),
            message: "email is invalid".into(),
        });
        assert_eq!(
            err.to_string(),
            LibError::Validation {
                field: "email".into(),
                message: "email is invalid".into(),
            }
            .to_string()
        );
    }
}
