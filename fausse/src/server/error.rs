//! Mapping of library errors onto HTTP responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::{Error, UnavailableReason};
use crate::reservation::request::FieldError;

/// An error as seen by API clients.
#[derive(Debug)]
pub enum ApiError {
    /// One or more request fields are invalid (400).
    Invalid(Vec<FieldError>),
    /// The slot cannot take the party (409).
    Unavailable {
        /// Why the slot cannot take the party.
        reason: UnavailableReason,
        /// Seats still free across the seating.
        remaining_capacity: u32,
    },
    /// The admin token is missing or wrong (401).
    Unauthorized,
    /// Anything else (500); details are only logged.
    Internal,
}

impl ApiError {
    /// Creates a 400 for a single field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid(vec![FieldError::new(field, message)])
    }

    /// Creates a 500.
    #[must_use]
    pub const fn internal() -> Self {
        Self::Internal
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            return Self::Invalid(err.field_errors());
        }
        match err {
            Error::Unavailable {
                reason,
                remaining_capacity,
                ..
            } => Self::Unavailable {
                reason,
                remaining_capacity,
            },
            other => {
                log::error!("Request failed: {other}");
                Self::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::field("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::field("query", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Self::Unavailable {
                reason,
                remaining_capacity,
            } => (
                StatusCode::CONFLICT,
                Json(json!({
                    "reason": reason,
                    "remaining_capacity": remaining_capacity,
                })),
            )
                .into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthorized" })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response(),
        }
    }
}
