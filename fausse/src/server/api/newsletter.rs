//! Newsletter signup route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::newsletter::normalize_email;
use crate::reservation::request::TextInput;

use crate::server::error::ApiError;
use crate::server::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/api/newsletter", post(subscribe))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupBody {
    #[serde(default)]
    email: TextInput,
}

#[derive(Debug, Serialize)]
struct SubscriberBody {
    email: String,
    created_at: String,
    already_subscribed: bool,
}

async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SignupBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriberBody>), ApiError> {
    let Json(body) = payload?;
    let email = body
        .email
        .text("email")
        .and_then(normalize_email)
        .map_err(|e| ApiError::Invalid(vec![e]))?;

    let (subscriber, created) = state
        .with_database(move |db, _| {
            db.execute_in_transaction(|conn| Database::subscribe(conn, &email, Utc::now()))
        })
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SubscriberBody {
            email: subscriber.email().to_string(),
            created_at: subscriber.created_at().to_rfc3339(),
            already_subscribed: !created,
        }),
    ))
}
