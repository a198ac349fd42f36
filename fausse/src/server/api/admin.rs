//! Administrative seeding routes.
//!
//! Every route requires the configured token in the `X-Admin-Token`
//! header. Without a configured token the routes always answer 401.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::database::Database;
use crate::operations::seed::{
    seed_capacity_scenario, seed_demo, CapacitySummary, SeedOptions, SeedSummary,
};
use crate::slot::parse_date;

use super::reservations::ReservationBody;
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/seed", post(seed))
        .route("/api/admin/smallseed", post(small_seed))
        .route("/api/admin/seed_capacity", post(seed_capacity))
        .route("/api/admin/reservations", get(list))
        .layer(middleware::from_fn_with_state(state, require_admin))
}

async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    match (state.admin_token(), presented) {
        (Some(expected), Some(presented)) if tokens_match(expected, presented) => {
            Ok(next.run(request).await)
        }
        _ => {
            log::warn!("Rejected admin request to {}", request.uri().path());
            Err(ApiError::Unauthorized)
        }
    }
}

/// Compares SHA-256 digests of both tokens in constant time, so neither the
/// position of the first differing byte nor the token length leaks.
fn tokens_match(expected: &str, presented: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let presented = Sha256::digest(presented.as_bytes());
    expected.ct_eq(&presented).into()
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeedQuery {
    days: Option<u32>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
    step: Option<u32>,
    fully_book_demo: Option<bool>,
    wipe: Option<bool>,
}

impl SeedQuery {
    /// Applies the query on top of `base`; reservations are wiped unless
    /// `wipe=false` is given.
    fn into_options(self, base: SeedOptions) -> SeedOptions {
        SeedOptions {
            days: self.days.unwrap_or(base.days),
            start_hour: self.start_hour.unwrap_or(base.start_hour),
            end_hour: self.end_hour.unwrap_or(base.end_hour),
            step_minutes: self.step.unwrap_or(base.step_minutes),
            fully_book_demo: self.fully_book_demo.unwrap_or(base.fully_book_demo),
            wipe: self.wipe.unwrap_or(true),
            ..base
        }
    }
}

#[derive(Debug, Serialize)]
struct SeedBody {
    ok: bool,
    wiped: bool,
    #[serde(flatten)]
    summary: SeedSummary,
}

async fn run_seed(state: &AppState, options: SeedOptions) -> Result<Json<SeedBody>, ApiError> {
    let wiped = options.wipe;
    let summary = state
        .with_database(move |db, policy| seed_demo(db, policy, &options))
        .await?;
    Ok(Json(SeedBody {
        ok: true,
        wiped,
        summary,
    }))
}

async fn seed(
    State(state): State<AppState>,
    query: Result<Query<SeedQuery>, QueryRejection>,
) -> Result<Json<SeedBody>, ApiError> {
    let Query(query) = query?;
    run_seed(&state, query.into_options(SeedOptions::default())).await
}

async fn small_seed(
    State(state): State<AppState>,
    query: Result<Query<SeedQuery>, QueryRejection>,
) -> Result<Json<SeedBody>, ApiError> {
    let Query(query) = query?;
    run_seed(&state, query.into_options(SeedOptions::small())).await
}

#[derive(Debug, Deserialize)]
pub(crate) struct CapacityQuery {
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
}

async fn seed_capacity(
    State(state): State<AppState>,
    query: Result<Query<CapacityQuery>, QueryRejection>,
) -> Result<Json<CapacitySummary>, ApiError> {
    let Query(query) = query?;
    let today = Local::now().date_naive();

    let summary = state
        .with_database(move |db, policy| {
            seed_capacity_scenario(
                db,
                policy,
                today,
                query.day.unwrap_or(0),
                query.hour.unwrap_or(19),
                query.minute.unwrap_or(0),
            )
        })
        .await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    date: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ReservationBody>>, ApiError> {
    let Query(query) = query?;
    let date = match query.date.as_deref() {
        Some(raw) => Some(
            parse_date(raw).ok_or_else(|| ApiError::field("date", "date must be YYYY-MM-DD"))?,
        ),
        None => None,
    };

    let reservations = state
        .with_database(move |db, _| match date {
            Some(date) => Database::list_reservations_on(db.connection(), date),
            None => Database::list_all_reservations(db.connection()),
        })
        .await?;

    Ok(Json(reservations.iter().map(ReservationBody::from).collect()))
}
