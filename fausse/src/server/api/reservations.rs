//! Reservation routes.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::availability::{Availability, AvailabilityChecker};
use crate::error::UnavailableReason;
use crate::operations::{PlanExecutor, ReserveOptions, ReservePlan};
use crate::party::PartySize;
use crate::reservation::request::{
    FieldError, PartySizeInput, ReservationRequest, ValidationErrors,
};
use crate::reservation::Reservation;
use crate::slot::{parse_date, parse_time, Slot, DATE_FORMAT, TIME_FORMAT};

use crate::server::error::ApiError;
use crate::server::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reservations", post(create))
        .route("/api/reservations/availability", get(availability))
}

/// A stored reservation as returned to clients.
#[derive(Debug, Serialize)]
pub(crate) struct ReservationBody {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    party_size: u32,
    date: String,
    time: String,
    table_number: Option<u32>,
    status: &'static str,
    created_at: String,
}

impl From<&Reservation> for ReservationBody {
    fn from(reservation: &Reservation) -> Self {
        let slot = reservation.slot();
        Self {
            id: reservation.id().value(),
            name: reservation.name().to_string(),
            email: reservation.email().to_string(),
            phone: reservation.phone().map(str::to_string),
            party_size: reservation.party_size().value(),
            date: slot.date().format(DATE_FORMAT).to_string(),
            time: slot.time().format(TIME_FORMAT).to_string(),
            table_number: reservation.table(),
            status: reservation.status().as_str(),
            created_at: reservation.created_at().to_rfc3339(),
        }
    }
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationBody>), ApiError> {
    let Json(request) = payload?;

    let result = state
        .with_database(move |db, policy| {
            let plan = ReservePlan::new(ReserveOptions::now(request), policy)
                .build_plan(db.connection())?;
            let checker = AvailabilityChecker::new(policy.clone());
            PlanExecutor::new(db, &checker).execute(&plan)
        })
        .await?;

    let reservation = result.reservation.as_ref().ok_or_else(ApiError::internal)?;
    Ok((StatusCode::CREATED, Json(ReservationBody::from(reservation))))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityQuery {
    date: Option<String>,
    time: Option<String>,
    party_size: Option<String>,
}

impl AvailabilityQuery {
    fn parse(self) -> Result<(Slot, PartySize), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let date = match self.date.as_deref().map(parse_date) {
            Some(Some(date)) => Some(date),
            Some(None) => {
                errors.push(FieldError::new("date", "date must be YYYY-MM-DD"));
                None
            }
            None => {
                errors.push(FieldError::new("date", "date is required"));
                None
            }
        };
        let time = match self.time.as_deref().map(parse_time) {
            Some(Some(time)) => Some(time),
            Some(None) => {
                errors.push(FieldError::new("time", "time must be HH:MM"));
                None
            }
            None => {
                errors.push(FieldError::new("time", "time is required"));
                None
            }
        };
        let party = match self.party_size {
            Some(raw) => PartySizeInput::Text(raw)
                .resolve()
                .map_err(|e| errors.push(e))
                .ok(),
            None => {
                errors.push(FieldError::new("party_size", "party size is required"));
                None
            }
        };

        match (date, time, party) {
            (Some(date), Some(time), Some(party)) => Ok((Slot::new(date, time), party)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize)]
struct AvailabilityBody {
    available: bool,
    remaining_capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<UnavailableReason>,
}

impl From<Availability> for AvailabilityBody {
    fn from(availability: Availability) -> Self {
        let reason = match availability {
            Availability::Available { .. } => None,
            Availability::Unavailable { reason, .. } => Some(reason),
        };
        Self {
            available: availability.is_available(),
            remaining_capacity: availability.remaining_capacity(),
            reason,
        }
    }
}

async fn availability(
    State(state): State<AppState>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityBody>, ApiError> {
    let Query(query) = query?;
    let (slot, party) = query.parse().map_err(|e| ApiError::Invalid(e.into_iter().collect()))?;

    let availability = state
        .with_database(move |db, policy| {
            AvailabilityChecker::new(policy.clone()).check(db.connection(), slot, party)
        })
        .await?;

    Ok(Json(availability.into()))
}
