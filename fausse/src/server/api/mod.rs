//! Route tables for the JSON API.

mod admin;
mod health;
mod newsletter;
mod reservations;

use axum::Router;

use super::state::AppState;

pub use admin::ADMIN_TOKEN_HEADER;

/// Builds every API route (without shared layers).
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(newsletter::router())
        .merge(admin::router(state.clone()))
}
