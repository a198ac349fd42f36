//! Health check endpoint

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::database::get_schema_version;

use crate::server::error::ApiError;
use crate::server::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let schema_version = state
        .with_database(|db, _| get_schema_version(db.connection()))
        .await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "schema_version": schema_version,
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
