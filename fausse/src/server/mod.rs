//! HTTP API.
//!
//! The API is an [`axum`] router over [`AppState`]. Every handler runs its
//! database work on the blocking pool with a connection of its own, so
//! several server processes may share one database file.
//!
//! # Examples
//!
//! ```no_run
//! use fausse::server::{build_app, serve, AppState};
//! use fausse::{ConfigBuilder, DatabaseConfig};
//!
//! # async fn run() -> fausse::Result<()> {
//! let config = ConfigBuilder::new().build()?;
//! let state = AppState::new(&config, DatabaseConfig::new("/tmp/fausse.db"))?;
//! serve(state, "127.0.0.1:8080".parse().unwrap()).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod error;
mod state;

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use api::ADMIN_TOKEN_HEADER;
pub use error::ApiError;
pub use state::AppState;

use crate::error::Result;

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} {}ms",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(ADMIN_TOKEN_HEADER)])
}

/// Builds the complete application: routes, CORS and request logging.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(state.allowed_origins());

    api::router(&state)
        .layer(cors)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Serves the API on `addr` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("Received Ctrl+C, shutting down"),
        () = terminate => log::info!("Received terminate signal, shutting down"),
    }
}
