//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::config::{BookingPolicy, Config};
use crate::database::{Database, DatabaseConfig};
use crate::error::Result;

use super::error::ApiError;

/// Configuration shared by all handlers.
///
/// Cloning is cheap. Handlers never share a connection: each request opens
/// its own [`Database`] on a blocking thread.
#[derive(Debug, Clone)]
pub struct AppState {
    db_config: Arc<DatabaseConfig>,
    policy: Arc<BookingPolicy>,
    admin_token: Option<Arc<str>>,
    allowed_origins: Arc<[String]>,
}

impl AppState {
    /// Builds state from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking policy cannot be derived from `config`.
    pub fn new(config: &Config, db_config: DatabaseConfig) -> Result<Self> {
        Ok(Self {
            db_config: Arc::new(db_config),
            policy: Arc::new(BookingPolicy::from_config(config)?),
            admin_token: config.admin_token().map(Arc::from),
            allowed_origins: Arc::from(config.allowed_origins()),
        })
    }

    /// Builds state from parts, without reading any configuration.
    #[must_use]
    pub fn from_parts(
        db_config: DatabaseConfig,
        policy: BookingPolicy,
        admin_token: Option<&str>,
    ) -> Self {
        Self {
            db_config: Arc::new(db_config),
            policy: Arc::new(policy),
            admin_token: admin_token.map(Arc::from),
            allowed_origins: Arc::from(Vec::new()),
        }
    }

    /// Restricts CORS to `origins`; an empty list allows any origin.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = Arc::from(origins);
        self
    }

    /// Returns the booking policy.
    #[must_use]
    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Returns the admin token, if admin routes are enabled.
    #[must_use]
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Returns the origins allowed by CORS.
    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Runs `f` on a fresh connection on the blocking thread pool.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> std::result::Result<T, ApiError>
    where
        F: FnOnce(&mut Database, &BookingPolicy) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_config = DatabaseConfig::clone(&self.db_config);
        let policy = Arc::clone(&self.policy);

        tokio::task::spawn_blocking(move || {
            let mut db = Database::open(db_config)?;
            f(&mut db, &policy)
        })
        .await
        .map_err(|e| {
            log::error!("Blocking database task failed: {e}");
            ApiError::internal()
        })?
        .map_err(ApiError::from)
    }
}
