//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    access::{AccessService, PgAccessService},
    bookings::{BookingsService, PgBookingsService},
    catalog::{CatalogService, PgCatalogService},
    database::{self, Db},
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database connection could not be established.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Service handles shared by every consumer of the application layer.
#[derive(Clone)]
pub struct AppContext {
    /// Booking lifecycle and query operations.
    pub bookings: Arc<dyn BookingsService>,
    /// Authorization queries and grant administration.
    pub access: Arc<dyn AccessService>,
    /// Operator, hotel and room administration.
    pub catalog: Arc<dyn CatalogService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            bookings: Arc::new(PgBookingsService::new(db.clone())),
            access: Arc::new(PgAccessService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db)),
        })
    }
}
