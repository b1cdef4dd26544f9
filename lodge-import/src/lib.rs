//! lodge-import library interface
//!
//! Exposes the import pipeline, the SQLite store and the HTTP router so the
//! binary and the integration tests share one definition.

pub mod api;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod store;

pub use crate::db::SqliteStore;
pub use crate::error::{ApiError, ApiResult};
pub use crate::import::{ImportError, ImportOutcome, PropertyImporter};
pub use crate::models::ImportResult;
pub use crate::store::PropertyStore;

use axum::Router;
use chrono::{DateTime, Utc};
use lodge_common::events::EventBus;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    /// Import pipeline writing to `db` and publishing on `event_bus`
    pub importer: Arc<PropertyImporter<SqliteStore>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last fatal import error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, event_bus: EventBus, max_listed_warnings: usize) -> Self {
        let importer = PropertyImporter::new(SqliteStore::new(db.clone()))
            .with_event_bus(event_bus.clone())
            .with_max_listed_warnings(max_listed_warnings);

        Self {
            db,
            event_bus,
            importer: Arc::new(importer),
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::import_routes())
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
