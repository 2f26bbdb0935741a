pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::db::{Database, DbInitError};
use crate::state::AppState;

/// Opens the store, applies migrations and runs the one-time data bootstrap.
pub async fn init_state(config: Config) -> Result<AppState, DbInitError> {
    let db = Database::open(&config.database_path).await?;
    let report = seed::bootstrap(&db, config.seed_default_milestones).await?;
    tracing::debug!(
        profile_created = report.profile_created,
        milestones_seeded = report.milestones_seeded,
        "bootstrap finished"
    );
    Ok(AppState::new(db, config))
}

pub fn create_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
