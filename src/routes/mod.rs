mod health;
mod milestones;
mod profile;
mod progress;
mod quiz;
mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/api/dashboard", get(progress::dashboard).fallback(fallback_handler))
        .route("/api/progress", get(progress::progress).fallback(fallback_handler))
        .route("/api/profile", get(profile::get_profile).fallback(fallback_handler));

    app = app.nest("/api/words", words::router());
    app = app.nest("/api/quiz", quiz::router());
    app = app.nest("/api/milestones", milestones::router());

    for path in ["/health", "/api/health"] {
        app = app.nest(path, health::router());
    }

    app.fallback(fallback_handler).with_state(state)
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Endpoint not found").into_response()
}
