use axum::extract::State;
use axum::response::IntoResponse;

use crate::response::{AppError, SuccessResponse};
use crate::services::progress;
use crate::state::AppState;

pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let dashboard = progress::dashboard(state.db(), state.pace_start_date(), today).await?;
    Ok(SuccessResponse::new(dashboard))
}

pub async fn progress(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = progress::progress_report(state.db()).await?;
    Ok(SuccessResponse::new(report))
}
