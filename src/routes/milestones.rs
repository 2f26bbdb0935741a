use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::operations::{count_words, Milestone};
use crate::response::{AppError, SuccessResponse};
use crate::services::milestones::{self, parse_input};
use crate::services::progress::{milestone_overview, MilestonePlan};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_milestones).post(create_milestone))
        .route(
            "/:id",
            get(get_milestone)
                .put(update_milestone)
                .delete(delete_milestone),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    target_date: String,
    #[serde(default)]
    target_words: i64,
}

async fn plan_for(
    state: &AppState,
    milestone: Milestone,
) -> Result<MilestonePlan, AppError> {
    let total_words = count_words(state.db().pool()).await?;
    let today = chrono::Local::now().date_naive();
    Ok(MilestonePlan::new(milestone, total_words, today))
}

async fn list_milestones(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let overview = milestone_overview(state.db(), today).await?;
    Ok(SuccessResponse::new(overview))
}

async fn get_milestone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let milestone = milestones::get_milestone(state.db(), id).await?;
    Ok(SuccessResponse::new(plan_for(&state, milestone).await?))
}

async fn create_milestone(
    State(state): State<AppState>,
    payload: Result<Json<MilestoneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let input = parse_input(&payload.name, &payload.target_date, payload.target_words)?;
    let milestone = milestones::create_milestone(state.db(), input).await?;
    Ok((
        StatusCode::CREATED,
        SuccessResponse::new(plan_for(&state, milestone).await?),
    ))
}

async fn update_milestone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<MilestoneRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let input = parse_input(&payload.name, &payload.target_date, payload.target_words)?;
    let milestone = milestones::edit_milestone(state.db(), id, input).await?;
    Ok(SuccessResponse::new(plan_for(&state, milestone).await?))
}

async fn delete_milestone(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = milestones::remove_milestone(state.db(), id).await?;
    Ok(SuccessResponse::new(deleted))
}
