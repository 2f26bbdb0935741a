use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::engine::{experience_for_level, DifficultyTier, LearnerProfile};
use crate::response::{AppError, SuccessResponse};
use crate::services::require_profile;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    #[serde(flatten)]
    profile: LearnerProfile,
    difficulty_tier: DifficultyTier,
    next_level_xp: i64,
}

pub async fn get_profile(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let profile = require_profile(state.db().pool()).await?;

    Ok(SuccessResponse::new(ProfileResponse {
        difficulty_tier: DifficultyTier::from_confidence(profile.confidence_score),
        next_level_xp: experience_for_level(profile.level + 1),
        profile,
    }))
}
