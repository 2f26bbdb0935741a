use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::engine::{Achievement, DifficultyTier};
use crate::response::{AppError, SuccessResponse};
use crate::services::quiz::{self, QuizCompletion, DEFAULT_RESPONSE_TIME_SECS};
use crate::services::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(start_quiz))
        .route("/check", post(check_answer))
        .route("/complete", post(complete_quiz))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionView {
    id: i64,
    word: String,
    mastery_level: i64,
    streak: i64,
}

#[derive(Serialize)]
struct OptionView {
    id: i64,
    definition: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizResponse {
    question: QuestionView,
    options: Vec<OptionView>,
    difficulty: DifficultyTier,
    level: i64,
    experience_points: i64,
    current_streak: i64,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerRequest {
    word_id: i64,
    answer_id: i64,
    response_time: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerResponse {
    correct: bool,
    message: String,
    mastery_level: i64,
    correct_definition: String,
    xp_gained: i64,
    user_level: i64,
    user_xp: i64,
    leveled_up: bool,
    streak: i64,
    achievements: Vec<Achievement>,
    confidence: f64,
    difficulty: DifficultyTier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompleteQuizRequest {
    score: Option<i64>,
    total: Option<i64>,
    difficulty_level: Option<String>,
    avg_response_time: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteQuizResponse {
    recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

async fn start_quiz(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let pool = quiz::prepare_quiz(state.db(), today).await?;
    let selection = pool
        .select_question(&mut rand::rng())
        .map_err(ServiceError::from)?;

    let profile = &pool.profile;
    Ok(SuccessResponse::new(QuizResponse {
        question: QuestionView {
            id: selection.question.id,
            word: selection.question.word.clone(),
            mastery_level: selection.question.mastery_level,
            streak: selection.question.streak,
        },
        options: selection
            .options
            .into_iter()
            .map(|item| OptionView {
                id: item.id,
                definition: item.definition,
            })
            .collect(),
        difficulty: selection.tier,
        level: profile.level,
        experience_points: profile.experience_points,
        current_streak: profile.current_streak,
        confidence: profile.confidence_score,
    }))
}

async fn check_answer(
    State(state): State<AppState>,
    payload: Result<Json<CheckAnswerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let response_time = payload.response_time.unwrap_or(DEFAULT_RESPONSE_TIME_SECS);
    let now = chrono::Local::now().naive_local();

    let report = quiz::check_answer(
        state.db(),
        payload.word_id,
        payload.answer_id,
        response_time,
        now,
    )
    .await?;

    let message = quiz::feedback_message(&report, response_time);
    let difficulty = report.tier();
    Ok(SuccessResponse::new(CheckAnswerResponse {
        correct: report.outcome.is_correct,
        message,
        mastery_level: report.word.mastery_level,
        correct_definition: report.word.definition,
        xp_gained: report.outcome.xp_gained,
        user_level: report.profile.level,
        user_xp: report.profile.experience_points,
        leveled_up: report.outcome.leveled_up,
        streak: report.word.streak,
        achievements: report.outcome.achievements,
        confidence: report.profile.confidence_score,
        difficulty,
    }))
}

async fn complete_quiz(
    State(state): State<AppState>,
    payload: Result<Json<CompleteQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    // a quiz closed without a score leaves the history untouched
    let (Some(score), Some(total)) = (payload.score, payload.total) else {
        return Ok((
            StatusCode::OK,
            SuccessResponse::new(CompleteQuizResponse {
                recorded: false,
                id: None,
            }),
        ));
    };

    let difficulty_level = match payload.difficulty_level.as_deref() {
        None => None,
        Some(raw) => Some(DifficultyTier::parse(raw).ok_or_else(|| {
            AppError::validation(format!("Unknown difficulty level: {raw}"))
        })?),
    };

    let completion = QuizCompletion {
        score,
        total_questions: total,
        difficulty_level,
        avg_response_time: payload.avg_response_time,
    };
    let now = chrono::Local::now().naive_local();
    let id = quiz::complete_quiz(state.db(), completion, now).await?;

    Ok((
        StatusCode::CREATED,
        SuccessResponse::new(CompleteQuizResponse {
            recorded: true,
            id: Some(id),
        }),
    ))
}
