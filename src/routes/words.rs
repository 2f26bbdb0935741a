use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::operations::{WordContent, WordSort};
use crate::engine::VocabularyItem;
use crate::response::{AppError, SuccessResponse};
use crate::services::words::{self, HIGH_MASTERY_THRESHOLD};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words).post(create_word))
        .route("/:id", get(get_word).put(update_word).delete(delete_word))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordRequest {
    #[serde(default)]
    word: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    synonyms: String,
    #[serde(default)]
    antonyms: String,
    #[serde(default)]
    example_sentence: String,
}

impl From<WordRequest> for WordContent {
    fn from(req: WordRequest) -> Self {
        Self {
            word: req.word,
            definition: req.definition,
            synonyms: req.synonyms,
            antonyms: req.antonyms,
            example_sentence: req.example_sentence,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WordListResponse {
    sort: &'static str,
    total: usize,
    words: Vec<VocabularyItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteWordResponse {
    deleted: VocabularyItem,
    high_mastery: bool,
}

async fn list_words(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sort = query.sort.as_deref().map(WordSort::parse).unwrap_or_default();
    let words = words::list_words(state.db(), sort).await?;

    Ok(SuccessResponse::new(WordListResponse {
        sort: sort.as_str(),
        total: words.len(),
        words,
    }))
}

async fn create_word(
    State(state): State<AppState>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let today = chrono::Local::now().date_naive();
    let word = words::add_word(state.db(), payload.into(), today).await?;
    Ok((StatusCode::CREATED, SuccessResponse::new(word)))
}

async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let word = words::get_word(state.db(), id).await?;
    Ok(SuccessResponse::new(word))
}

async fn update_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<WordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let word = words::edit_word(state.db(), id, payload.into()).await?;
    Ok(SuccessResponse::new(word))
}

async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = words::remove_word(state.db(), id).await?;
    Ok(SuccessResponse::new(DeleteWordResponse {
        high_mastery: deleted.mastery_level >= HIGH_MASTERY_THRESHOLD,
        deleted,
    }))
}
