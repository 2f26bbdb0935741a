use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: i64,
    pub taken_at: NaiveDateTime,
    pub score: i64,
    pub total_questions: i64,
    pub difficulty_level: Option<String>,
    pub avg_response_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizResult {
    pub taken_at: NaiveDateTime,
    pub score: i64,
    pub total_questions: i64,
    pub difficulty_level: Option<String>,
    pub avg_response_time: Option<f64>,
}

pub async fn insert_quiz_result<'e, E>(executor: E, result: &NewQuizResult) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let done = sqlx::query(
        r#"
        INSERT INTO "quiz_history" ("takenAt", "score", "totalQuestions", "difficultyLevel", "avgResponseTime")
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(result.taken_at)
    .bind(result.score)
    .bind(result.total_questions)
    .bind(&result.difficulty_level)
    .bind(result.avg_response_time)
    .execute(executor)
    .await?;

    Ok(done.last_insert_rowid())
}

/// Newest first.
pub async fn recent_quiz_results<'e, E>(executor: E, limit: i64) -> Result<Vec<QuizResult>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        r#"
        SELECT "id", "takenAt", "score", "totalQuestions", "difficultyLevel", "avgResponseTime"
        FROM "quiz_history"
        ORDER BY "takenAt" DESC, "id" DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;

    rows.iter().map(map_quiz_row).collect()
}

fn map_quiz_row(row: &SqliteRow) -> Result<QuizResult, sqlx::Error> {
    Ok(QuizResult {
        id: row.try_get("id")?,
        taken_at: row.try_get("takenAt")?,
        score: row.try_get("score")?,
        total_questions: row.try_get("totalQuestions")?,
        difficulty_level: row.try_get("difficultyLevel")?,
        avg_response_time: row.try_get("avgResponseTime")?,
    })
}
