use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use crate::engine::LearnerProfile;

/// Row id of the single learner profile.
pub const PROFILE_ID: i64 = 1;

pub async fn get_profile<'e, E>(executor: E) -> Result<Option<LearnerProfile>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        r#"
        SELECT "id", "username", "level", "experiencePoints", "currentStreak", "longestStreak",
               "lastStudyDate", "currentDifficulty", "confidenceScore", "learningRate"
        FROM "learner_profile"
        WHERE "id" = ?
        "#,
    )
    .bind(PROFILE_ID)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(map_profile_row).transpose()
}

/// Creates the singleton row; a no-op when it already exists. Returns true if inserted.
pub async fn insert_profile<'e, E>(executor: E, profile: &LearnerProfile) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO "learner_profile"
            ("id", "username", "level", "experiencePoints", "currentStreak", "longestStreak",
             "lastStudyDate", "currentDifficulty", "confidenceScore", "learningRate")
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(PROFILE_ID)
    .bind(&profile.username)
    .bind(profile.level)
    .bind(profile.experience_points)
    .bind(profile.current_streak)
    .bind(profile.longest_streak)
    .bind(profile.last_study_date)
    .bind(profile.current_difficulty)
    .bind(profile.confidence_score)
    .bind(profile.learning_rate)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn save_profile<'e, E>(executor: E, profile: &LearnerProfile) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE "learner_profile"
        SET "username" = ?,
            "level" = ?,
            "experiencePoints" = ?,
            "currentStreak" = ?,
            "longestStreak" = ?,
            "lastStudyDate" = ?,
            "currentDifficulty" = ?,
            "confidenceScore" = ?,
            "learningRate" = ?
        WHERE "id" = ?
        "#,
    )
    .bind(&profile.username)
    .bind(profile.level)
    .bind(profile.experience_points)
    .bind(profile.current_streak)
    .bind(profile.longest_streak)
    .bind(profile.last_study_date)
    .bind(profile.current_difficulty)
    .bind(profile.confidence_score)
    .bind(profile.learning_rate)
    .bind(PROFILE_ID)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn map_profile_row(row: &SqliteRow) -> Result<LearnerProfile, sqlx::Error> {
    Ok(LearnerProfile {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        level: row.try_get("level")?,
        experience_points: row.try_get("experiencePoints")?,
        current_streak: row.try_get("currentStreak")?,
        longest_streak: row.try_get("longestStreak")?,
        last_study_date: row.try_get("lastStudyDate")?,
        current_difficulty: row.try_get("currentDifficulty")?,
        confidence_score: row.try_get("confidenceScore")?,
        learning_rate: row.try_get("learningRate")?,
    })
}
