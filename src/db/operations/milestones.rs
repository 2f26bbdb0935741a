use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: i64,
    pub name: String,
    pub target_date: NaiveDate,
    pub target_words: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneInput {
    pub name: String,
    pub target_date: NaiveDate,
    pub target_words: i64,
}

/// Soonest target first.
pub async fn list_milestones<'e, E>(executor: E) -> Result<Vec<Milestone>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        r#"SELECT "id", "name", "targetDate", "targetWords" FROM "milestones" ORDER BY "targetDate" ASC, "id" ASC"#,
    )
    .fetch_all(executor)
    .await?;
    rows.iter().map(map_milestone_row).collect()
}

pub async fn get_milestone<'e, E>(executor: E, id: i64) -> Result<Option<Milestone>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        r#"SELECT "id", "name", "targetDate", "targetWords" FROM "milestones" WHERE "id" = ? LIMIT 1"#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    row.as_ref().map(map_milestone_row).transpose()
}

pub async fn insert_milestone<'e, E>(executor: E, input: &MilestoneInput) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"INSERT INTO "milestones" ("name", "targetDate", "targetWords") VALUES (?, ?, ?)"#,
    )
    .bind(&input.name)
    .bind(input.target_date)
    .bind(input.target_words)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_milestone<'e, E>(
    executor: E,
    id: i64,
    input: &MilestoneInput,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"UPDATE "milestones" SET "name" = ?, "targetDate" = ?, "targetWords" = ? WHERE "id" = ?"#,
    )
    .bind(&input.name)
    .bind(input.target_date)
    .bind(input.target_words)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_milestone<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(r#"DELETE FROM "milestones" WHERE "id" = ?"#)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_milestones<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "milestones""#)
        .fetch_one(executor)
        .await
}

fn map_milestone_row(row: &SqliteRow) -> Result<Milestone, sqlx::Error> {
    Ok(Milestone {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        target_date: row.try_get("targetDate")?,
        target_words: row.try_get("targetWords")?,
    })
}
