use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use crate::engine::VocabularyItem;

const WORD_COLUMNS: &str = r#"
    "id", "word", "definition", "synonyms", "antonyms", "exampleSentence",
    "dateAdded", "timesReviewed", "timesCorrect", "lastReviewed", "masteryLevel",
    "difficultyScore", "streak", "lastResponseTime", "reviewInterval", "nextReviewDate"
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSort {
    #[default]
    DateDesc,
    DateAsc,
    Alpha,
    Mastery,
}

impl WordSort {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "date_asc" => Self::DateAsc,
            "alpha" => Self::Alpha,
            "mastery" => Self::Mastery,
            _ => Self::DateDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::Alpha => "alpha",
            Self::Mastery => "mastery",
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            Self::DateDesc => r#""dateAdded" DESC, "id" DESC"#,
            Self::DateAsc => r#""dateAdded" ASC, "id" ASC"#,
            Self::Alpha => r#""word" ASC"#,
            Self::Mastery => r#""masteryLevel" DESC, "id" ASC"#,
        }
    }
}

/// User-editable part of a word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordContent {
    pub word: String,
    pub definition: String,
    pub synonyms: String,
    pub antonyms: String,
    pub example_sentence: String,
}

impl WordContent {
    /// Trims every field.
    pub fn normalized(self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            definition: self.definition.trim().to_string(),
            synonyms: self.synonyms.trim().to_string(),
            antonyms: self.antonyms.trim().to_string(),
            example_sentence: self.example_sentence.trim().to_string(),
        }
    }
}

pub async fn list_words<'e, E>(executor: E, sort: WordSort) -> Result<Vec<VocabularyItem>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"SELECT {WORD_COLUMNS} FROM "vocabulary_words" ORDER BY {}"#,
        sort.order_clause()
    );
    let rows = sqlx::query(&sql).fetch_all(executor).await?;
    rows.iter().map(map_word_row).collect()
}

/// Every word in insertion order; the pool the quiz engine ranks.
pub async fn list_all_words<'e, E>(executor: E) -> Result<Vec<VocabularyItem>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(r#"SELECT {WORD_COLUMNS} FROM "vocabulary_words" ORDER BY "id" ASC"#);
    let rows = sqlx::query(&sql).fetch_all(executor).await?;
    rows.iter().map(map_word_row).collect()
}

pub async fn get_word<'e, E>(executor: E, id: i64) -> Result<Option<VocabularyItem>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(r#"SELECT {WORD_COLUMNS} FROM "vocabulary_words" WHERE "id" = ? LIMIT 1"#);
    let row = sqlx::query(&sql).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(map_word_row).transpose()
}

pub async fn find_word_by_spelling<'e, E>(
    executor: E,
    word: &str,
) -> Result<Option<VocabularyItem>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(r#"SELECT {WORD_COLUMNS} FROM "vocabulary_words" WHERE "word" = ? LIMIT 1"#);
    let row = sqlx::query(&sql).bind(word).fetch_optional(executor).await?;
    row.as_ref().map(map_word_row).transpose()
}

/// Inserts a new word due for review the day after `date_added`. Returns its id.
pub async fn insert_word<'e, E>(
    executor: E,
    content: &WordContent,
    date_added: NaiveDate,
) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO "vocabulary_words"
            ("word", "definition", "synonyms", "antonyms", "exampleSentence", "dateAdded", "nextReviewDate")
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&content.word)
    .bind(&content.definition)
    .bind(&content.synonyms)
    .bind(&content.antonyms)
    .bind(&content.example_sentence)
    .bind(date_added)
    .bind(date_added.succ_opt())
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_word_content<'e, E>(
    executor: E,
    id: i64,
    content: &WordContent,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE "vocabulary_words"
        SET "word" = ?, "definition" = ?, "synonyms" = ?, "antonyms" = ?, "exampleSentence" = ?
        WHERE "id" = ?
        "#,
    )
    .bind(&content.word)
    .bind(&content.definition)
    .bind(&content.synonyms)
    .bind(&content.antonyms)
    .bind(&content.example_sentence)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Writes back the review statistics and schedule of `item`.
pub async fn save_word_progress<'e, E>(executor: E, item: &VocabularyItem) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE "vocabulary_words"
        SET "timesReviewed" = ?,
            "timesCorrect" = ?,
            "lastReviewed" = ?,
            "masteryLevel" = ?,
            "difficultyScore" = ?,
            "streak" = ?,
            "lastResponseTime" = ?,
            "reviewInterval" = ?,
            "nextReviewDate" = ?
        WHERE "id" = ?
        "#,
    )
    .bind(item.times_reviewed)
    .bind(item.times_correct)
    .bind(item.last_reviewed)
    .bind(item.mastery_level)
    .bind(item.difficulty_score)
    .bind(item.streak)
    .bind(item.last_response_time)
    .bind(item.review_interval)
    .bind(item.next_review_date)
    .bind(item.id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_word<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(r#"DELETE FROM "vocabulary_words" WHERE "id" = ?"#)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_words<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "vocabulary_words""#)
        .fetch_one(executor)
        .await
}

pub async fn count_words_added_on<'e, E>(executor: E, date: NaiveDate) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "vocabulary_words" WHERE "dateAdded" = ?"#)
        .bind(date)
        .fetch_one(executor)
        .await
}

fn map_word_row(row: &SqliteRow) -> Result<VocabularyItem, sqlx::Error> {
    Ok(VocabularyItem {
        id: row.try_get("id")?,
        word: row.try_get("word")?,
        definition: row.try_get("definition")?,
        synonyms: row.try_get("synonyms")?,
        antonyms: row.try_get("antonyms")?,
        example_sentence: row.try_get("exampleSentence")?,
        date_added: row.try_get("dateAdded")?,
        times_reviewed: row.try_get("timesReviewed")?,
        times_correct: row.try_get("timesCorrect")?,
        last_reviewed: row.try_get("lastReviewed")?,
        mastery_level: row.try_get("masteryLevel")?,
        difficulty_score: row.try_get("difficultyScore")?,
        streak: row.try_get("streak")?,
        last_response_time: row.try_get("lastResponseTime")?,
        review_interval: row.try_get("reviewInterval")?,
        next_review_date: row.try_get("nextReviewDate")?,
    })
}
