use chrono::NaiveDate;

use crate::db::operations::{
    self as store, delete_word, find_word_by_spelling, insert_word, update_word_content,
    WordContent, WordSort,
};
use crate::db::Database;
use crate::engine::VocabularyItem;
use crate::services::ServiceError;

/// Words at or above this mastery are flagged when deleted.
pub const HIGH_MASTERY_THRESHOLD: i64 = 80;

fn validate(content: WordContent) -> Result<WordContent, ServiceError> {
    let content = content.normalized();
    if content.word.is_empty() || content.definition.is_empty() {
        return Err(ServiceError::validation(
            "Please provide both word and definition",
        ));
    }
    Ok(content)
}

pub async fn list_words(db: &Database, sort: WordSort) -> Result<Vec<VocabularyItem>, ServiceError> {
    Ok(store::list_words(db.pool(), sort).await?)
}

pub async fn get_word(db: &Database, id: i64) -> Result<VocabularyItem, ServiceError> {
    store::get_word(db.pool(), id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Word {id} not found")))
}

pub async fn add_word(
    db: &Database,
    content: WordContent,
    today: NaiveDate,
) -> Result<VocabularyItem, ServiceError> {
    let content = validate(content)?;

    let mut tx = db.begin_write().await?;
    if find_word_by_spelling(&mut *tx, &content.word).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "The word \"{}\" already exists",
            content.word
        )));
    }

    let id = insert_word(&mut *tx, &content, today).await?;
    let word = store::get_word(&mut *tx, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Word {id} not found")))?;
    tx.commit().await?;

    tracing::info!(word_id = id, word = %word.word, "word added");
    Ok(word)
}

/// Replaces the editable content of a word; review statistics are untouched.
pub async fn edit_word(
    db: &Database,
    id: i64,
    content: WordContent,
) -> Result<VocabularyItem, ServiceError> {
    let content = validate(content)?;

    let mut tx = db.begin_write().await?;
    if let Some(existing) = find_word_by_spelling(&mut *tx, &content.word).await? {
        if existing.id != id {
            return Err(ServiceError::Conflict(format!(
                "The word \"{}\" already exists",
                content.word
            )));
        }
    }

    if !update_word_content(&mut *tx, id, &content).await? {
        return Err(ServiceError::not_found(format!("Word {id} not found")));
    }
    let word = store::get_word(&mut *tx, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Word {id} not found")))?;
    tx.commit().await?;

    tracing::info!(word_id = id, "word updated");
    Ok(word)
}

/// Deletes a word and returns the record as it was.
pub async fn remove_word(db: &Database, id: i64) -> Result<VocabularyItem, ServiceError> {
    let mut tx = db.begin_write().await?;
    let word = store::get_word(&mut *tx, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Word {id} not found")))?;
    delete_word(&mut *tx, id).await?;
    tx.commit().await?;

    if word.mastery_level >= HIGH_MASTERY_THRESHOLD {
        tracing::warn!(word_id = id, mastery = word.mastery_level, "deleted a well-mastered word");
    } else {
        tracing::info!(word_id = id, "word deleted");
    }
    Ok(word)
}
