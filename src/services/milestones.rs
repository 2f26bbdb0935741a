use chrono::NaiveDate;

use crate::db::operations::{
    self as store, delete_milestone, insert_milestone, update_milestone, Milestone, MilestoneInput,
};
use crate::db::Database;
use crate::services::ServiceError;

/// Validates raw form values: non-empty name, ISO `YYYY-MM-DD` date, positive word target.
pub fn parse_input(
    name: &str,
    target_date: &str,
    target_words: i64,
) -> Result<MilestoneInput, ServiceError> {
    let name = name.trim();
    let target_date = target_date.trim();
    if name.is_empty() || target_date.is_empty() || target_words <= 0 {
        return Err(ServiceError::validation("Please fill in all fields"));
    }

    let target_date = NaiveDate::parse_from_str(target_date, "%Y-%m-%d")
        .map_err(|_| ServiceError::validation("Invalid date format"))?;

    Ok(MilestoneInput {
        name: name.to_string(),
        target_date,
        target_words,
    })
}

pub async fn get_milestone(db: &Database, id: i64) -> Result<Milestone, ServiceError> {
    store::get_milestone(db.pool(), id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Milestone {id} not found")))
}

pub async fn create_milestone(db: &Database, input: MilestoneInput) -> Result<Milestone, ServiceError> {
    let id = insert_milestone(db.pool(), &input).await?;
    tracing::info!(milestone_id = id, name = %input.name, "milestone added");

    Ok(Milestone {
        id,
        name: input.name,
        target_date: input.target_date,
        target_words: input.target_words,
    })
}

pub async fn edit_milestone(
    db: &Database,
    id: i64,
    input: MilestoneInput,
) -> Result<Milestone, ServiceError> {
    if !update_milestone(db.pool(), id, &input).await? {
        return Err(ServiceError::not_found(format!("Milestone {id} not found")));
    }
    tracing::info!(milestone_id = id, "milestone updated");

    Ok(Milestone {
        id,
        name: input.name,
        target_date: input.target_date,
        target_words: input.target_words,
    })
}

pub async fn remove_milestone(db: &Database, id: i64) -> Result<Milestone, ServiceError> {
    let milestone = get_milestone(db, id).await?;
    delete_milestone(db.pool(), id).await?;
    tracing::info!(milestone_id = id, "milestone deleted");
    Ok(milestone)
}
