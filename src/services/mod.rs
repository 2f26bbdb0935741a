pub mod milestones;
pub mod progress;
pub mod quiz;
pub mod words;

use thiserror::Error;

use crate::db::operations::get_profile;
use crate::engine::{EngineError, LearnerProfile};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    InsufficientData(#[from] EngineError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// The singleton profile. Bootstrap creates it, so absence is reported, not repaired.
pub async fn require_profile<'e, E>(executor: E) -> Result<LearnerProfile, ServiceError>
where
    E: sqlx::SqliteExecutor<'e>,
{
    get_profile(executor)
        .await?
        .ok_or_else(|| ServiceError::not_found("Learner profile not found"))
}
