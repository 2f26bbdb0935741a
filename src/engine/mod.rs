//! Adaptive review engine: question selection, distractor choice and the
//! per-answer mastery / confidence / scheduling updates.
//!
//! Everything here is pure over the records handed in. Randomness comes from
//! the caller's `Rng` so selection is reproducible under a fixed seed.

pub mod answer;
pub mod profile;
pub mod scoring;
pub mod selection;
pub mod types;

use thiserror::Error;

pub use answer::record_answer;
pub use profile::{experience_for_level, level_for_experience, update_confidence, update_streak_on_visit};
pub use scoring::{review_interval_for, word_difficulty};
pub use selection::select_question;
pub use types::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("need at least {required} words to start a quiz, found {available}")]
    InsufficientData { available: usize, required: usize },
}
