use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::db::operations::{
    get_word, insert_quiz_result, list_all_words, save_profile, save_word_progress, NewQuizResult,
};
use crate::db::Database;
use crate::engine::{
    self, AnswerOutcome, DifficultyTier, EngineError, LearnerProfile, QuestionSelection,
    VocabularyItem,
};
use crate::services::{require_profile, ServiceError};

pub const DEFAULT_RESPONSE_TIME_SECS: f64 = 5.0;

/// Snapshot the engine selects from, taken after the daily streak is recorded.
#[derive(Debug, Clone)]
pub struct QuizPool {
    pub profile: LearnerProfile,
    pub words: Vec<VocabularyItem>,
    pub today: NaiveDate,
}

impl QuizPool {
    pub fn select_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<QuestionSelection, EngineError> {
        engine::select_question(&self.words, &self.profile, self.today, rng)
    }
}

/// Records today's visit on the learner's streak and loads the word pool.
///
/// The streak is committed even when the pool turns out too small to quiz.
pub async fn prepare_quiz(db: &Database, today: NaiveDate) -> Result<QuizPool, ServiceError> {
    let mut tx = db.begin_write().await?;

    let mut profile = require_profile(&mut *tx).await?;
    if engine::update_streak_on_visit(&mut profile, today) {
        save_profile(&mut *tx, &profile).await?;
        tracing::info!(
            current_streak = profile.current_streak,
            longest_streak = profile.longest_streak,
            "study streak updated"
        );
    }

    let words = list_all_words(&mut *tx).await?;
    tx.commit().await?;

    Ok(QuizPool {
        profile,
        words,
        today,
    })
}

#[derive(Debug, Clone)]
pub struct AnswerReport {
    pub word: VocabularyItem,
    pub profile: LearnerProfile,
    pub outcome: AnswerOutcome,
}

impl AnswerReport {
    pub fn tier(&self) -> DifficultyTier {
        DifficultyTier::from_confidence(self.profile.confidence_score)
    }
}

/// Grades an answer and persists the word and profile updates atomically.
pub async fn check_answer(
    db: &Database,
    word_id: i64,
    answer_id: i64,
    response_time_secs: f64,
    now: NaiveDateTime,
) -> Result<AnswerReport, ServiceError> {
    if !response_time_secs.is_finite() || response_time_secs < 0.0 {
        return Err(ServiceError::validation(
            "responseTime must be a non-negative number of seconds",
        ));
    }

    let mut tx = db.begin_write().await?;

    let mut word = get_word(&mut *tx, word_id)
        .await?
        .ok_or_else(|| ServiceError::not_found(format!("Word {word_id} not found")))?;
    let mut profile = require_profile(&mut *tx).await?;

    let is_correct = word_id == answer_id;
    let outcome = engine::record_answer(&mut word, &mut profile, is_correct, response_time_secs, now);

    save_word_progress(&mut *tx, &word).await?;
    save_profile(&mut *tx, &profile).await?;
    tx.commit().await?;

    tracing::info!(
        word_id,
        is_correct,
        xp_gained = outcome.xp_gained,
        level = profile.level,
        "quiz answer graded"
    );

    Ok(AnswerReport {
        word,
        profile,
        outcome,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizCompletion {
    pub score: i64,
    pub total_questions: i64,
    pub difficulty_level: Option<DifficultyTier>,
    pub avg_response_time: Option<f64>,
}

/// Appends a finished quiz to the history log. Returns the new entry id.
pub async fn complete_quiz(
    db: &Database,
    completion: QuizCompletion,
    now: NaiveDateTime,
) -> Result<i64, ServiceError> {
    if completion.total_questions < 0 || completion.score < 0 {
        return Err(ServiceError::validation("score and total must not be negative"));
    }
    if completion.score > completion.total_questions {
        return Err(ServiceError::validation("score cannot exceed total"));
    }
    if let Some(avg) = completion.avg_response_time {
        if !avg.is_finite() || avg < 0.0 {
            return Err(ServiceError::validation(
                "avgResponseTime must be a non-negative number of seconds",
            ));
        }
    }

    let id = insert_quiz_result(
        db.pool(),
        &NewQuizResult {
            taken_at: now,
            score: completion.score,
            total_questions: completion.total_questions,
            difficulty_level: completion.difficulty_level.map(|t| t.as_str().to_string()),
            avg_response_time: completion.avg_response_time,
        },
    )
    .await?;

    tracing::info!(
        score = completion.score,
        total = completion.total_questions,
        "quiz completed"
    );

    Ok(id)
}

/// Feedback line shown after an answer.
pub fn feedback_message(report: &AnswerReport, response_time_secs: f64) -> String {
    if !report.outcome.is_correct {
        return format!("Not quite. The answer was: {}", report.word.definition);
    }

    let mut message = if response_time_secs < 3.0 {
        "Lightning fast! Excellent!".to_string()
    } else if response_time_secs < 5.0 {
        "Correct! Great job!".to_string()
    } else {
        "Correct! Well done!".to_string()
    };

    if report.word.streak >= 3 {
        message.push_str(&format!(" ({} streak!)", report.word.streak));
    }
    message
}
