use chrono::NaiveDate;
use serde::Serialize;

use crate::db::operations::{
    count_words, count_words_added_on, list_all_words, list_milestones, recent_quiz_results,
    Milestone, QuizResult,
};
use crate::db::Database;
use crate::engine::VocabularyItem;
use crate::services::ServiceError;

pub const RECENT_QUIZ_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryBuckets {
    /// 0–25
    pub learning: usize,
    /// 26–50
    pub practicing: usize,
    /// 51–75
    pub good: usize,
    /// 76–100
    pub mastered: usize,
}

impl MasteryBuckets {
    pub fn from_words(words: &[VocabularyItem]) -> Self {
        words.iter().fold(Self::default(), |mut acc, word| {
            match word.mastery_level {
                m if m <= 25 => acc.learning += 1,
                m if m <= 50 => acc.practicing += 1,
                m if m <= 75 => acc.good += 1,
                _ => acc.mastered += 1,
            }
            acc
        })
    }
}

/// Percentage of all reviews answered correctly, 0 when nothing was reviewed.
pub fn overall_accuracy(words: &[VocabularyItem]) -> f64 {
    let reviews: i64 = words.iter().map(|w| w.times_reviewed).sum();
    let correct: i64 = words.iter().map(|w| w.times_correct).sum();
    if reviews <= 0 {
        return 0.0;
    }
    correct as f64 / reviews as f64 * 100.0
}

pub fn average_mastery(words: &[VocabularyItem]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    words.iter().map(|w| w.mastery_level as f64).sum::<f64>() / words.len() as f64
}

/// Progress against a pace of one word per day since `pace_start`, capped at 100.
pub fn pace_progress(total_words: i64, pace_start: NaiveDate, today: NaiveDate) -> f64 {
    let target_pace = (today - pace_start).num_days();
    if target_pace <= 0 {
        return 0.0;
    }
    (total_words as f64 / target_pace as f64 * 100.0).min(100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePlan {
    pub milestone: Milestone,
    pub days_until: i64,
    pub words_needed: i64,
    pub words_per_day: i64,
}

impl MilestonePlan {
    pub fn new(milestone: Milestone, total_words: i64, today: NaiveDate) -> Self {
        let days_until = (milestone.target_date - today).num_days();
        let words_needed = milestone.target_words - total_words;
        let per_day = if days_until > 0 {
            words_needed as f64 / days_until as f64
        } else {
            0.0
        };

        Self {
            milestone,
            days_until,
            words_needed: words_needed.max(0),
            words_per_day: ((per_day + 0.5) as i64).max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_words: i64,
    pub words_today: i64,
    pub progress_percentage: f64,
    pub average_mastery: f64,
    pub milestones: Vec<Milestone>,
}

pub async fn dashboard(
    db: &Database,
    pace_start: NaiveDate,
    today: NaiveDate,
) -> Result<Dashboard, ServiceError> {
    let pool = db.pool();
    let words = list_all_words(pool).await?;
    let total_words = words.len() as i64;
    let words_today = count_words_added_on(pool, today).await?;
    let milestones = list_milestones(pool).await?;

    Ok(Dashboard {
        total_words,
        words_today,
        progress_percentage: pace_progress(total_words, pace_start, today),
        average_mastery: average_mastery(&words),
        milestones,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub total_words: usize,
    pub total_reviews: i64,
    pub overall_accuracy: f64,
    pub mastery_levels: MasteryBuckets,
    pub recent_quizzes: Vec<QuizResult>,
}

pub async fn progress_report(db: &Database) -> Result<ProgressReport, ServiceError> {
    let words = list_all_words(db.pool()).await?;
    let recent_quizzes = recent_quiz_results(db.pool(), RECENT_QUIZ_LIMIT).await?;

    Ok(ProgressReport {
        total_words: words.len(),
        total_reviews: words.iter().map(|w| w.times_reviewed).sum(),
        overall_accuracy: overall_accuracy(&words),
        mastery_levels: MasteryBuckets::from_words(&words),
        recent_quizzes,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneOverview {
    pub total_words: i64,
    pub milestones: Vec<MilestonePlan>,
}

pub async fn milestone_overview(db: &Database, today: NaiveDate) -> Result<MilestoneOverview, ServiceError> {
    let total_words = count_words(db.pool()).await?;
    let milestones = list_milestones(db.pool())
        .await?
        .into_iter()
        .map(|m| MilestonePlan::new(m, total_words, today))
        .collect();

    Ok(MilestoneOverview {
        total_words,
        milestones,
    })
}
