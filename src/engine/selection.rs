use chrono::NaiveDate;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::scoring::review_priority;
use super::types::{DifficultyTier, LearnerProfile, QuestionSelection, VocabularyItem};
use super::EngineError;

pub const MIN_POOL_SIZE: usize = 4;
pub const CANDIDATE_POOL_SIZE: usize = 20;
const TOP_PICK_PROBABILITY: f64 = 0.8;
const VARIETY_WINDOW: usize = 5;
const DISTRACTOR_COUNT: usize = 3;
const DISTRACTOR_SHORTLIST: usize = 10;

/// Items ordered by review priority, highest first. Ties keep pool order.
pub fn rank_by_priority<'a>(
    pool: &'a [VocabularyItem],
    profile: &LearnerProfile,
    today: NaiveDate,
) -> Vec<(&'a VocabularyItem, f64)> {
    let mut ranked: Vec<(&VocabularyItem, f64)> = pool
        .iter()
        .map(|item| (item, review_priority(item, profile, today)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

pub fn select_question<R: Rng + ?Sized>(
    pool: &[VocabularyItem],
    profile: &LearnerProfile,
    today: NaiveDate,
    rng: &mut R,
) -> Result<QuestionSelection, EngineError> {
    if pool.len() < MIN_POOL_SIZE {
        return Err(EngineError::InsufficientData {
            available: pool.len(),
            required: MIN_POOL_SIZE,
        });
    }

    let ranked = rank_by_priority(pool, profile, today);
    let candidates: Vec<&VocabularyItem> = ranked
        .iter()
        .take(CANDIDATE_POOL_SIZE)
        .map(|(item, _)| *item)
        .collect();

    let question = if rng.random::<f64>() < TOP_PICK_PROBABILITY {
        candidates[0]
    } else {
        let window = &candidates[..candidates.len().min(VARIETY_WINDOW)];
        window.choose(rng).copied().unwrap_or(candidates[0])
    };

    let tier = DifficultyTier::from_confidence(profile.confidence_score);
    let distractors = pick_distractors(pool, question.id, tier, rng);

    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(question.clone());
    options.extend(distractors.iter().cloned());
    options.shuffle(rng);

    tracing::debug!(
        question_id = question.id,
        tier = tier.as_str(),
        candidates = candidates.len(),
        "quiz question selected"
    );

    Ok(QuestionSelection {
        question: question.clone(),
        distractors,
        options,
        tier,
    })
}

/// Wrong options for `question_id`; the shortlist a tier samples from depends on mastery.
pub fn pick_distractors<R: Rng + ?Sized>(
    pool: &[VocabularyItem],
    question_id: i64,
    tier: DifficultyTier,
    rng: &mut R,
) -> Vec<VocabularyItem> {
    let mut others: Vec<&VocabularyItem> =
        pool.iter().filter(|item| item.id != question_id).collect();

    match tier {
        DifficultyTier::Expert | DifficultyTier::Hard => {}
        DifficultyTier::Medium => {
            others.sort_by_key(|item| (item.mastery_level - 50).abs());
            others.truncate(DISTRACTOR_SHORTLIST);
        }
        DifficultyTier::Easy => {
            others.sort_by_key(|item| std::cmp::Reverse(item.mastery_level));
            others.truncate(DISTRACTOR_SHORTLIST);
        }
    }

    others
        .choose_multiple(rng, DISTRACTOR_COUNT)
        .map(|item| (*item).clone())
        .collect()
}
