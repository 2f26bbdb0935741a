use chrono::NaiveDate;

use super::types::{LearnerProfile, VocabularyItem};

/// Below this many reviews a word keeps the neutral difficulty.
pub const MIN_REVIEWS_FOR_DIFFICULTY: i64 = 3;
pub const NEUTRAL_DIFFICULTY: f64 = 50.0;
const MIN_DIFFICULTY: f64 = 10.0;
const MAX_DIFFICULTY: f64 = 100.0;
const SLOW_RESPONSE_SECS: f64 = 10.0;
const FAST_RESPONSE_SECS: f64 = 3.0;
const RESPONSE_TIME_ADJUSTMENT: f64 = 10.0;

const REVIEW_WEIGHT: f64 = 100.0;
const DIFFICULTY_MATCH_WEIGHT: f64 = 0.5;
const MASTERY_GAP_WEIGHT: f64 = 0.3;
const MISTAKE_BOOST: f64 = 50.0;

/// Days until the next review, indexed by the current correct streak.
pub const REVIEW_INTERVALS: [i64; 10] = [1, 2, 3, 5, 8, 13, 21, 34, 55, 89];

pub fn word_difficulty(item: &VocabularyItem) -> f64 {
    if item.times_reviewed < MIN_REVIEWS_FOR_DIFFICULTY {
        return NEUTRAL_DIFFICULTY;
    }

    let mut base = 100.0 - item.accuracy_percent() as f64;

    // an unrecorded or zero response time carries no speed signal;
    // negative times never get here, answers reject them before recording
    if let Some(rt) = item.last_response_time.filter(|rt| *rt > 0.0) {
        if rt > SLOW_RESPONSE_SECS {
            base += RESPONSE_TIME_ADJUSTMENT;
        } else if rt < FAST_RESPONSE_SECS {
            base -= RESPONSE_TIME_ADJUSTMENT;
        }
    }

    base.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

pub fn needs_review(item: &VocabularyItem, today: NaiveDate) -> bool {
    match item.last_reviewed {
        Some(last) => (today - last.date()).num_days() >= item.review_interval,
        None => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityBreakdown {
    pub needs_review: bool,
    pub difficulty_score: f64,
    pub difficulty_match: f64,
    pub mastery_gap: f64,
    pub mistake_boost: f64,
    pub priority: f64,
}

pub fn priority_breakdown(
    item: &VocabularyItem,
    profile: &LearnerProfile,
    today: NaiveDate,
) -> PriorityBreakdown {
    let needs_review = needs_review(item, today);
    let difficulty_score = word_difficulty(item);
    let difficulty_match = 100.0 - (difficulty_score - profile.current_difficulty).abs();
    let mastery_gap = (100 - item.mastery_level) as f64;
    let mistake_boost = if item.streak == 0 && !item.is_new() {
        MISTAKE_BOOST
    } else {
        0.0
    };

    let review_term = if needs_review { REVIEW_WEIGHT } else { 0.0 };
    let priority = review_term
        + difficulty_match * DIFFICULTY_MATCH_WEIGHT
        + mastery_gap * MASTERY_GAP_WEIGHT
        + mistake_boost;

    PriorityBreakdown {
        needs_review,
        difficulty_score,
        difficulty_match,
        mastery_gap,
        mistake_boost,
        priority,
    }
}

pub fn review_priority(item: &VocabularyItem, profile: &LearnerProfile, today: NaiveDate) -> f64 {
    priority_breakdown(item, profile, today).priority
}

/// Interval after an answer: grows with the streak on success, resets to one day on a miss.
pub fn review_interval_for(streak: i64, is_correct: bool) -> i64 {
    if !is_correct {
        return REVIEW_INTERVALS[0];
    }
    let idx = streak.clamp(0, REVIEW_INTERVALS.len() as i64 - 1) as usize;
    REVIEW_INTERVALS[idx]
}
