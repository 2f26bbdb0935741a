use chrono::{Duration, NaiveDateTime};

use super::profile::{add_experience, update_confidence};
use super::scoring::{review_interval_for, word_difficulty};
use super::types::{Achievement, AnswerOutcome, LearnerProfile, VocabularyItem};

pub const MAX_MASTERY: i64 = 100;
const MASTERY_BASE_GAIN: i64 = 10;
const MASTERY_STREAK_GAIN: i64 = 2;
const MASTERY_PENALTY: i64 = 5;

const CORRECT_XP: i64 = 10;
const INCORRECT_XP: i64 = 3;
const FAST_ANSWER_SECS: f64 = 3.0;
const QUICK_ANSWER_SECS: f64 = 5.0;
const STREAK_BONUS_FROM: i64 = 3;
const MASTERED_STREAK_MILESTONE: i64 = 5;

const CONFIDENCE_GAIN: f64 = 5.0;
const CONFIDENCE_LOSS: f64 = 10.0;
const CONFIDENT_ABOVE: f64 = 70.0;
const STRUGGLING_BELOW: f64 = 30.0;
const MIN_CURRENT_DIFFICULTY: f64 = 10.0;
const MAX_CURRENT_DIFFICULTY: f64 = 100.0;

/// XP multiplier for a correct answer, given the streak after this answer.
pub fn speed_multiplier(response_time_secs: f64, streak: i64) -> f64 {
    let mut multiplier = if response_time_secs < FAST_ANSWER_SECS {
        1.5
    } else if response_time_secs < QUICK_ANSWER_SECS {
        1.2
    } else {
        1.0
    };
    if streak >= STREAK_BONUS_FROM {
        multiplier += 0.5;
    }
    multiplier
}

/// Applies one quiz answer to the word and the learner.
///
/// Both records are mutated in place; the caller persists them together.
pub fn record_answer(
    item: &mut VocabularyItem,
    profile: &mut LearnerProfile,
    is_correct: bool,
    response_time_secs: f64,
    now: NaiveDateTime,
) -> AnswerOutcome {
    item.times_reviewed += 1;
    item.last_reviewed = Some(now);
    item.last_response_time = Some(response_time_secs);

    let (base_xp, multiplier) = if is_correct {
        item.times_correct += 1;
        item.streak += 1;
        let gain = MASTERY_BASE_GAIN + MASTERY_STREAK_GAIN * item.streak;
        item.mastery_level = (item.mastery_level + gain).min(MAX_MASTERY);

        let performance = (profile.confidence_score + CONFIDENCE_GAIN).min(100.0);
        update_confidence(profile, performance);
        if profile.confidence_score > CONFIDENT_ABOVE {
            profile.current_difficulty = (profile.current_difficulty + 2.0).min(MAX_CURRENT_DIFFICULTY);
        }

        (CORRECT_XP, speed_multiplier(response_time_secs, item.streak))
    } else {
        item.streak = 0;
        item.mastery_level = (item.mastery_level - MASTERY_PENALTY).max(0);

        let performance = (profile.confidence_score - CONFIDENCE_LOSS).max(0.0);
        update_confidence(profile, performance);
        let step = if profile.confidence_score < STRUGGLING_BELOW {
            5.0
        } else {
            2.0
        };
        profile.current_difficulty = (profile.current_difficulty - step).max(MIN_CURRENT_DIFFICULTY);

        (INCORRECT_XP, 1.0)
    };

    item.review_interval = review_interval_for(item.streak, is_correct);
    item.next_review_date = now
        .date()
        .checked_add_signed(Duration::days(item.review_interval));
    item.difficulty_score = word_difficulty(item);

    let (leveled_up, xp_gained) = add_experience(profile, base_xp, multiplier);

    let mut achievements = Vec::new();
    if leveled_up {
        achievements.push(Achievement::LevelUp {
            level: profile.level,
        });
    }
    if is_correct && item.mastery_level >= MAX_MASTERY {
        achievements.push(Achievement::WordMastered {
            word: item.word.clone(),
        });
    }
    if item.streak == MASTERED_STREAK_MILESTONE {
        achievements.push(Achievement::Streak5 {
            word: item.word.clone(),
        });
    }

    tracing::debug!(
        word_id = item.id,
        is_correct,
        mastery = item.mastery_level,
        streak = item.streak,
        interval = item.review_interval,
        xp_gained,
        confidence = profile.confidence_score,
        "answer recorded"
    );

    AnswerOutcome {
        is_correct,
        xp_gained,
        leveled_up,
        achievements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 10)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    fn fresh_word() -> VocabularyItem {
        VocabularyItem::new(
            3,
            "ephemeral",
            "lasting a very short time",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        )
    }

    #[test]
    fn test_new_word_fast_correct() {
        let mut item = fresh_word();
        let mut profile = LearnerProfile::default();

        let outcome = record_answer(&mut item, &mut profile, true, 2.0, now());

        assert_eq!(item.times_reviewed, 1);
        assert_eq!(item.times_correct, 1);
        assert_eq!(item.streak, 1);
        assert_eq!(item.mastery_level, 12);
        assert_eq!(item.review_interval, 2);
        assert_eq!(item.next_review_date, NaiveDate::from_ymd_opt(2024, 4, 12));
        assert_eq!(item.last_reviewed, Some(now()));
        assert_eq!(item.last_response_time, Some(2.0));
        assert_eq!(item.difficulty_score, 50.0);
        assert_eq!(outcome.xp_gained, 15);
        assert_eq!(profile.experience_points, 15);
        assert!(!outcome.leveled_up);
        // 0.3 * 55 + 0.7 * 50
        assert!((profile.confidence_score - 51.5).abs() < 1e-9);
        assert_eq!(profile.current_difficulty, 30.0);
    }

    #[test]
    fn test_incorrect_answer_resets() {
        let mut item = fresh_word();
        item.times_reviewed = 4;
        item.times_correct = 4;
        item.streak = 4;
        item.mastery_level = 60;
        item.review_interval = 8;
        let mut profile = LearnerProfile::default();

        let outcome = record_answer(&mut item, &mut profile, false, 7.0, now());

        assert!(!outcome.is_correct);
        assert_eq!(item.streak, 0);
        assert_eq!(item.mastery_level, 55);
        assert_eq!(item.review_interval, 1);
        assert_eq!(item.times_correct, 4);
        assert_eq!(outcome.xp_gained, 3);
        // 0.3 * 40 + 0.7 * 50
        assert!((profile.confidence_score - 47.0).abs() < 1e-9);
        assert_eq!(profile.current_difficulty, 28.0);
    }

    #[test]
    fn test_mastery_floor_at_zero() {
        let mut item = fresh_word();
        item.mastery_level = 3;
        let mut profile = LearnerProfile::default();
        record_answer(&mut item, &mut profile, false, 4.0, now());
        assert_eq!(item.mastery_level, 0);
    }

    #[test]
    fn test_struggling_learner_drops_faster() {
        let mut item = fresh_word();
        let mut profile = LearnerProfile {
            confidence_score: 20.0,
            current_difficulty: 12.0,
            ..Default::default()
        };
        record_answer(&mut item, &mut profile, false, 4.0, now());
        assert_eq!(profile.current_difficulty, 10.0);
    }

    #[test]
    fn test_confident_learner_gets_harder_words() {
        let mut item = fresh_word();
        let mut profile = LearnerProfile {
            confidence_score: 90.0,
            current_difficulty: 99.0,
            ..Default::default()
        };
        record_answer(&mut item, &mut profile, true, 6.0, now());
        assert_eq!(profile.current_difficulty, 100.0);
    }

    #[test]
    fn test_streak_four_schedules_eight_days() {
        let mut item = fresh_word();
        item.streak = 3;
        let mut profile = LearnerProfile::default();
        record_answer(&mut item, &mut profile, true, 6.0, now());
        assert_eq!(item.streak, 4);
        assert_eq!(item.review_interval, 8);
    }

    #[test]
    fn test_streak_five_and_mastery_achievements() {
        let mut item = fresh_word();
        item.streak = 4;
        item.mastery_level = 90;
        let mut profile = LearnerProfile {
            experience_points: 390,
            level: 2,
            ..Default::default()
        };

        let outcome = record_answer(&mut item, &mut profile, true, 1.0, now());

        assert_eq!(item.mastery_level, 100);
        // 10 * (1.5 + 0.5)
        assert_eq!(outcome.xp_gained, 20);
        assert!(outcome.leveled_up);
        assert_eq!(profile.level, 3);
        assert_eq!(
            outcome.achievements,
            vec![
                Achievement::LevelUp { level: 3 },
                Achievement::WordMastered {
                    word: "ephemeral".to_string()
                },
                Achievement::Streak5 {
                    word: "ephemeral".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_speed_multiplier_bands() {
        assert_eq!(speed_multiplier(2.9, 1), 1.5);
        assert_eq!(speed_multiplier(3.0, 1), 1.2);
        assert_eq!(speed_multiplier(4.9, 2), 1.2);
        assert_eq!(speed_multiplier(5.0, 2), 1.0);
        assert_eq!(speed_multiplier(8.0, 3), 1.5);
    }

    #[test]
    fn test_difficulty_recomputed_after_third_review() {
        let mut item = fresh_word();
        let mut profile = LearnerProfile::default();
        record_answer(&mut item, &mut profile, true, 4.0, now());
        record_answer(&mut item, &mut profile, false, 4.0, now());
        record_answer(&mut item, &mut profile, false, 12.0, now());
        // 1/3 correct -> 33%, base 67, slow +10
        assert_eq!(item.difficulty_score, 77.0);
    }
}
