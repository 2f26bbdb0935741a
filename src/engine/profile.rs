use chrono::NaiveDate;

use super::types::LearnerProfile;

/// Weight of the newest observation in the confidence moving average.
pub const CONFIDENCE_ALPHA: f64 = 0.3;
const XP_PER_LEVEL_UNIT: f64 = 100.0;

/// Level = floor(sqrt(xp / 100)) + 1, never below 1.
pub fn level_for_experience(experience_points: i64) -> i64 {
    let xp = experience_points.max(0) as f64;
    ((xp / XP_PER_LEVEL_UNIT).sqrt().floor() as i64 + 1).max(1)
}

/// Experience at which `level` is reached; inverse of [`level_for_experience`].
pub fn experience_for_level(level: i64) -> i64 {
    let steps = (level - 1).max(0);
    steps * steps * XP_PER_LEVEL_UNIT as i64
}

pub fn update_confidence(profile: &mut LearnerProfile, performance: f64) {
    let blended = CONFIDENCE_ALPHA * performance + (1.0 - CONFIDENCE_ALPHA) * profile.confidence_score;
    profile.confidence_score = blended.clamp(0.0, 100.0);
}

/// Credits experience scaled by `multiplier` and the profile's learning rate.
/// Returns `(leveled_up, xp_gained)`.
pub fn add_experience(profile: &mut LearnerProfile, base_xp: i64, multiplier: f64) -> (bool, i64) {
    let xp_gained = (base_xp as f64 * multiplier * profile.learning_rate).floor() as i64;
    profile.experience_points = (profile.experience_points + xp_gained).max(0);

    let new_level = level_for_experience(profile.experience_points);
    if new_level > profile.level {
        profile.level = new_level;
        return (true, xp_gained);
    }
    (false, xp_gained)
}

/// Daily study streak bookkeeping. Returns true when the profile changed.
pub fn update_streak_on_visit(profile: &mut LearnerProfile, today: NaiveDate) -> bool {
    if profile.last_study_date == Some(today) {
        return false;
    }

    let yesterday = today.pred_opt();
    if yesterday.is_some() && profile.last_study_date == yesterday {
        profile.current_streak += 1;
    } else {
        profile.current_streak = 1;
    }
    profile.last_study_date = Some(today);
    profile.longest_streak = profile.longest_streak.max(profile.current_streak);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_level_curve() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(99), 1);
        assert_eq!(level_for_experience(100), 2);
        assert_eq!(level_for_experience(399), 2);
        assert_eq!(level_for_experience(400), 3);
        assert_eq!(level_for_experience(900), 4);
        assert_eq!(level_for_experience(-50), 1);
    }

    #[test]
    fn test_experience_for_level_is_threshold() {
        for level in 1..8 {
            let xp = experience_for_level(level);
            assert_eq!(level_for_experience(xp), level);
            if xp > 0 {
                assert_eq!(level_for_experience(xp - 1), level - 1);
            }
        }
    }

    #[test]
    fn test_confidence_ema() {
        let mut profile = LearnerProfile::default();
        update_confidence(&mut profile, 55.0);
        // 0.3 * 55 + 0.7 * 50
        assert!((profile.confidence_score - 51.5).abs() < 1e-9);

        profile.confidence_score = 99.0;
        update_confidence(&mut profile, 400.0);
        assert_eq!(profile.confidence_score, 100.0);

        profile.confidence_score = 1.0;
        update_confidence(&mut profile, -300.0);
        assert_eq!(profile.confidence_score, 0.0);
    }

    #[test]
    fn test_add_experience_levels_up() {
        let mut profile = LearnerProfile {
            experience_points: 95,
            ..Default::default()
        };
        let (leveled_up, gained) = add_experience(&mut profile, 10, 1.0);
        assert!(leveled_up);
        assert_eq!(gained, 10);
        assert_eq!(profile.level, 2);

        let (leveled_up, gained) = add_experience(&mut profile, 3, 1.0);
        assert!(!leveled_up);
        assert_eq!(gained, 3);
        assert_eq!(profile.experience_points, 108);
    }

    #[test]
    fn test_add_experience_floors() {
        let mut profile = LearnerProfile {
            learning_rate: 1.25,
            ..Default::default()
        };
        let (_, gained) = add_experience(&mut profile, 10, 1.2);
        assert_eq!(gained, 15);
        let (_, gained) = add_experience(&mut profile, 3, 1.0);
        assert_eq!(gained, 3);
    }

    #[test]
    fn test_streak_first_visit() {
        let mut profile = LearnerProfile::default();
        assert!(update_streak_on_visit(&mut profile, day(2024, 5, 1)));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 1);
        assert!(!update_streak_on_visit(&mut profile, day(2024, 5, 1)));
        assert_eq!(profile.current_streak, 1);
    }

    #[test]
    fn test_streak_consecutive_and_gap() {
        let mut profile = LearnerProfile::default();
        update_streak_on_visit(&mut profile, day(2024, 2, 28));
        update_streak_on_visit(&mut profile, day(2024, 2, 29));
        update_streak_on_visit(&mut profile, day(2024, 3, 1));
        assert_eq!(profile.current_streak, 3);
        assert_eq!(profile.longest_streak, 3);

        update_streak_on_visit(&mut profile, day(2024, 3, 5));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 3);
        assert_eq!(profile.last_study_date, Some(day(2024, 3, 5)));
    }
}
