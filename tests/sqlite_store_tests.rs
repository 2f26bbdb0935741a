use chrono::{NaiveDate, NaiveDateTime};

use vocab_trainer::db::migrate::run_migrations;
use vocab_trainer::db::operations::{
    count_milestones, get_profile, get_word, insert_word, list_words, recent_quiz_results,
    save_word_progress, WordContent, WordSort,
};
use vocab_trainer::engine::DifficultyTier;
use vocab_trainer::seed::bootstrap;
use vocab_trainer::services::quiz::{check_answer, complete_quiz, prepare_quiz, QuizCompletion};
use vocab_trainer::services::{words, ServiceError};

mod common;

use common::open_test_db;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(date: NaiveDate, h: u32) -> NaiveDateTime {
    date.and_hms_opt(h, 0, 0).unwrap()
}

fn content(word: &str, definition: &str) -> WordContent {
    WordContent {
        word: word.to_string(),
        definition: definition.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let (db, _dir) = open_test_db().await;

    let applied = run_migrations(db.pool()).await.unwrap();
    assert_eq!(applied, 0);
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let (db, _dir) = open_test_db().await;

    let first = bootstrap(&db, true).await.unwrap();
    assert!(first.profile_created);
    assert_eq!(first.milestones_seeded, 3);

    let second = bootstrap(&db, true).await.unwrap();
    assert!(!second.profile_created);
    assert_eq!(second.milestones_seeded, 0);
    assert_eq!(count_milestones(db.pool()).await.unwrap(), 3);

    let profile = get_profile(db.pool()).await.unwrap().unwrap();
    assert_eq!(profile.username, "Learner");
    assert_eq!(profile.confidence_score, 50.0);
    assert_eq!(profile.current_difficulty, 30.0);
}

#[tokio::test]
async fn test_word_store_round_trip() {
    let (db, _dir) = open_test_db().await;
    let added = day(2024, 3, 1);

    let id = insert_word(db.pool(), &content("zephyr", "a gentle breeze"), added)
        .await
        .unwrap();
    let mut word = get_word(db.pool(), id).await.unwrap().unwrap();
    assert_eq!(word.date_added, added);
    assert_eq!(word.next_review_date, Some(day(2024, 3, 2)));
    assert_eq!(word.review_interval, 1);
    assert!(word.last_reviewed.is_none());

    word.times_reviewed = 3;
    word.times_correct = 2;
    word.mastery_level = 40;
    word.streak = 2;
    word.last_reviewed = Some(at(added, 9));
    word.last_response_time = Some(4.25);
    assert!(save_word_progress(db.pool(), &word).await.unwrap());

    let reloaded = get_word(db.pool(), id).await.unwrap().unwrap();
    assert_eq!(reloaded, word);
}

#[tokio::test]
async fn test_list_words_sorting() {
    let (db, _dir) = open_test_db().await;
    insert_word(db.pool(), &content("bravado", "boldness"), day(2024, 1, 2))
        .await
        .unwrap();
    insert_word(db.pool(), &content("acumen", "insight"), day(2024, 1, 3))
        .await
        .unwrap();
    insert_word(db.pool(), &content("cogent", "convincing"), day(2024, 1, 1))
        .await
        .unwrap();

    let spelled = |items: Vec<vocab_trainer::engine::VocabularyItem>| {
        items.into_iter().map(|w| w.word).collect::<Vec<_>>()
    };

    let newest = list_words(db.pool(), WordSort::DateDesc).await.unwrap();
    assert_eq!(spelled(newest), ["acumen", "bravado", "cogent"]);

    let oldest = list_words(db.pool(), WordSort::DateAsc).await.unwrap();
    assert_eq!(spelled(oldest), ["cogent", "bravado", "acumen"]);

    let alpha = list_words(db.pool(), WordSort::Alpha).await.unwrap();
    assert_eq!(spelled(alpha), ["acumen", "bravado", "cogent"]);
}

#[tokio::test]
async fn test_edit_word_rejects_taken_spelling() {
    let (db, _dir) = open_test_db().await;
    let today = day(2024, 5, 5);
    words::add_word(&db, content("candor", "frankness"), today)
        .await
        .unwrap();
    let other = words::add_word(&db, content("fervor", "intensity"), today)
        .await
        .unwrap();

    let err = words::edit_word(&db, other.id, content("candor", "honesty"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let kept = words::edit_word(&db, other.id, content("fervor", "passion"))
        .await
        .unwrap();
    assert_eq!(kept.definition, "passion");

    let err = words::edit_word(&db, 999, content("novel", "new"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_prepare_quiz_tracks_daily_streak() {
    let (db, _dir) = open_test_db().await;
    bootstrap(&db, false).await.unwrap();

    let pool = prepare_quiz(&db, day(2024, 6, 1)).await.unwrap();
    assert_eq!(pool.profile.current_streak, 1);

    // same day again: unchanged
    prepare_quiz(&db, day(2024, 6, 1)).await.unwrap();
    prepare_quiz(&db, day(2024, 6, 2)).await.unwrap();
    let pool = prepare_quiz(&db, day(2024, 6, 3)).await.unwrap();
    assert_eq!(pool.profile.current_streak, 3);
    assert_eq!(pool.profile.longest_streak, 3);

    // gap resets but keeps the record
    let pool = prepare_quiz(&db, day(2024, 6, 10)).await.unwrap();
    assert_eq!(pool.profile.current_streak, 1);
    assert_eq!(pool.profile.longest_streak, 3);

    let stored = get_profile(db.pool()).await.unwrap().unwrap();
    assert_eq!(stored.last_study_date, Some(day(2024, 6, 10)));
}

#[tokio::test]
async fn test_check_answer_persists_word_and_profile() {
    let (db, _dir) = open_test_db().await;
    bootstrap(&db, false).await.unwrap();
    let today = day(2024, 7, 1);
    let word = words::add_word(&db, content("verbose", "wordy"), today)
        .await
        .unwrap();

    let mut last = None;
    for hour in 0..4 {
        let report = check_answer(&db, word.id, word.id, 4.0, at(today, 8 + hour))
            .await
            .unwrap();
        last = Some(report);
    }
    let report = last.unwrap();
    assert_eq!(report.word.streak, 4);
    assert_eq!(report.word.review_interval, 8);
    assert_eq!(report.word.next_review_date, Some(day(2024, 7, 9)));

    let stored = get_word(db.pool(), word.id).await.unwrap().unwrap();
    assert_eq!(stored.times_reviewed, 4);
    assert_eq!(stored.times_correct, 4);
    assert_eq!(stored.mastery_level, 12 + 14 + 16 + 18);

    let profile = get_profile(db.pool()).await.unwrap().unwrap();
    assert_eq!(profile, report.profile);
    assert!(profile.experience_points > 0);

    let missed = check_answer(&db, word.id, word.id + 1, 4.0, at(today, 20))
        .await
        .unwrap();
    assert!(!missed.outcome.is_correct);
    assert_eq!(missed.word.streak, 0);
    assert_eq!(missed.word.review_interval, 1);
    assert_eq!(missed.word.mastery_level, 55);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_answers_are_all_recorded() {
    let (db, _dir) = open_test_db().await;
    bootstrap(&db, false).await.unwrap();
    let today = day(2024, 7, 2);
    let word = words::add_word(&db, content("sedulous", "diligent"), today)
        .await
        .unwrap();

    const ANSWERS: i64 = 20;
    let handles: Vec<_> = (0..ANSWERS)
        .map(|_| {
            let db = db.clone();
            let id = word.id;
            tokio::spawn(async move { check_answer(&db, id, id, 4.0, at(today, 9)).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = get_word(db.pool(), word.id).await.unwrap().unwrap();
    assert_eq!(stored.times_reviewed, ANSWERS);
    assert_eq!(stored.times_correct, ANSWERS);
    assert_eq!(stored.streak, ANSWERS);
    assert_eq!(stored.mastery_level, 100);
}

#[tokio::test]
async fn test_check_answer_without_profile() {
    let (db, _dir) = open_test_db().await;
    let word = words::add_word(&db, content("arcane", "obscure"), day(2024, 1, 1))
        .await
        .unwrap();

    let err = check_answer(&db, word.id, word.id, 2.0, at(day(2024, 1, 1), 9))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // nothing was written
    let stored = get_word(db.pool(), word.id).await.unwrap().unwrap();
    assert_eq!(stored.times_reviewed, 0);
}

#[tokio::test]
async fn test_quiz_history_is_newest_first() {
    let (db, _dir) = open_test_db().await;
    let today = day(2024, 8, 1);

    for (hour, score) in [(9, 3), (10, 5), (11, 4)] {
        complete_quiz(
            &db,
            QuizCompletion {
                score,
                total_questions: 5,
                difficulty_level: Some(DifficultyTier::Hard),
                avg_response_time: None,
            },
            at(today, hour),
        )
        .await
        .unwrap();
    }

    let recent = recent_quiz_results(db.pool(), 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].score, 4);
    assert_eq!(recent[1].score, 5);
    assert_eq!(recent[0].difficulty_level.as_deref(), Some("Hard"));
}
