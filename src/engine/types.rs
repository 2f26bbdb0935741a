use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIFFICULTY_SCORE: f64 = 50.0;
pub const DEFAULT_CURRENT_DIFFICULTY: f64 = 30.0;
pub const DEFAULT_CONFIDENCE: f64 = 50.0;
pub const DEFAULT_USERNAME: &str = "Learner";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: i64,
    pub word: String,
    pub definition: String,
    pub synonyms: String,
    pub antonyms: String,
    pub example_sentence: String,
    pub date_added: NaiveDate,
    pub times_reviewed: i64,
    pub times_correct: i64,
    pub last_reviewed: Option<NaiveDateTime>,
    pub mastery_level: i64,
    pub difficulty_score: f64,
    pub streak: i64,
    pub last_response_time: Option<f64>,
    pub review_interval: i64,
    pub next_review_date: Option<NaiveDate>,
}

impl VocabularyItem {
    /// A word that has never been quizzed, scheduled for review tomorrow.
    pub fn new(
        id: i64,
        word: impl Into<String>,
        definition: impl Into<String>,
        date_added: NaiveDate,
    ) -> Self {
        Self {
            id,
            word: word.into(),
            definition: definition.into(),
            synonyms: String::new(),
            antonyms: String::new(),
            example_sentence: String::new(),
            date_added,
            times_reviewed: 0,
            times_correct: 0,
            last_reviewed: None,
            mastery_level: 0,
            difficulty_score: DEFAULT_DIFFICULTY_SCORE,
            streak: 0,
            last_response_time: None,
            review_interval: 1,
            next_review_date: date_added.succ_opt(),
        }
    }

    /// Whole-number accuracy percentage, truncated; zero for unreviewed words.
    pub fn accuracy_percent(&self) -> i64 {
        if self.times_reviewed <= 0 {
            return 0;
        }
        self.times_correct * 100 / self.times_reviewed
    }

    pub fn is_new(&self) -> bool {
        self.times_reviewed == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub id: i64,
    pub username: String,
    pub level: i64,
    pub experience_points: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_study_date: Option<NaiveDate>,
    pub current_difficulty: f64,
    pub confidence_score: f64,
    pub learning_rate: f64,
}

impl Default for LearnerProfile {
    fn default() -> Self {
        Self {
            id: 1,
            username: DEFAULT_USERNAME.to_string(),
            level: 1,
            experience_points: 0,
            current_streak: 0,
            longest_streak: 0,
            last_study_date: None,
            current_difficulty: DEFAULT_CURRENT_DIFFICULTY,
            confidence_score: DEFAULT_CONFIDENCE,
            learning_rate: 1.0,
        }
    }
}

/// Distractor policy derived from the learner's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 80.0 {
            Self::Expert
        } else if confidence >= 60.0 {
            Self::Hard
        } else if confidence >= 40.0 {
            Self::Medium
        } else {
            Self::Easy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Achievement {
    LevelUp { level: i64 },
    WordMastered { word: String },
    #[serde(rename = "streak_5")]
    Streak5 { word: String },
}

#[derive(Debug, Clone)]
pub struct QuestionSelection {
    pub question: VocabularyItem,
    pub distractors: Vec<VocabularyItem>,
    /// Question plus distractors in presentation order.
    pub options: Vec<VocabularyItem>,
    pub tier: DifficultyTier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub xp_gained: i64,
    pub leveled_up: bool,
    pub achievements: Vec<Achievement>,
}
