//! Core types for the vocabulary learning tracker.

use serde::{Deserialize, Serialize};

/// Number of correct recall attempts after which an item counts as mastered.
pub const MASTERY_THRESHOLD: u32 = 5;

/// Default idle interval between automatic quizzes (5 minutes).
pub const DEFAULT_INTERVAL_MS: i64 = 5 * 60 * 1000;

/// Allowed bounds for the quiz interval, in minutes.
pub const MIN_INTERVAL_MINUTES: i64 = 1;
pub const MAX_INTERVAL_MINUTES: i64 = 120;

/// Key prefix that marks a vocabulary entry as a biome name.
pub const BIOME_KEY_PREFIX: &str = "biome.";

/// Which way a quiz asks the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show the native-language word, expect the target-language answer.
    NativeToTarget,
    /// Show the target-language word, expect the native-language answer.
    TargetToNative,
}

/// Durable learning state for one vocabulary key.
///
/// All timestamps are epoch milliseconds; `0` means "never". Field names
/// follow the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub discovered: bool,
    #[serde(default, rename = "discoveredTime")]
    pub discovered_time: i64,
    #[serde(default, rename = "correctCount")]
    pub correct_count: u32,
    #[serde(default, rename = "attemptCount")]
    pub attempt_count: u32,
    #[serde(default, rename = "lastAttemptTime")]
    pub last_attempt_time: i64,
    #[serde(default)]
    pub mastered: bool,
}

/// Process-wide preferences, persisted alongside the progress records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_welcome_enabled", rename = "welcomeMessageEnabled")]
    pub welcome_message_enabled: bool,
    #[serde(default = "default_interval_ms", rename = "flashcardInterval")]
    pub flashcard_interval: i64,
    #[serde(default, rename = "lastFlashcardAnswerTime")]
    pub last_flashcard_answer_time: i64,
}

fn default_welcome_enabled() -> bool {
    true
}

fn default_interval_ms() -> i64 {
    DEFAULT_INTERVAL_MS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            welcome_message_enabled: true,
            flashcard_interval: DEFAULT_INTERVAL_MS,
            last_flashcard_answer_time: 0,
        }
    }
}

/// Result of recording a quiz attempt against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    pub correct: bool,
    /// True exactly once: on the attempt that crossed the mastery threshold.
    pub newly_mastered: bool,
}

/// Aggregate projections over all tracked progress records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounts {
    pub discovered: usize,
    pub total: usize,
    pub mastered: usize,
    pub discovered_biomes: usize,
}

/// Snapshot handed to the collaborator for a status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub discovered: usize,
    /// Size of the vocabulary universe (catalog key count).
    pub total: usize,
    pub mastered: usize,
    pub discovered_biomes: usize,
}

/// What became of a submitted line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No quiz awaiting an answer, or the text was a command.
    Ignored,
    Correct,
    Incorrect,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_defaults_are_all_zero() {
        let record = ProgressRecord::default();
        assert!(!record.discovered);
        assert_eq!(record.discovered_time, 0);
        assert_eq!(record.correct_count, 0);
        assert_eq!(record.attempt_count, 0);
        assert_eq!(record.last_attempt_time, 0);
        assert!(!record.mastered);
    }

    #[test]
    fn record_deserializes_with_wire_names() {
        let json = r#"{
            "discovered": true,
            "discoveredTime": 1700000000000,
            "correctCount": 3,
            "attemptCount": 4,
            "lastAttemptTime": 1700000001000,
            "mastered": false
        }"#;
        let record: ProgressRecord = serde_json::from_str(json).unwrap();
        assert!(record.discovered);
        assert_eq!(record.discovered_time, 1_700_000_000_000);
        assert_eq!(record.correct_count, 3);
        assert_eq!(record.attempt_count, 4);
    }

    #[test]
    fn missing_record_fields_take_defaults() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"discovered": true, "discoveredTime": 12}"#).unwrap();
        assert!(record.discovered);
        assert_eq!(record.discovered_time, 12);
        assert_eq!(record.attempt_count, 0);
        assert!(!record.mastered);
    }

    #[test]
    fn preference_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert!(prefs.welcome_message_enabled);
        assert_eq!(prefs.flashcard_interval, DEFAULT_INTERVAL_MS);
        assert_eq!(prefs.last_flashcard_answer_time, 0);
    }
}
