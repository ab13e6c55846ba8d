//! Core library for the linguadex vocabulary trainer.
//!
//! Provides:
//! - Discovery and mastery tracking with JSON persistence
//! - Quiz scheduling (idle-interval and on-discovery triggers)
//! - The single-quiz session state machine
//! - Tolerant answer matching (accent-insensitive, typo-forgiving)
//! - Shared types (ProgressRecord, Preferences, Direction, etc.)
//!
//! The collaborating game client constructs a [`Trainer`] and calls into
//! it from its main loop; everything here is single-threaded and
//! synchronous.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod matching;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod trainer;
pub mod types;

pub use catalog::TranslationCatalog;
pub use error::{CatalogError, StoreError};
pub use matching::{levenshtein_distance, matches, normalize};
pub use progress::ProgressStore;
pub use scheduler::FlashcardScheduler;
pub use session::{FlashcardSession, SessionReply};
pub use trainer::{QuizEvents, Trainer, TrainerConfig};
pub use types::{
    AttemptOutcome, Direction, Preferences, ProgressCounts, ProgressRecord, StatsSnapshot,
    SubmitOutcome, DEFAULT_INTERVAL_MS, MASTERY_THRESHOLD,
};
