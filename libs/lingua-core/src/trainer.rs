//! The explicitly constructed context object tying the core together.
//!
//! A [`Trainer`] owns the catalog, progress store, scheduler and the single
//! quiz session, and exposes the narrow interface the collaborator calls
//! from its main loop: discovery reports, periodic ticks, answer
//! submissions and preference changes. Side effects the collaborator
//! renders (prompt text, feedback, celebrations) arrive through the
//! [`QuizEvents`] sink, invoked synchronously from within these calls.

use std::path::PathBuf;

use crate::catalog::TranslationCatalog;
use crate::progress::ProgressStore;
use crate::scheduler::FlashcardScheduler;
use crate::session::{FlashcardSession, SessionReply};
use crate::types::{
    Direction, StatsSnapshot, SubmitOutcome, MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES,
};

/// Collaborator-implemented sink for quiz side effects.
pub trait QuizEvents {
    /// A quiz started; `prompt` is the text to show the player.
    fn quiz_started(&mut self, key: &str, prompt: &str, direction: Direction);

    /// A submission was judged; `expected` is the answer to show in
    /// feedback.
    fn quiz_result(&mut self, key: &str, correct: bool, expected: &str);

    /// `key` just crossed the mastery threshold (fires exactly once per
    /// key).
    fn item_mastered(&mut self, key: &str);
}

/// Tunables supplied by the collaborator at construction.
pub struct TrainerConfig {
    /// Path of the persisted progress file.
    pub progress_path: PathBuf,
    /// Text with this prefix is never consumed as a quiz answer.
    pub command_prefix: String,
    /// How long after a join before the guaranteed first quiz fires.
    pub startup_quiz_delay_ms: i64,
}

impl TrainerConfig {
    pub fn new(progress_path: impl Into<PathBuf>) -> Self {
        Self {
            progress_path: progress_path.into(),
            command_prefix: "/".to_string(),
            startup_quiz_delay_ms: 5_000,
        }
    }
}

pub struct Trainer {
    catalog: TranslationCatalog,
    store: ProgressStore,
    scheduler: FlashcardScheduler,
    session: FlashcardSession,
    events: Box<dyn QuizEvents>,
    startup_quiz_delay_ms: i64,
    /// Deadline for the deferred first-quiz-after-join, if armed.
    startup_quiz_at: Option<i64>,
}

impl Trainer {
    pub fn new(
        catalog: TranslationCatalog,
        config: TrainerConfig,
        events: Box<dyn QuizEvents>,
        now_ms: i64,
    ) -> Self {
        let store = ProgressStore::load_or_create(config.progress_path);
        let prefs = store.preferences();
        let mut scheduler = FlashcardScheduler::new(prefs.flashcard_interval, now_ms);
        scheduler.restore_answer_clock(prefs.last_flashcard_answer_time);

        Self {
            catalog,
            store,
            scheduler,
            session: FlashcardSession::new(config.command_prefix),
            events,
            startup_quiz_delay_ms: config.startup_quiz_delay_ms,
            startup_quiz_at: None,
        }
    }

    /// Seeded-scheduler variant for deterministic tests.
    pub fn with_seed(
        catalog: TranslationCatalog,
        config: TrainerConfig,
        events: Box<dyn QuizEvents>,
        now_ms: i64,
        seed: u64,
    ) -> Self {
        let mut trainer = Self::new(catalog, config, events, now_ms);
        let interval = trainer.scheduler.interval_ms();
        let last_answer = trainer.store.preferences().last_flashcard_answer_time;
        trainer.scheduler = FlashcardScheduler::with_seed(interval, now_ms, seed);
        trainer.scheduler.restore_answer_clock(last_answer);
        trainer
    }

    /// The collaborator saw the player encounter `key`.
    ///
    /// Returns whether this was a new discovery (for celebratory
    /// feedback). A new discovery may immediately start a native→target
    /// quiz when the scheduler allows and no quiz is active.
    pub fn report_discovery(&mut self, key: &str, now_ms: i64) -> bool {
        if !self.catalog.contains(key) {
            tracing::warn!(key, "discovery for unknown vocabulary key ignored");
            return false;
        }
        if !self.store.record_discovery(key, now_ms) {
            return false;
        }
        if self.scheduler.should_quiz_on_discovery(now_ms) {
            self.start_quiz(key, Direction::NativeToTarget);
            self.scheduler.mark_triggered(now_ms);
        }
        true
    }

    /// Called once per engine frame or timer tick.
    pub fn tick(&mut self, now_ms: i64) {
        if let Some(deadline) = self.startup_quiz_at {
            if now_ms >= deadline {
                self.startup_quiz_at = None;
                // The join quiz bypasses the answer clock entirely.
                self.scheduler.reset_answer_clock();
                self.start_random_quiz();
                self.scheduler.mark_triggered(now_ms);
                return;
            }
        }

        if self.scheduler.tick_due(now_ms) {
            // Rearm even when nothing can start, so an idle interval
            // elapses before the next attempt.
            self.scheduler.mark_triggered(now_ms);
            self.start_random_quiz();
        }
    }

    /// Forward a line of player text. Commands and out-of-quiz chatter are
    /// ignored; everything else is judged against the active quiz.
    pub fn submit_answer(&mut self, text: &str, now_ms: i64) -> SubmitOutcome {
        match self.session.submit(text) {
            SessionReply::Ignored => SubmitOutcome::Ignored,
            SessionReply::Judged {
                key,
                expected,
                correct,
                first_judgement,
            } => {
                self.events.quiz_result(&key, correct, &expected);

                if first_judgement {
                    if let Some(outcome) = self.store.record_attempt(&key, correct, now_ms) {
                        if outcome.newly_mastered {
                            self.events.item_mastered(&key);
                        }
                    }
                } else {
                    self.store.note_answered(now_ms);
                }
                self.scheduler.on_answered(now_ms);

                if correct {
                    SubmitOutcome::Correct
                } else {
                    SubmitOutcome::Incorrect
                }
            }
        }
    }

    /// Manually start a random quiz (the `/flashcard` command). Scheduler
    /// clocks are left alone. Returns whether a quiz actually started.
    pub fn trigger_quiz(&mut self) -> bool {
        self.start_random_quiz()
    }

    /// The player joined a world: arm the deferred first quiz. The welcome
    /// message itself is the collaborator's to render, gated on
    /// [`Trainer::welcome_message_enabled`].
    pub fn notify_join(&mut self, now_ms: i64) {
        self.startup_quiz_at = Some(now_ms + self.startup_quiz_delay_ms);
    }

    /// Abandon the active quiz, if any (e.g. on world-leave).
    pub fn cancel_quiz(&mut self) {
        self.session.cancel();
    }

    pub fn quiz_active(&self) -> bool {
        self.session.awaiting_answer()
    }

    pub fn stats(&self) -> StatsSnapshot {
        let counts = self.store.counts();
        StatsSnapshot {
            discovered: counts.discovered,
            total: self.catalog.key_count(),
            mastered: counts.mastered,
            discovered_biomes: counts.discovered_biomes,
        }
    }

    pub fn is_discovered(&self, key: &str) -> bool {
        self.store.is_discovered(key)
    }

    pub fn is_mastered(&self, key: &str) -> bool {
        self.store.is_mastered(key)
    }

    pub fn welcome_message_enabled(&self) -> bool {
        self.store.preferences().welcome_message_enabled
    }

    pub fn set_welcome_message_enabled(&mut self, enabled: bool) {
        self.store.set_welcome_message_enabled(enabled);
    }

    pub fn interval_minutes(&self) -> i64 {
        self.scheduler.interval_ms() / (60 * 1000)
    }

    /// Change the quiz interval. Values outside 1–120 minutes are rejected
    /// (returns false) rather than clamped.
    pub fn set_interval_minutes(&mut self, minutes: i64) -> bool {
        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&minutes) {
            return false;
        }
        let interval_ms = minutes * 60 * 1000;
        self.scheduler.set_interval_ms(interval_ms);
        self.store.set_flashcard_interval(interval_ms);
        true
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    /// Pick and start a random quiz among discovered, unmastered keys.
    fn start_random_quiz(&mut self) -> bool {
        if self.session.awaiting_answer() {
            return false;
        }
        let candidates = self.store.unmastered_discovered_keys();
        let Some((key, direction)) = self.scheduler.pick_quiz(&candidates) else {
            return false;
        };
        let key = key.to_string();
        self.start_quiz(&key, direction)
    }

    /// Start a quiz for a specific key; requires both translations.
    fn start_quiz(&mut self, key: &str, direction: Direction) -> bool {
        let (Some(native), Some(target)) = (self.catalog.native(key), self.catalog.target(key))
        else {
            tracing::warn!(key, "skipping quiz: translation missing");
            return false;
        };
        let prompt = match direction {
            Direction::NativeToTarget => native,
            Direction::TargetToNative => target,
        };
        let (native, target, prompt) =
            (native.to_string(), target.to_string(), prompt.to_string());
        if !self.session.start(key, &native, &target, direction) {
            return false;
        }
        self.events.quiz_started(key, &prompt, direction);
        true
    }
}
