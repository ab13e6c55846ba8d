//! Quiz timing policy.
//!
//! Two clocks drive everything: `last_trigger_at` gates the periodic tick
//! quiz, `last_answer_at` gates the discovery quiz. Answering anything
//! resets both; `last_answer_at == 0` means no answer since process start
//! or an explicit reset, which guarantees the next discovery quizzes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::types::Direction;

pub struct FlashcardScheduler {
    interval_ms: i64,
    last_trigger_at: i64,
    last_answer_at: i64,
    rng: StdRng,
}

impl FlashcardScheduler {
    pub fn new(interval_ms: i64, now_ms: i64) -> Self {
        Self {
            interval_ms,
            last_trigger_at: now_ms,
            last_answer_at: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests and reproducible sessions.
    pub fn with_seed(interval_ms: i64, now_ms: i64, seed: u64) -> Self {
        Self {
            interval_ms,
            last_trigger_at: now_ms,
            last_answer_at: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Whether a freshly discovered item should be quizzed right away.
    pub fn should_quiz_on_discovery(&self, now_ms: i64) -> bool {
        self.last_answer_at == 0 || now_ms - self.last_answer_at >= self.interval_ms
    }

    /// Whether the periodic quiz interval has elapsed.
    pub fn tick_due(&self, now_ms: i64) -> bool {
        now_ms - self.last_trigger_at >= self.interval_ms
    }

    /// Restart the idle-interval clock after a trigger fired (whether or
    /// not a quiz actually started).
    pub fn mark_triggered(&mut self, now_ms: i64) {
        self.last_trigger_at = now_ms;
    }

    /// Any judged submission restarts both clocks, preventing back-to-back
    /// quizzes.
    pub fn on_answered(&mut self, now_ms: i64) {
        self.last_answer_at = now_ms;
        self.last_trigger_at = now_ms;
    }

    /// Zero the answer clock so the next discovery or due tick is
    /// guaranteed to quiz (first-quiz-after-joining policy).
    pub fn reset_answer_clock(&mut self) {
        self.last_answer_at = 0;
    }

    /// Adopt a persisted answer timestamp at startup.
    pub fn restore_answer_clock(&mut self, last_answer_ms: i64) {
        self.last_answer_at = last_answer_ms;
    }

    /// Pick a quiz uniformly at random: one key from the candidate pool,
    /// one of the two directions. `None` when the pool is empty.
    pub fn pick_quiz<'a>(&mut self, candidates: &[&'a str]) -> Option<(&'a str, Direction)> {
        let key = *candidates.choose(&mut self.rng)?;
        let direction = if self.rng.gen_bool(0.5) {
            Direction::NativeToTarget
        } else {
            Direction::TargetToNative
        };
        Some((key, direction))
    }

    pub fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: i64) {
        self.interval_ms = interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: i64 = 5 * 60 * 1000;

    fn scheduler(now_ms: i64) -> FlashcardScheduler {
        FlashcardScheduler::with_seed(INTERVAL, now_ms, 7)
    }

    #[test]
    fn tick_not_due_before_interval() {
        let s = scheduler(10_000);
        assert!(!s.tick_due(10_000 + INTERVAL - 1));
        assert!(s.tick_due(10_000 + INTERVAL));
        assert!(s.tick_due(10_000 + INTERVAL + 1));
    }

    #[test]
    fn answering_restarts_the_tick_clock() {
        let mut s = scheduler(0);
        s.on_answered(INTERVAL);
        assert!(!s.tick_due(INTERVAL + 1));
        assert!(s.tick_due(2 * INTERVAL));
    }

    #[test]
    fn discovery_quizzes_when_never_answered() {
        let s = scheduler(0);
        assert!(s.should_quiz_on_discovery(1));
    }

    #[test]
    fn discovery_waits_out_the_interval_after_an_answer() {
        let mut s = scheduler(0);
        s.on_answered(1_000);
        assert!(!s.should_quiz_on_discovery(1_000 + INTERVAL - 1));
        assert!(s.should_quiz_on_discovery(1_000 + INTERVAL));
    }

    #[test]
    fn reset_answer_clock_forces_the_next_discovery_quiz() {
        let mut s = scheduler(0);
        s.on_answered(1_000);
        assert!(!s.should_quiz_on_discovery(1_001));
        s.reset_answer_clock();
        assert!(s.should_quiz_on_discovery(1_001));
    }

    #[test]
    fn restored_answer_clock_behaves_like_a_real_answer() {
        let mut s = scheduler(0);
        s.restore_answer_clock(1_000);
        assert!(!s.should_quiz_on_discovery(1_001));
    }

    #[test]
    fn empty_pool_picks_nothing() {
        let mut s = scheduler(0);
        assert!(s.pick_quiz(&[]).is_none());
    }

    #[test]
    fn single_candidate_is_always_picked() {
        let mut s = scheduler(0);
        let (key, _) = s.pick_quiz(&["item.x"]).unwrap();
        assert_eq!(key, "item.x");
    }

    #[test]
    fn picks_stay_within_the_pool() {
        let mut s = scheduler(0);
        let pool = ["item.a", "item.b", "item.c"];
        for _ in 0..50 {
            let (key, _) = s.pick_quiz(&pool).unwrap();
            assert!(pool.contains(&key));
        }
    }

    #[test]
    fn both_directions_occur() {
        let mut s = scheduler(0);
        let mut native_to_target = 0;
        let mut target_to_native = 0;
        for _ in 0..100 {
            match s.pick_quiz(&["item.x"]).unwrap().1 {
                Direction::NativeToTarget => native_to_target += 1,
                Direction::TargetToNative => target_to_native += 1,
            }
        }
        assert!(native_to_target > 0);
        assert!(target_to_native > 0);
    }
}
