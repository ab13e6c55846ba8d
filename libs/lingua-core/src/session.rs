//! The single active quiz.
//!
//! At most one flashcard is ever awaiting an answer. Starting while one is
//! active is dropped silently; a correct answer or an explicit cancel
//! returns the session to idle. Retries of the same prompt are judged but
//! flagged so the caller records at most one attempt per prompt.

use crate::matching;
use crate::types::Direction;

/// Outcome of feeding one line of player text to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// Nothing awaiting, or the text was a command for the collaborator.
    Ignored,
    Judged {
        key: String,
        expected: String,
        correct: bool,
        /// False once a wrong submission for this prompt has been counted;
        /// callers use this to avoid double-counting attempts.
        first_judgement: bool,
    },
}

pub struct FlashcardSession {
    command_prefix: String,
    target_key: Option<String>,
    expected_answer: Option<String>,
    direction: Direction,
    awaiting_answer: bool,
    is_retry: bool,
}

impl FlashcardSession {
    pub fn new(command_prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: command_prefix.into(),
            target_key: None,
            expected_answer: None,
            direction: Direction::NativeToTarget,
            awaiting_answer: false,
            is_retry: false,
        }
    }

    /// Begin a quiz for `key`. Returns false (changing nothing) while an
    /// answer is still pending: the current quiz always wins.
    pub fn start(&mut self, key: &str, native: &str, target: &str, direction: Direction) -> bool {
        if self.awaiting_answer {
            return false;
        }
        self.target_key = Some(key.to_string());
        self.expected_answer = Some(match direction {
            Direction::NativeToTarget => target.to_string(),
            Direction::TargetToNative => native.to_string(),
        });
        self.direction = direction;
        self.awaiting_answer = true;
        self.is_retry = false;
        true
    }

    /// Judge a line of submitted text against the expected answer.
    ///
    /// Command-prefixed text is never consumed as an answer. A correct
    /// judgement ends the quiz; an incorrect one keeps it open for another
    /// try, with `is_retry` set after the first miss.
    pub fn submit(&mut self, text: &str) -> SessionReply {
        if !self.awaiting_answer || text.starts_with(&self.command_prefix) {
            return SessionReply::Ignored;
        }
        let (Some(key), Some(expected)) = (self.target_key.clone(), self.expected_answer.clone())
        else {
            return SessionReply::Ignored;
        };

        let correct = matching::matches(text, &expected);
        let first_judgement = !self.is_retry;

        if correct {
            self.clear();
        } else {
            self.is_retry = true;
        }

        SessionReply::Judged {
            key,
            expected,
            correct,
            first_judgement,
        }
    }

    /// Force the session back to idle from any state.
    pub fn cancel(&mut self) {
        self.clear();
    }

    pub fn awaiting_answer(&self) -> bool {
        self.awaiting_answer
    }

    pub fn current_key(&self) -> Option<&str> {
        self.target_key.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn clear(&mut self) {
        self.target_key = None;
        self.expected_answer = None;
        self.awaiting_answer = false;
        self.is_retry = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> FlashcardSession {
        let mut session = FlashcardSession::new("/");
        assert!(session.start("item.x", "Stone", "Piedra", Direction::NativeToTarget));
        session
    }

    fn judged(reply: SessionReply) -> (bool, bool) {
        match reply {
            SessionReply::Judged {
                correct,
                first_judgement,
                ..
            } => (correct, first_judgement),
            SessionReply::Ignored => panic!("expected a judgement"),
        }
    }

    #[test]
    fn idle_session_ignores_text() {
        let mut session = FlashcardSession::new("/");
        assert_eq!(session.submit("piedra"), SessionReply::Ignored);
    }

    #[test]
    fn commands_are_never_consumed() {
        let mut session = started();
        assert_eq!(session.submit("/progress"), SessionReply::Ignored);
        assert!(session.awaiting_answer());
    }

    #[test]
    fn direction_selects_the_expected_answer() {
        let mut session = FlashcardSession::new("/");
        session.start("item.x", "Stone", "Piedra", Direction::TargetToNative);
        let (correct, _) = judged(session.submit("stone"));
        assert!(correct);
    }

    #[test]
    fn correct_answer_ends_the_quiz() {
        let mut session = started();
        let (correct, first) = judged(session.submit("piedra"));
        assert!(correct);
        assert!(first);
        assert!(!session.awaiting_answer());
        assert_eq!(session.current_key(), None);
    }

    #[test]
    fn incorrect_answer_keeps_the_quiz_open() {
        let mut session = started();
        let (correct, first) = judged(session.submit("zanahoria"));
        assert!(!correct);
        assert!(first);
        assert!(session.awaiting_answer());
    }

    #[test]
    fn only_the_first_miss_counts() {
        let mut session = started();
        let (_, first) = judged(session.submit("zanahoria"));
        assert!(first);
        let (_, second) = judged(session.submit("calabaza"));
        assert!(!second);
        let (correct, counted) = judged(session.submit("piedra"));
        assert!(correct);
        assert!(!counted);
    }

    #[test]
    fn start_while_active_is_dropped() {
        let mut session = started();
        assert!(!session.start("item.y", "Dirt", "Tierra", Direction::NativeToTarget));
        assert_eq!(session.current_key(), Some("item.x"));

        let (correct, _) = judged(session.submit("piedra"));
        assert!(correct);
    }

    #[test]
    fn cancel_forces_idle() {
        let mut session = started();
        session.cancel();
        assert!(!session.awaiting_answer());
        assert_eq!(session.submit("piedra"), SessionReply::Ignored);

        // A fresh quiz can start afterwards.
        assert!(session.start("item.y", "Dirt", "Tierra", Direction::NativeToTarget));
    }

    #[test]
    fn retry_flag_resets_for_a_new_quiz() {
        let mut session = started();
        judged(session.submit("wrongg"));
        judged(session.submit("piedra no"));
        judged(session.submit("piedra"));

        session.start("item.x", "Stone", "Piedra", Direction::NativeToTarget);
        let (_, first) = judged(session.submit("nope nope"));
        assert!(first);
    }
}
