//! Answer log storage traits for Dojo.
//!
//! This module defines the `AnswerLog` trait for results persistence.

use std::sync::Arc;

use crate::core::WordId;
use crate::error::Result;
use crate::stats::AnswerEvent;

/// Trait for answer log backends.
///
/// Implementations keep events in insertion order, which is also
/// chronological order. Events are never edited or removed individually;
/// only the whole log can be cleared.
pub trait AnswerLog: Send + Sync {
    /// Append one answer stamped with the current time.
    ///
    /// Returns the event that was stored.
    fn append(&self, word_id: WordId, is_correct: bool) -> Result<AnswerEvent>;

    /// Read every event, oldest first.
    ///
    /// A missing log reads as empty.
    fn read_all(&self) -> Result<Vec<AnswerEvent>>;

    /// Delete the entire log.
    fn clear(&self) -> Result<()>;

    /// Number of events in the log.
    fn count(&self) -> Result<usize> {
        Ok(self.read_all()?.len())
    }
}

impl<T: AnswerLog + ?Sized> AnswerLog for Arc<T> {
    fn append(&self, word_id: WordId, is_correct: bool) -> Result<AnswerEvent> {
        (**self).append(word_id, is_correct)
    }

    fn read_all(&self) -> Result<Vec<AnswerEvent>> {
        (**self).read_all()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Lets a session borrow a log that the caller keeps using afterwards.
impl<T: AnswerLog + ?Sized> AnswerLog for &T {
    fn append(&self, word_id: WordId, is_correct: bool) -> Result<AnswerEvent> {
        (**self).append(word_id, is_correct)
    }

    fn read_all(&self) -> Result<Vec<AnswerEvent>> {
        (**self).read_all()
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// Test utilities for AnswerLog implementations.
#[cfg(test)]
pub mod tests {
    use super::*;

    /// Test helper to verify AnswerLog implementations.
    pub fn test_answer_log_contract<L: AnswerLog>(log: &L) {
        // Starts empty
        assert!(log.read_all().unwrap().is_empty());
        assert_eq!(log.count().unwrap(), 0);

        // Appends come back in order
        let answers = [(3, true), (1, false), (3, false), (2, true), (1, true)];
        for (word_id, is_correct) in answers {
            let event = log.append(word_id, is_correct).unwrap();
            assert_eq!(event.word_id, word_id);
            assert_eq!(event.is_correct, is_correct);
        }

        let events = log.read_all().unwrap();
        assert_eq!(events.len(), answers.len());
        for (event, (word_id, is_correct)) in events.iter().zip(answers) {
            assert_eq!(event.word_id, word_id);
            assert_eq!(event.is_correct, is_correct);
        }
        assert!(events
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        assert_eq!(log.count().unwrap(), answers.len());

        // Clear empties the log and is repeatable
        log.clear().unwrap();
        assert!(log.read_all().unwrap().is_empty());
        log.clear().unwrap();
        assert!(log.read_all().unwrap().is_empty());

        // Still usable after clearing
        log.append(9, true).unwrap();
        assert_eq!(log.count().unwrap(), 1);
    }
}
