//! In-memory answer log for testing.
//!
//! This module provides a thread-safe in-memory implementation of the
//! AnswerLog trait, primarily for use in unit tests.

use std::sync::RwLock;

use crate::core::WordId;
use crate::error::Result;
use crate::stats::AnswerEvent;
use crate::storage::AnswerLog;

/// In-memory answer log for testing.
///
/// Events are lost when the log is dropped.
#[derive(Debug, Default)]
pub struct MemoryAnswerLog {
    events: RwLock<Vec<AnswerEvent>>,
}

impl MemoryAnswerLog {
    /// Create a new empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with events, e.g. to replay a history.
    pub fn with_events(events: Vec<AnswerEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Get the number of events in the log.
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }
}

impl AnswerLog for MemoryAnswerLog {
    fn append(&self, word_id: WordId, is_correct: bool) -> Result<AnswerEvent> {
        let mut events = self.events.write().unwrap();
        let event = AnswerEvent::next_after(&events, word_id, is_correct);
        events.push(event);
        Ok(event)
    }

    fn read_all(&self) -> Result<Vec<AnswerEvent>> {
        Ok(self.events.read().unwrap().clone())
    }

    fn clear(&self) -> Result<()> {
        self.events.write().unwrap().clear();
        Ok(())
    }
}
