//! Answer events, the single source of truth for every statistic.
//!
//! Events serialize as `{"wordId", "isCorrect", "timestamp"}` with the
//! timestamp in Unix milliseconds.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::WordId;

/// One submitted answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    /// The word that was asked.
    pub word_id: WordId,
    /// Whether the learner picked the right meaning.
    pub is_correct: bool,
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
}

impl AnswerEvent {
    /// Create an event stamped with the current time.
    pub fn new(word_id: WordId, is_correct: bool) -> Self {
        Self::with_timestamp(word_id, is_correct, Utc::now().timestamp_millis())
    }

    /// Create an event with a specific timestamp (for testing and replay).
    pub fn with_timestamp(word_id: WordId, is_correct: bool, timestamp: i64) -> Self {
        Self {
            word_id,
            is_correct,
            timestamp,
        }
    }

    /// Create the event that follows `log`, never stamped earlier than its
    /// last entry.
    pub fn next_after(log: &[AnswerEvent], word_id: WordId, is_correct: bool) -> Self {
        let mut event = Self::new(word_id, is_correct);
        if let Some(last) = log.last() {
            event.timestamp = event.timestamp.max(last.timestamp);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let event = AnswerEvent::with_timestamp(12, true, 1_700_000_000_000);
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains(r#""wordId":12"#));
        assert!(json.contains(r#""isCorrect":true"#));
        assert!(json.contains(r#""timestamp":1700000000000"#));
    }

    #[test]
    fn test_parses_existing_records() {
        let json = r#"[{"wordId":3,"isCorrect":false,"timestamp":1699999999999}]"#;
        let events: Vec<AnswerEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            events,
            vec![AnswerEvent::with_timestamp(3, false, 1_699_999_999_999)]
        );
    }

    #[test]
    fn test_new_uses_current_time() {
        let before = Utc::now().timestamp_millis();
        let event = AnswerEvent::new(1, true);
        assert!(event.timestamp >= before);
    }

    #[test]
    fn test_next_after_never_goes_backwards() {
        let far_future = Utc::now().timestamp_millis() + 60_000;
        let log = vec![AnswerEvent::with_timestamp(1, true, far_future)];

        let event = AnswerEvent::next_after(&log, 2, false);
        assert_eq!(event.timestamp, far_future);
        assert_eq!(event.word_id, 2);
        assert!(!event.is_correct);
    }

    #[test]
    fn test_next_after_empty_log() {
        let event = AnswerEvent::next_after(&[], 5, true);
        assert!(event.timestamp > 0);
    }
}
