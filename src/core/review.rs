//! Standalone review of persisted mistakes.
//!
//! The queue is every word currently in a missed state according to the
//! answer log. It is recomputed from the log after each answered question,
//! so a word answered correctly drops out on the next question.

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{AnswerOutcome, Dataset, QuestionCard, Sampler, Word, WordId};
use crate::error::{DojoError, FailOpen, Result};
use crate::stats::mistake_word_ids;
use crate::storage::AnswerLog;

/// Review phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// There was nothing to review when the session opened.
    Empty,
    /// Asking questions from the queue.
    Active,
    /// The queue has been emptied.
    Complete,
}

/// Drives a review of the learner's outstanding mistakes.
pub struct ReviewSession<'a, L: AnswerLog, R: Rng> {
    dataset: &'a Dataset,
    sampler: Sampler<'a>,
    log: L,
    rng: R,
    queue: Vec<Word>,
    card: Option<QuestionCard>,
    status: ReviewStatus,
}

impl<'a, L: AnswerLog> ReviewSession<'a, L, ThreadRng> {
    /// Open a review using the thread-local random generator.
    pub fn with_thread_rng(dataset: &'a Dataset, log: L) -> Self {
        Self::new(dataset, log, rand::thread_rng())
    }
}

impl<'a, L: AnswerLog, R: Rng> ReviewSession<'a, L, R> {
    /// Open a review seeded from the mistake queue in `log`.
    pub fn new(dataset: &'a Dataset, log: L, rng: R) -> Self {
        let mut session = Self {
            dataset,
            sampler: Sampler::new(dataset),
            log,
            rng,
            queue: Vec::new(),
            card: None,
            status: ReviewStatus::Active,
        };
        session.refresh_queue();
        session.ask_next();
        if session.card.is_none() {
            session.status = ReviewStatus::Empty;
        }
        tracing::debug!(words = session.queue.len(), "Review opened");
        session
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    /// Words still in the mistake queue, in table order.
    pub fn queue(&self) -> &[Word] {
        &self.queue
    }

    /// The question on screen.
    pub fn current(&self) -> Option<&QuestionCard> {
        self.card.as_ref()
    }

    /// Give the log back, ending the session.
    pub fn into_log(self) -> L {
        self.log
    }

    fn refresh_queue(&mut self) {
        let ids = mistake_word_ids(&self.log);
        self.queue = self
            .dataset
            .words()
            .iter()
            .filter(|w| ids.contains(&w.id))
            .cloned()
            .collect();
    }

    fn ask_next(&mut self) {
        self.card = self
            .sampler
            .sample(&self.queue, &HashSet::new(), &mut self.rng)
            .map(QuestionCard::new);
    }

    /// Select a choice for the question on screen.
    ///
    /// Only the first selection is recorded; later ones return `Ok(None)`.
    pub fn answer(&mut self, choice: WordId) -> Result<Option<AnswerOutcome>> {
        let card = self
            .card
            .as_mut()
            .ok_or_else(|| DojoError::invalid_state("no review question is being shown"))?;
        let Some(outcome) = card.select(choice)? else {
            return Ok(None);
        };
        self.log
            .append(outcome.word_id, outcome.is_correct)
            .map(|_| ())
            .fail_open_default("Recording review answer");
        Ok(Some(outcome))
    }

    /// Advance past an answered question, recomputing the queue.
    pub fn next(&mut self) -> Result<ReviewStatus> {
        if !self.card.as_ref().is_some_and(QuestionCard::is_answered) {
            return Err(DojoError::invalid_state(
                "answer the current question before moving on",
            ));
        }
        self.refresh_queue();
        self.ask_next();
        if self.card.is_none() {
            self.status = ReviewStatus::Complete;
            tracing::debug!("Review complete");
        }
        Ok(self.status)
    }
}
