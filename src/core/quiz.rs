//! Quiz session controller.
//!
//! A quiz moves through `Start -> Playing -> End`. From `End` the learner can
//! drill the words missed in this run (`ReviewingMistakes`) until every one
//! has been answered correctly (`ReviewComplete`).
//!
//! Answering and advancing are separate steps: an answer is recorded
//! immediately, and [`QuizSession::next`] moves on when the learner asks.

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{AnswerOutcome, Dataset, QuestionCard, Sampler, Word, WordId};
use crate::error::{DojoError, FailOpen, Result};
use crate::stats::{success_rate, RateBand};
use crate::storage::AnswerLog;

/// How many questions the learner asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCount {
    /// One of the configured preset sizes (30, 100, ...).
    Preset(u32),
    /// Every word in the table.
    All,
    /// A number typed in by the learner.
    Custom(u32),
}

impl QuestionCount {
    /// Resolve to a concrete count clamped to `[1, dataset_size]`.
    pub fn resolve(self, dataset_size: usize) -> usize {
        let requested = match self {
            Self::Preset(n) | Self::Custom(n) => n as usize,
            Self::All => dataset_size,
        };
        requested.clamp(1, dataset_size.max(1))
    }
}

/// Quiz phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    /// Choosing a question count.
    #[default]
    Start,
    /// Answering questions.
    Playing,
    /// Showing the results of the finished run.
    End,
    /// Drilling the words missed in the finished run.
    ReviewingMistakes,
    /// Every missed word has been answered correctly.
    ReviewComplete,
}

impl QuizStatus {
    /// Whether a new run can begin from this phase.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Start | Self::End | Self::ReviewComplete)
    }

    /// Whether a question is on screen.
    pub fn is_asking(&self) -> bool {
        matches!(self, Self::Playing | Self::ReviewingMistakes)
    }
}

/// Results of one finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSummary {
    /// Questions answered.
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub rate: u32,
    pub band: RateBand,
    /// Missed words in the order they were asked.
    pub mistakes: Vec<Word>,
}

/// Working set for re-asking the words missed in one run.
///
/// A word leaves the set when answered correctly; a wrong answer keeps it.
#[derive(Debug, Clone, PartialEq)]
pub struct MistakeDrill {
    remaining: Vec<Word>,
    card: Option<QuestionCard>,
}

impl MistakeDrill {
    fn new(mistakes: Vec<Word>) -> Self {
        Self {
            remaining: mistakes,
            card: None,
        }
    }

    /// Words still to be answered correctly.
    pub fn remaining(&self) -> &[Word] {
        &self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    fn master(&mut self, word_id: WordId) {
        self.remaining.retain(|w| w.id != word_id);
    }
}

/// Drives one quiz run and its follow-up mistake drill.
pub struct QuizSession<'a, L: AnswerLog, R: Rng> {
    dataset: &'a Dataset,
    sampler: Sampler<'a>,
    log: L,
    rng: R,
    status: QuizStatus,
    total_count: usize,
    index: usize,
    used_ids: HashSet<WordId>,
    card: Option<QuestionCard>,
    correct: u32,
    mistakes: Vec<Word>,
    drill: Option<MistakeDrill>,
}

impl<'a, L: AnswerLog> QuizSession<'a, L, ThreadRng> {
    /// Create a session using the thread-local random generator.
    pub fn with_thread_rng(dataset: &'a Dataset, log: L) -> Self {
        Self::new(dataset, log, rand::thread_rng())
    }
}

impl<'a, L: AnswerLog, R: Rng> QuizSession<'a, L, R> {
    /// Create a session in the `Start` phase.
    pub fn new(dataset: &'a Dataset, log: L, rng: R) -> Self {
        Self {
            dataset,
            sampler: Sampler::new(dataset),
            log,
            rng,
            status: QuizStatus::Start,
            total_count: 0,
            index: 0,
            used_ids: HashSet::new(),
            card: None,
            correct: 0,
            mistakes: Vec::new(),
            drill: None,
        }
    }

    pub fn status(&self) -> QuizStatus {
        self.status
    }

    /// Number of questions in the current run.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 1-based position of the current question in the run.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// The question on screen, in either the run or the drill.
    pub fn current(&self) -> Option<&QuestionCard> {
        match self.status {
            QuizStatus::Playing => self.card.as_ref(),
            QuizStatus::ReviewingMistakes => self.drill.as_ref().and_then(|d| d.card.as_ref()),
            _ => None,
        }
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    /// Words missed so far in this run.
    pub fn mistakes(&self) -> &[Word] {
        &self.mistakes
    }

    /// The mistake drill, once entered.
    pub fn drill(&self) -> Option<&MistakeDrill> {
        self.drill.as_ref()
    }

    /// Give the log back, ending the session.
    pub fn into_log(self) -> L {
        self.log
    }

    /// Begin a new run of `count` questions.
    pub fn start(&mut self, count: QuestionCount) -> Result<()> {
        if !self.status.can_start() {
            return Err(DojoError::invalid_state(format!(
                "cannot start a quiz while {:?}",
                self.status
            )));
        }
        let total = count.resolve(self.dataset.len());
        self.begin(total);
        Ok(())
    }

    /// Run again with the same question count.
    pub fn retry(&mut self) -> Result<()> {
        if self.total_count == 0 || !matches!(self.status, QuizStatus::End | QuizStatus::ReviewComplete)
        {
            return Err(DojoError::invalid_state(format!(
                "nothing to retry while {:?}",
                self.status
            )));
        }
        self.begin(self.total_count);
        Ok(())
    }

    /// Drop everything and go back to count selection.
    pub fn back_to_start(&mut self) {
        self.reset(0);
        self.status = QuizStatus::Start;
        tracing::debug!("Quiz back to start");
    }

    fn reset(&mut self, total: usize) {
        self.total_count = total;
        self.index = 0;
        self.used_ids.clear();
        self.card = None;
        self.correct = 0;
        self.mistakes.clear();
        self.drill = None;
    }

    fn begin(&mut self, total: usize) {
        self.reset(total);
        self.status = QuizStatus::Playing;
        tracing::debug!(total, "Quiz started");
        self.ask_next();
    }

    /// Sample the next run question, ending the run if none is left.
    fn ask_next(&mut self) {
        match self
            .sampler
            .sample(self.dataset.words(), &self.used_ids, &mut self.rng)
        {
            Some(question) => self.card = Some(QuestionCard::new(question)),
            None => {
                tracing::debug!(asked = self.used_ids.len(), "Word table exhausted, ending quiz early");
                self.card = None;
                self.status = QuizStatus::End;
            }
        }
    }

    /// Select a choice for the question on screen.
    ///
    /// The first selection is recorded in the answer log; any further
    /// selection before [`next`](Self::next) returns `Ok(None)`.
    pub fn answer(&mut self, choice: WordId) -> Result<Option<AnswerOutcome>> {
        let outcome = match self.status {
            QuizStatus::Playing => {
                let card = self
                    .card
                    .as_mut()
                    .ok_or_else(|| DojoError::invalid_state("no question is being shown"))?;
                let Some(outcome) = card.select(choice)? else {
                    return Ok(None);
                };
                if outcome.is_correct {
                    self.correct += 1;
                } else {
                    self.mistakes.push(card.question().correct.clone());
                }
                outcome
            }
            QuizStatus::ReviewingMistakes => {
                let drill = self
                    .drill
                    .as_mut()
                    .ok_or_else(|| DojoError::invalid_state("mistake drill not started"))?;
                let card = drill
                    .card
                    .as_mut()
                    .ok_or_else(|| DojoError::invalid_state("no question is being shown"))?;
                let Some(outcome) = card.select(choice)? else {
                    return Ok(None);
                };
                if outcome.is_correct {
                    drill.master(outcome.word_id);
                }
                outcome
            }
            status => {
                return Err(DojoError::invalid_state(format!(
                    "cannot answer while {:?}",
                    status
                )))
            }
        };

        self.log
            .append(outcome.word_id, outcome.is_correct)
            .map(|_| ())
            .fail_open_default("Recording answer");
        Ok(Some(outcome))
    }

    /// Advance past an answered question.
    pub fn next(&mut self) -> Result<QuizStatus> {
        match self.status {
            QuizStatus::Playing => {
                let word_id = answered_word(self.card.as_ref())?;
                self.used_ids.insert(word_id);
                if self.index + 1 >= self.total_count {
                    self.card = None;
                    self.status = QuizStatus::End;
                    tracing::debug!(correct = self.correct, "Quiz finished");
                } else {
                    self.index += 1;
                    self.ask_next();
                }
            }
            QuizStatus::ReviewingMistakes => {
                let drill = self
                    .drill
                    .as_mut()
                    .ok_or_else(|| DojoError::invalid_state("mistake drill not started"))?;
                answered_word(drill.card.as_ref())?;
                drill.card = self
                    .sampler
                    .sample(&drill.remaining, &HashSet::new(), &mut self.rng)
                    .map(QuestionCard::new);
                if drill.card.is_none() {
                    self.status = QuizStatus::ReviewComplete;
                    tracing::debug!("Mistake drill complete");
                }
            }
            status => {
                return Err(DojoError::invalid_state(format!(
                    "cannot advance while {:?}",
                    status
                )))
            }
        }
        Ok(self.status)
    }

    /// Results of the finished run.
    pub fn summary(&self) -> Option<QuizSummary> {
        if matches!(self.status, QuizStatus::Start | QuizStatus::Playing) {
            return None;
        }
        let incorrect = self.mistakes.len() as u32;
        let total = self.correct + incorrect;
        let rate = success_rate(self.correct, total);
        Some(QuizSummary {
            total,
            correct: self.correct,
            incorrect,
            rate,
            band: RateBand::of(rate),
            mistakes: self.mistakes.clone(),
        })
    }

    /// Whether the finished run left mistakes to drill.
    pub fn can_review_mistakes(&self) -> bool {
        self.status == QuizStatus::End && !self.mistakes.is_empty()
    }

    /// Start drilling the words missed in this run.
    pub fn review_mistakes(&mut self) -> Result<()> {
        if !self.can_review_mistakes() {
            return Err(DojoError::invalid_state(
                "mistake review needs a finished quiz with at least one mistake",
            ));
        }
        let mut drill = MistakeDrill::new(self.mistakes.clone());
        drill.card = self
            .sampler
            .sample(&drill.remaining, &HashSet::new(), &mut self.rng)
            .map(QuestionCard::new);
        self.status = if drill.card.is_some() {
            QuizStatus::ReviewingMistakes
        } else {
            QuizStatus::ReviewComplete
        };
        tracing::debug!(words = drill.remaining.len(), "Mistake drill started");
        self.drill = Some(drill);
        Ok(())
    }
}

fn answered_word(card: Option<&QuestionCard>) -> Result<WordId> {
    match card.and_then(QuestionCard::outcome) {
        Some(outcome) => Ok(outcome.word_id),
        None => Err(DojoError::invalid_state(
            "answer the current question before moving on",
        )),
    }
}
