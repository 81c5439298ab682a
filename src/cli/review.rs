//! Review command for Dojo.
//!
//! Asks every word currently in the persisted mistake queue until the queue
//! is empty or the learner quits.

use std::io::{BufRead, Write};

use rand::Rng;
use serde::Serialize;

use crate::cli::terminal::{read_choice, render_feedback, render_question, Reply};
use crate::core::{ReviewSession, ReviewStatus};
use crate::error::Result;
use crate::storage::AnswerLog;

/// Output of an interactive review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutput {
    /// Words in the queue when the review opened.
    pub queued: usize,
    /// Questions answered.
    pub answered: u32,
    /// Answers that were correct.
    pub correct: u32,
    /// Words still in the queue at the end.
    pub remaining: usize,
    pub status: ReviewStatus,
}

/// The review command implementation.
pub struct ReviewCommand<'a, L: AnswerLog, R: Rng> {
    session: ReviewSession<'a, L, R>,
}

impl<'a, L: AnswerLog, R: Rng> ReviewCommand<'a, L, R> {
    pub fn new(session: ReviewSession<'a, L, R>) -> Self {
        Self { session }
    }

    /// Drive the review until the queue empties or the learner quits.
    pub fn run<I: BufRead, O: Write>(&mut self, input: &mut I, output: &mut O) -> Result<ReviewOutput> {
        let queued = self.session.queue().len();
        let mut answered = 0;
        let mut correct = 0;

        if self.session.status() == ReviewStatus::Empty {
            writeln!(output, "No mistakes to review.")?;
        }

        while self.session.status() == ReviewStatus::Active {
            let Some(card) = self.session.current() else {
                break;
            };
            let question = card.question().clone();
            let header = format!("[{} to review]", self.session.queue().len());
            render_question(output, &header, &question)?;

            let Reply::Choice(id) = read_choice(input, output, &question)? else {
                break;
            };
            if let Some(outcome) = self.session.answer(id)? {
                answered += 1;
                if outcome.is_correct {
                    correct += 1;
                }
                render_feedback(output, &question, &outcome)?;
            }
            self.session.next()?;
        }

        if self.session.status() == ReviewStatus::Complete {
            writeln!(output, "\nReview complete. No mistakes left.")?;
        }

        Ok(ReviewOutput {
            queued,
            answered,
            correct,
            remaining: self.session.queue().len(),
            status: self.session.status(),
        })
    }
}
