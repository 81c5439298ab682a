//! Core types and logic for Dojo.
//!
//! This module contains the static word and grammar tables, the question
//! sampler, and the quiz and review session controllers.

pub mod dataset;
pub mod question;
pub mod quiz;
pub mod review;
pub mod word;

pub use dataset::{Dataset, MIN_DATASET_WORDS};
pub use question::{pick, shuffle, AnswerOutcome, Question, QuestionCard, Sampler, CHOICE_COUNT};
pub use quiz::{MistakeDrill, QuestionCount, QuizSession, QuizStatus, QuizSummary};
pub use review::{ReviewSession, ReviewStatus};
pub use word::{GrammarEntry, GrammarExample, Word, WordId};
