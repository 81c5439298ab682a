//! Dojo - vocabulary flashcard quiz core
//!
//! Dojo asks four-choice English to Japanese vocabulary questions, records
//! every answer in an append-only results log, and derives statistics and a
//! mistake review queue from that log on demand.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use core::{
    Dataset, GrammarEntry, Question, QuestionCard, QuestionCount, QuizSession, QuizStatus,
    QuizSummary, ReviewSession, ReviewStatus, Sampler, Word, WordId,
};
pub use error::{DojoError, Result};
pub use stats::{compute_stats, mistake_word_ids, AnswerEvent, StudyStats, WordStat};
pub use storage::{AnswerLog, FileAnswerLog, MemoryAnswerLog};

// CLI commands
pub use cli::{
    GrammarCommand, QuizCommand, ResetCommand, ReviewCommand, StatsCommand, WordsCommand,
};
