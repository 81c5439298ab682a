//! Answer events and the statistics derived from them.
//!
//! The answer log is the source of truth. Statistics are recomputed from
//! the full log on every request.

pub mod deriver;
pub mod event;

pub use deriver::{
    compute_stats, mistake_word_ids, success_rate, AnsweredWord, Mastery, RateBand, StudyStats,
    WordStat,
};
pub use event::AnswerEvent;
