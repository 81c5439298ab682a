//! CLI commands for Dojo.
//!
//! This module provides CLI commands for Dojo, organized into:
//! - **Study commands**: quiz, review (interactive, line-oriented)
//! - **Report commands**: stats, words, grammar
//! - **Maintenance**: reset

pub mod terminal;

// Study commands
pub mod quiz;
pub mod review;

// Report commands
pub mod grammar;
pub mod stats;
pub mod words;

// Maintenance
pub mod reset;

pub use grammar::GrammarCommand;
pub use quiz::QuizCommand;
pub use reset::ResetCommand;
pub use review::ReviewCommand;
pub use stats::StatsCommand;
pub use words::WordsCommand;
