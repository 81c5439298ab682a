//! Results log storage for Dojo.
//!
//! This module provides the append-only answer log, with a file-based
//! backend for real use and an in-memory backend for tests.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileAnswerLog;
pub use memory::MemoryAnswerLog;
pub use traits::AnswerLog;
