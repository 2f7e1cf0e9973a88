//! Operation journal for symlink mutations.
//!
//! Wrapping the live link adapter in the recording adapter appends one entry
//! per call. The journal is written as YAML when a command finishes.

pub mod format;
pub mod recorder;

pub use format::{Journal, JournalEntry};
pub use recorder::JournalRecorder;
