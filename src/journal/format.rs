//! Journal data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations that change the filesystem.
const MUTATING_OPS: [&str; 2] = ["create_symlink", "remove"];

/// A single recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name, e.g. `"links"`.
    pub port: String,
    /// Operation invoked on the port.
    pub op: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Returned value, using `{"Ok": v}` / `{"Err": msg}` for fallible calls.
    pub output: serde_json::Value,
}

impl JournalEntry {
    /// Returns `true` if this call could have changed the filesystem.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        MUTATING_OPS.contains(&self.op.as_str())
    }
}

/// A written journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journal {
    /// Human-readable name, usually the command that produced it.
    pub name: String,
    /// When the journal was written.
    pub recorded_at: DateTime<Utc>,
    /// Ordered entries.
    pub entries: Vec<JournalEntry>,
}

impl Journal {
    /// Entries that could have changed the filesystem.
    pub fn mutations(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(|e| e.is_mutation())
    }
}
