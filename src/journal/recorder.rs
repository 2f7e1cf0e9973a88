//! Collects journal entries and writes them to disk.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Journal, JournalEntry};

/// Collects entries and writes them as a YAML journal file.
#[derive(Debug)]
pub struct JournalRecorder {
    path: PathBuf,
    name: String,
    entries: Vec<JournalEntry>,
    next_seq: u64,
}

impl JournalRecorder {
    /// Creates a recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), entries: Vec::new(), next_seq: 0 }
    }

    /// Appends an entry. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        op: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.entries.push(JournalEntry {
            seq: self.next_seq,
            port: port.into(),
            op: op.into(),
            input,
            output,
        });
        self.next_seq += 1;
    }

    /// Entries recorded so far.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of recorded entries that could have changed the filesystem.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_mutation()).count()
    }

    /// Writes the journal YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self) -> Result<PathBuf, std::io::Error> {
        let journal = Journal {
            name: self.name.clone(),
            recorded_at: Utc::now(),
            entries: self.entries.clone(),
        };
        let yaml = serde_yaml::to_string(&journal).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path.clone())
    }
}
