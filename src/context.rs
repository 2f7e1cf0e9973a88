//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::link_fs::LiveLinkFs;
use crate::adapters::recording::link_fs::RecordingLinkFs;
use crate::journal::JournalRecorder;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::link_fs::LinkFs;

/// Bundles the port trait objects a command needs.
pub struct ServiceContext {
    /// Clock for build timestamps.
    pub clock: Box<dyn Clock>,
    /// Plain file access for build records.
    pub fs: Box<dyn FileSystem>,
    /// Symlink primitive.
    pub links: Box<dyn LinkFs>,
}

impl ServiceContext {
    /// Creates a context with live adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self { clock: Box::new(LiveClock), fs: Box::new(LiveFileSystem), links: Box::new(LiveLinkFs) }
    }

    /// Creates a live context whose symlink calls are journaled.
    ///
    /// The journal is written to `path` by [`JournalSession::finish`].
    #[must_use]
    pub fn journaling(path: &Path, name: &str) -> (Self, JournalSession) {
        let recorder = Arc::new(Mutex::new(JournalRecorder::new(path, name)));
        let ctx = Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            links: Box::new(RecordingLinkFs::new(Box::new(LiveLinkFs), Arc::clone(&recorder))),
        };
        (ctx, JournalSession { recorder })
    }
}

/// Handle for writing the journal of a journaling context.
pub struct JournalSession {
    recorder: Arc<Mutex<JournalRecorder>>,
}

impl JournalSession {
    /// Number of mutating calls journaled so far.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.recorder.lock().unwrap_or_else(PoisonError::into_inner).mutation_count()
    }

    /// Writes the journal file and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let guard = self.recorder.lock().unwrap_or_else(PoisonError::into_inner);
        guard.write().map_err(|e| format!("Failed to write journal: {e}"))
    }
}
