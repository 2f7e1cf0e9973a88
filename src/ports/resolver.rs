//! Permalink resolver port.

use crate::model::{Build, Job, Permalink};

/// Decides which build each permalink of a job currently names.
///
/// The synchronizer consumes this but never implements the rules itself.
/// Implementations must re-evaluate on every call; callers never cache.
pub trait PermalinkResolver: Send + Sync {
    /// Lists the permalinks declared for a job, in a stable order.
    fn list_permalinks(&self, job: &Job) -> Vec<Permalink>;

    /// Resolves a permalink against the job's current history.
    ///
    /// `None` means no build qualifies. That is a normal answer, not an error.
    fn resolve(&self, permalink: &Permalink, job: &Job) -> Option<Build>;
}
