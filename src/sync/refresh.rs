//! Reconciliation of permalink links against the resolver.

use std::path::Path;

use tracing::{debug, warn};

use crate::lifecycle::TaskListener;
use crate::model::{Job, NO_TARGET};
use crate::ports::{LinkFs, PermalinkResolver};

/// What a reconciliation pass did, per permalink id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// The builds directory was missing, so nothing was examined.
    pub skipped: bool,
    /// Links that already matched and were left alone.
    pub up_to_date: Vec<String>,
    /// Links that were rewritten.
    pub relinked: Vec<String>,
    /// Links left stale or missing because a filesystem call failed.
    pub failed: Vec<String>,
}

impl RefreshReport {
    /// Returns `true` if the pass wrote nothing to disk.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        self.relinked.is_empty() && self.failed.is_empty()
    }
}

/// Brings every permalink link of `job` in line with the resolver.
///
/// A missing builds directory means the job has no data yet and nothing is
/// created. Links that already carry the resolved value are not touched.
/// Permalinks are handled independently: a failure on one is logged and the
/// pass moves to the next.
pub fn refresh(
    links: &dyn LinkFs,
    resolver: &dyn PermalinkResolver,
    job: &Job,
    listener: &mut dyn TaskListener,
) -> RefreshReport {
    let builds_dir = &job.builds_dir;
    let mut report = RefreshReport::default();
    if !links.is_dir(builds_dir) {
        debug!(job = %job.full_name, dir = %builds_dir.display(), "no builds directory, nothing to refresh");
        report.skipped = true;
        return report;
    }

    for permalink in resolver.list_permalinks(job) {
        let id = permalink.id();
        let path = job.permalink_path(id);
        let target = resolver
            .resolve(&permalink, job)
            .map_or_else(|| NO_TARGET.to_string(), |build| build.number.to_string());

        match links.read_link(&path) {
            Ok(Some(current)) if current == target => {
                debug!(link = id, %target, dir = %builds_dir.display(), "not touching up-to-date link");
                report.up_to_date.push(id.to_string());
                continue;
            }
            Ok(_) => {}
            Err(e) => warn!(link = id, error = %e, "could not read permalink link, rewriting"),
        }

        if let Err(e) = links.remove(&path) {
            warn!(link = id, error = %e, "failed to delete {}", path.display());
            report.failed.push(id.to_string());
            continue;
        }

        debug!(link = id, %target, dir = %builds_dir.display(), "linking");
        match links.create_symlink(builds_dir, Path::new(&target), id) {
            Ok(()) => report.relinked.push(id.to_string()),
            Err(e) => {
                if e.is_interrupted() {
                    warn!(link = id, error = %e, "interrupted writing permalink link");
                } else {
                    warn!(link = id, error = %e, "failed to write permalink link");
                }
                listener.log(&format!("Failed to create symlink {} -> {target}: {e}", path.display()));
                report.failed.push(id.to_string());
            }
        }
    }

    report
}
