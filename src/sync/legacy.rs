//! Legacy links in the job root.
//!
//! Older layouts exposed `lastSuccessful` and `lastStable` directly under the
//! job root, pointing at a build. These are now kept as aliases that
//! indirect through the permalink link of the same meaning, so they never
//! need updating once the permalink link is maintained. They are rewritten
//! on every build start because the builds directory can be relocated by
//! configuration between builds.

use tracing::{debug, warn};

use crate::lifecycle::TaskListener;
use crate::model::{Job, LEGACY_LINKS};
use crate::ports::LinkFs;

/// Writes every legacy link for `job`.
///
/// Failures are logged and otherwise ignored; a missing legacy link must not
/// hold up the build.
pub fn create_legacy_links(links: &dyn LinkFs, job: &Job, listener: &mut dyn TaskListener) {
    for (name, permalink_id) in LEGACY_LINKS {
        create_legacy_link(links, job, listener, name, permalink_id);
    }
}

/// Writes `<root>/<name>` pointing at the link of `permalink_id`.
///
/// Returns `true` if the link was written.
pub fn create_legacy_link(
    links: &dyn LinkFs,
    job: &Job,
    listener: &mut dyn TaskListener,
    name: &str,
    permalink_id: &str,
) -> bool {
    let target = job.layout().legacy_target(permalink_id);
    match links.create_symlink(&job.root_dir, &target, name) {
        Ok(()) => {
            debug!(job = %job.full_name, name, target = %target.display(), "wrote legacy link");
            true
        }
        Err(e) => {
            if e.is_interrupted() {
                warn!(job = %job.full_name, name, error = %e, "interrupted writing legacy link");
            } else {
                warn!(job = %job.full_name, name, error = %e, "failed to write legacy link");
            }
            listener.log(&format!(
                "Failed to create symlink {} -> {}: {e}",
                job.legacy_path(name).display(),
                target.display()
            ));
            false
        }
    }
}
