//! Keeps permalink links and their legacy aliases in step with build events.
//!
//! Two duties, both driven from [`LegacyLinkSynchronizer`]:
//!
//! - on start, write the legacy links in the job root ([`legacy`]);
//! - on completion or deletion, repair every permalink link in the builds
//!   directory to match the resolver ([`refresh`]).
//!
//! Nothing here returns an error to the dispatcher. Each failing filesystem
//! call is logged and the remaining work carries on; the next event for the
//! job repairs whatever was left stale.

pub mod legacy;
pub mod refresh;

#[cfg(test)]
pub(crate) mod fakes;

pub use legacy::create_legacy_links;
pub use refresh::{refresh, RefreshReport};

use crate::lifecycle::{NullListener, RunListener, TaskListener};
use crate::model::{Build, Job};
use crate::ports::{LinkFs, PermalinkResolver};

/// Lifecycle handler that maintains legacy links and permalink links.
///
/// Holds no state of its own, so one instance can serve any number of jobs.
/// Events for the same job are expected to arrive one at a time.
pub struct LegacyLinkSynchronizer<'a> {
    links: &'a dyn LinkFs,
    resolver: &'a dyn PermalinkResolver,
}

impl<'a> LegacyLinkSynchronizer<'a> {
    /// Runs after handlers at the default ordinal, so the resolver has
    /// already absorbed the event when reconciliation reads it.
    pub const ORDINAL: i32 = -100;

    /// Creates a synchronizer over the given link primitive and resolver.
    #[must_use]
    pub fn new(links: &'a dyn LinkFs, resolver: &'a dyn PermalinkResolver) -> Self {
        Self { links, resolver }
    }
}

impl RunListener for LegacyLinkSynchronizer<'_> {
    fn ordinal(&self) -> i32 {
        Self::ORDINAL
    }

    fn on_started(&self, job: &Job, _build: &Build, listener: &mut dyn TaskListener) {
        create_legacy_links(self.links, job, listener);
    }

    fn on_completed(&self, job: &Job, _build: &Build, listener: &mut dyn TaskListener) {
        refresh(self.links, self.resolver, job, listener);
    }

    fn on_deleted(&self, job: &Job, _build: &Build) {
        refresh(self.links, self.resolver, job, &mut NullListener);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;

    use super::fakes::{FixedResolver, MemLinkFs};
    use super::*;
    use crate::lifecycle::{ListenerRegistry, StreamListener};
    use crate::model::{BuildNumber, Permalink};

    #[test]
    fn started_writes_legacy_links_only() {
        let job = Job::new("p", "/j/p");
        let links = MemLinkFs::with_dirs(&[&job.root_dir, &job.builds_dir]);
        let resolver = FixedResolver::new(&[(Permalink::LAST_STABLE, Some(1))]);
        let sync = LegacyLinkSynchronizer::new(&links, &resolver);

        sync.on_started(&job, &Build::started(BuildNumber(1), Utc::now()), &mut NullListener);

        assert_eq!(links.link(&job.root_dir.join("lastStable")).as_deref(), Some("builds/lastStableBuild"));
        assert_eq!(
            links.link(&job.root_dir.join("lastSuccessful")).as_deref(),
            Some("builds/lastSuccessfulBuild")
        );
        assert_eq!(links.link(&job.permalink_path(Permalink::LAST_STABLE)), None);
    }

    #[test]
    fn completed_and_deleted_both_reconcile() {
        let job = Job::new("p", "/j/p");
        let links = MemLinkFs::with_dirs(&[&job.root_dir, &job.builds_dir]);
        let resolver = FixedResolver::new(&[(Permalink::LAST_STABLE, Some(2))]);
        let sync = LegacyLinkSynchronizer::new(&links, &resolver);
        let build = Build::started(BuildNumber(2), Utc::now());

        sync.on_completed(&job, &build, &mut NullListener);
        assert_eq!(links.link(&job.permalink_path(Permalink::LAST_STABLE)).as_deref(), Some("2"));

        resolver.set(Permalink::LAST_STABLE, Some(1));
        sync.on_deleted(&job, &build);
        assert_eq!(links.link(&job.permalink_path(Permalink::LAST_STABLE)).as_deref(), Some("1"));
    }

    #[test]
    fn registers_after_default_handlers() {
        let job = Job::new("p", "/j/p");
        let links = MemLinkFs::with_dirs(&[&PathBuf::from("/j/p"), &job.builds_dir]);
        let resolver = FixedResolver::new(&[]);
        let mut registry = ListenerRegistry::new();
        registry.register(LegacyLinkSynchronizer::new(&links, &resolver));
        assert_eq!(registry.len(), 1);

        let mut console = StreamListener::new(Vec::new());
        registry.fire_started(&job, &Build::started(BuildNumber(1), Utc::now()), &mut console);
        assert!(links.link(&job.root_dir.join("lastStable")).is_some());
        assert_eq!(LegacyLinkSynchronizer::ORDINAL, -100);
    }
}
