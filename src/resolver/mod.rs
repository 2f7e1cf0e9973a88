//! Default permalink resolver over stored build history.
//!
//! Each permalink names the newest completed build whose result satisfies
//! its rule. Builds still in progress never qualify, so a permalink only
//! moves once the final result (including post-build steps) is known.

use tracing::warn;

use crate::model::{Build, BuildResult, Job, Permalink};
use crate::ports::{FileSystem, PermalinkResolver};
use crate::store::BuildStore;

/// Selection rule for one well-known permalink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermalinkRule {
    /// Result is success.
    Stable,
    /// Result is success or unstable.
    Successful,
    /// Result is failure.
    Failed,
    /// Result is unstable.
    Unstable,
    /// Result is anything worse than success.
    Unsuccessful,
    /// Any result.
    Completed,
}

impl PermalinkRule {
    /// Every rule, in the order permalinks are declared for a job.
    pub const ALL: [Self; 6] = [
        Self::Stable,
        Self::Successful,
        Self::Failed,
        Self::Unstable,
        Self::Unsuccessful,
        Self::Completed,
    ];

    /// Link name of the permalink this rule drives.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Stable => Permalink::LAST_STABLE,
            Self::Successful => Permalink::LAST_SUCCESSFUL,
            Self::Failed => Permalink::LAST_FAILED,
            Self::Unstable => Permalink::LAST_UNSTABLE,
            Self::Unsuccessful => Permalink::LAST_UNSUCCESSFUL,
            Self::Completed => Permalink::LAST_COMPLETED,
        }
    }

    /// Looks up the rule for a permalink id.
    #[must_use]
    pub fn for_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.id() == id)
    }

    /// Returns `true` if a build with this result qualifies.
    #[must_use]
    pub fn accepts(self, result: BuildResult) -> bool {
        match self {
            Self::Stable => result == BuildResult::Success,
            Self::Successful => result.is_better_or_equal_to(BuildResult::Unstable),
            Self::Failed => result == BuildResult::Failure,
            Self::Unstable => result == BuildResult::Unstable,
            Self::Unsuccessful => result != BuildResult::Success,
            Self::Completed => true,
        }
    }

    /// Newest build in `history` satisfying this rule.
    #[must_use]
    pub fn select(self, history: &[Build]) -> Option<&Build> {
        history
            .iter()
            .filter(|b| b.result().is_some_and(|r| self.accepts(r)))
            .max_by_key(|b| b.number)
    }
}

/// Resolves permalinks by reading build records on every call.
pub struct HistoryResolver<'a> {
    store: BuildStore<'a>,
}

impl<'a> HistoryResolver<'a> {
    /// Creates a resolver reading build records through `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { store: BuildStore::new(fs) }
    }
}

impl PermalinkResolver for HistoryResolver<'_> {
    fn list_permalinks(&self, _job: &Job) -> Vec<Permalink> {
        PermalinkRule::ALL.iter().map(|rule| Permalink::new(rule.id())).collect()
    }

    fn resolve(&self, permalink: &Permalink, job: &Job) -> Option<Build> {
        let rule = PermalinkRule::for_id(permalink.id())?;
        let history = match self.store.list_builds(job) {
            Ok(history) => history,
            Err(e) => {
                warn!(job = %job.full_name, permalink = %permalink, error = %e, "cannot read build history");
                return None;
            }
        };
        rule.select(&history).cloned()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{BuildNumber, BuildState};
    use crate::store::tests::MemFs;

    fn build(n: u32, state: BuildState) -> Build {
        let mut b = Build::started(BuildNumber(n), Utc::now());
        b.state = state;
        b
    }

    fn done(n: u32, result: BuildResult) -> Build {
        build(n, BuildState::Completed(result))
    }

    fn pick(rule: PermalinkRule, history: &[Build]) -> Option<u32> {
        rule.select(history).map(|b| b.number.0)
    }

    #[test]
    fn rules_follow_result_severity() {
        let history = vec![
            done(1, BuildResult::Success),
            done(2, BuildResult::Unstable),
            done(3, BuildResult::Failure),
            done(4, BuildResult::Aborted),
            build(5, BuildState::InProgress),
        ];
        assert_eq!(pick(PermalinkRule::Stable, &history), Some(1));
        assert_eq!(pick(PermalinkRule::Successful, &history), Some(2));
        assert_eq!(pick(PermalinkRule::Unstable, &history), Some(2));
        assert_eq!(pick(PermalinkRule::Failed, &history), Some(3));
        assert_eq!(pick(PermalinkRule::Unsuccessful, &history), Some(4));
        assert_eq!(pick(PermalinkRule::Completed, &history), Some(4));
    }

    #[test]
    fn empty_history_resolves_to_nothing() {
        for rule in PermalinkRule::ALL {
            assert_eq!(pick(rule, &[]), None);
        }
    }

    #[test]
    fn ids_round_trip() {
        for rule in PermalinkRule::ALL {
            assert_eq!(PermalinkRule::for_id(rule.id()), Some(rule));
        }
        assert_eq!(PermalinkRule::for_id("lastBuild"), None);
    }

    #[test]
    fn resolver_reads_history_each_time() {
        let fs = MemFs::default();
        let store = BuildStore::new(&fs);
        let resolver = HistoryResolver::new(&fs);
        let job = Job::new("p", "/jobs/p");
        let stable = Permalink::new(Permalink::LAST_STABLE);

        assert_eq!(resolver.resolve(&stable, &job), None);

        store.save_build(&job, &done(1, BuildResult::Success)).unwrap();
        assert_eq!(resolver.resolve(&stable, &job).map(|b| b.number), Some(BuildNumber(1)));

        store.save_build(&job, &done(2, BuildResult::Success)).unwrap();
        assert_eq!(resolver.resolve(&stable, &job).map(|b| b.number), Some(BuildNumber(2)));

        store.delete_build(&job, BuildNumber(2)).unwrap();
        assert_eq!(resolver.resolve(&stable, &job).map(|b| b.number), Some(BuildNumber(1)));
    }

    #[test]
    fn declares_all_well_known_permalinks() {
        let fs = MemFs::default();
        let ids: Vec<String> = HistoryResolver::new(&fs)
            .list_permalinks(&Job::new("p", "/jobs/p"))
            .into_iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], Permalink::LAST_STABLE);
        assert_eq!(ids[1], Permalink::LAST_SUCCESSFUL);
    }
}
