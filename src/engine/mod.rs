//! Minimal build engine.
//!
//! Stands in for the host that executes builds: it owns build numbering and
//! records, and fires lifecycle events through a [`ListenerRegistry`] with
//! the link synchronizer registered. Build steps themselves are not run;
//! callers report the final result.

use tracing::info;

use crate::context::ServiceContext;
use crate::error::HistoryError;
use crate::lifecycle::{ListenerRegistry, TaskListener};
use crate::model::{Build, BuildNumber, BuildResult, BuildState, Job};
use crate::resolver::HistoryResolver;
use crate::store::BuildStore;
use crate::sync::{self, LegacyLinkSynchronizer, RefreshReport};

/// Records builds and dispatches their lifecycle events.
pub struct BuildEngine<'a> {
    ctx: &'a ServiceContext,
    store: BuildStore<'a>,
    resolver: HistoryResolver<'a>,
}

impl<'a> BuildEngine<'a> {
    /// Creates an engine over a service context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            store: BuildStore::new(ctx.fs.as_ref()),
            resolver: HistoryResolver::new(ctx.fs.as_ref()),
        }
    }

    /// The resolver backing this engine's permalinks.
    #[must_use]
    pub fn resolver(&self) -> &HistoryResolver<'a> {
        &self.resolver
    }

    /// The build record store.
    #[must_use]
    pub fn store(&self) -> &BuildStore<'a> {
        &self.store
    }

    fn registry(&self) -> ListenerRegistry<'_> {
        let mut registry = ListenerRegistry::new();
        registry.register(LegacyLinkSynchronizer::new(self.ctx.links.as_ref(), &self.resolver));
        registry
    }

    /// Starts the next build of `job`.
    ///
    /// # Errors
    ///
    /// Returns an error if the job directories or the record cannot be written.
    pub fn start(&self, job: &Job, listener: &mut dyn TaskListener) -> Result<Build, HistoryError> {
        for dir in [&job.root_dir, &job.builds_dir] {
            self.ctx.fs.create_dir_all(dir).map_err(|e| HistoryError::Storage {
                context: format!("creating {}", dir.display()),
                message: e.to_string(),
            })?;
        }
        let number = self.store.allocate_number(job)?;
        let build = Build::started(number, self.ctx.clock.now());
        self.store.save_build(job, &build)?;
        self.store.append_log(job, number, &format!("Build #{number}\n"))?;
        info!(job = %job.full_name, build = %number, "build started");

        self.registry().fire_started(job, &build, listener);
        Ok(build)
    }

    /// Records the final result of a running build.
    ///
    /// # Errors
    ///
    /// Returns an error if the build does not exist, already has a result,
    /// or its record cannot be written.
    pub fn complete(
        &self,
        job: &Job,
        number: BuildNumber,
        result: BuildResult,
        listener: &mut dyn TaskListener,
    ) -> Result<Build, HistoryError> {
        let mut build = self.store.load_build(job, number)?;
        if !build.is_building() {
            return Err(HistoryError::AlreadyCompleted { job: job.full_name.clone(), number: number.0 });
        }
        build.state = BuildState::Completed(result);
        build.completed_at = Some(self.ctx.clock.now());
        self.store.save_build(job, &build)?;
        self.store.append_log(job, number, &format!("Finished: {result}\n"))?;
        info!(job = %job.full_name, build = %number, %result, "build completed");

        self.registry().fire_completed(job, &build, listener);
        Ok(build)
    }

    /// Deletes a build in any lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the build does not exist or cannot be removed.
    pub fn delete(&self, job: &Job, number: BuildNumber) -> Result<Build, HistoryError> {
        let mut build = self.store.load_build(job, number)?;
        self.store.delete_build(job, number)?;
        build.state = BuildState::Deleted;
        info!(job = %job.full_name, build = %number, "build deleted");

        self.registry().fire_deleted(job, &build);
        Ok(build)
    }

    /// Runs reconciliation for `job` outside of any lifecycle event.
    pub fn refresh(&self, job: &Job, listener: &mut dyn TaskListener) -> RefreshReport {
        sync::refresh(self.ctx.links.as_ref(), &self.resolver, job, listener)
    }
}
