//! Build lifecycle events and their ordered dispatch.
//!
//! Handlers declare a fixed ordinal when they are written. The registry
//! invokes them from the highest ordinal to the lowest, keeping registration
//! order among equal ordinals. Anything that maintains permalink state runs
//! at the default ordinal `0`; the link synchronizer registers at
//! [`LegacyLinkSynchronizer::ORDINAL`](crate::sync::LegacyLinkSynchronizer::ORDINAL)
//! so it always observes the resolver's settled state.

mod task_listener;

use std::cmp::Reverse;

pub use task_listener::{NullListener, StreamListener, TaskListener};

use crate::model::{Build, Job};

/// Receives build lifecycle notifications.
///
/// Handlers run synchronously on the dispatching thread and must not fail
/// the event; anything that goes wrong is logged by the handler itself.
pub trait RunListener {
    /// Relative position among handlers. Higher runs earlier.
    fn ordinal(&self) -> i32 {
        0
    }

    /// A build has started. Fires before any other event for the build.
    fn on_started(&self, _job: &Job, _build: &Build, _listener: &mut dyn TaskListener) {}

    /// A build reached its terminal result. Fires at most once per build.
    fn on_completed(&self, _job: &Job, _build: &Build, _listener: &mut dyn TaskListener) {}

    /// A build was removed from the job's history, in any lifecycle state.
    fn on_deleted(&self, _job: &Job, _build: &Build) {}
}

/// Ordered set of lifecycle handlers.
#[derive(Default)]
pub struct ListenerRegistry<'a> {
    listeners: Vec<Box<dyn RunListener + 'a>>,
}

impl<'a> ListenerRegistry<'a> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    /// Adds a handler at its declared ordinal.
    pub fn register(&mut self, listener: impl RunListener + 'a) {
        self.listeners.push(Box::new(listener));
        self.listeners.sort_by_key(|l| Reverse(l.ordinal()));
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Dispatches a started event to every handler in order.
    pub fn fire_started(&self, job: &Job, build: &Build, listener: &mut dyn TaskListener) {
        for l in &self.listeners {
            l.on_started(job, build, listener);
        }
    }

    /// Dispatches a completed event to every handler in order.
    pub fn fire_completed(&self, job: &Job, build: &Build, listener: &mut dyn TaskListener) {
        for l in &self.listeners {
            l.on_completed(job, build, listener);
        }
    }

    /// Dispatches a deleted event to every handler in order.
    pub fn fire_deleted(&self, job: &Job, build: &Build) {
        for l in &self.listeners {
            l.on_deleted(job, build);
        }
    }
}
