//! Domain types for jobs, builds, and permalinks.
//!
//! A job owns an ordered sequence of numbered builds and a set of declared
//! permalinks. These types carry identity and on-disk locations only; the
//! rules that decide which build a permalink names live in the resolver.

mod build;
mod job;
mod permalink;

pub use build::{Build, BuildNumber, BuildResult, BuildState};
pub use job::{BuildsLayout, Job};
pub use permalink::{Permalink, LEGACY_LINKS, NO_TARGET};
