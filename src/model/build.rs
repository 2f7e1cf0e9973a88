//! Build records and their lifecycle state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strictly increasing build number within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildNumber(pub u32);

impl BuildNumber {
    /// The number following this one, or `None` at `u32::MAX`.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuildNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Terminal outcome of a build.
///
/// Variants are declared from best to worst, so the derived ordering reads
/// as severity: `Success < Unstable < Failure < NotBuilt < Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildResult {
    /// Everything passed.
    Success,
    /// Built, but with test failures or similar soft problems.
    Unstable,
    /// The build or a post-build step failed.
    Failure,
    /// The build was skipped.
    NotBuilt,
    /// The build was interrupted.
    Aborted,
}

impl BuildResult {
    /// Returns `true` if this result is at least as good as `other`.
    #[must_use]
    pub fn is_better_or_equal_to(self, other: Self) -> bool {
        self <= other
    }

    /// Lowercase name used on the command line and in records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unstable => "unstable",
            Self::Failure => "failure",
            Self::NotBuilt => "not_built",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "success" => Ok(Self::Success),
            "unstable" => Ok(Self::Unstable),
            "failure" => Ok(Self::Failure),
            "not_built" => Ok(Self::NotBuilt),
            "aborted" => Ok(Self::Aborted),
            other => Err(format!("Unknown build result: {other}")),
        }
    }
}

/// Where a build is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Started, no result yet.
    InProgress,
    /// Finished with a result. Immutable from here on.
    Completed(BuildResult),
    /// Removed from the job's history.
    Deleted,
}

/// A single numbered build record.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    /// Number within the owning job.
    pub number: BuildNumber,
    /// Lifecycle state.
    pub state: BuildState,
    /// When the build started.
    pub started_at: DateTime<Utc>,
    /// When the build reached a terminal result.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Build {
    /// Creates an in-progress build.
    #[must_use]
    pub fn started(number: BuildNumber, started_at: DateTime<Utc>) -> Self {
        Self { number, state: BuildState::InProgress, started_at, completed_at: None }
    }

    /// The terminal result, if the build has completed.
    #[must_use]
    pub fn result(&self) -> Option<BuildResult> {
        match self.state {
            BuildState::Completed(result) => Some(result),
            BuildState::InProgress | BuildState::Deleted => None,
        }
    }

    /// Returns `true` while the build has no result.
    #[must_use]
    pub fn is_building(&self) -> bool {
        matches!(self.state, BuildState::InProgress)
    }
}
