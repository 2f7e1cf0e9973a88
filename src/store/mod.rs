//! Build record store.
//!
//! Build records live inside each build's directory and the next number is
//! kept in the job root, all through the [`FileSystem`] port:
//!
//! ```text
//! <root>/
//!   ├── nextBuildNumber
//!   ├── lastStable      -> builds/lastStableBuild
//!   └── builds/         (or a relocated directory)
//!         ├── 1/
//!         │    ├── build.yaml
//!         │    └── log
//!         └── lastStableBuild -> 1
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::HistoryError;
use crate::model::{Build, BuildNumber, BuildResult, BuildState, Job};
use crate::ports::FileSystem;

const RECORD_FILE: &str = "build.yaml";
const LOG_FILE: &str = "log";
const NEXT_NUMBER_FILE: &str = "nextBuildNumber";

/// On-disk shape of a build record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BuildRecord {
    number: BuildNumber,
    #[serde(default)]
    result: Option<BuildResult>,
    started_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl From<&Build> for BuildRecord {
    fn from(build: &Build) -> Self {
        Self {
            number: build.number,
            result: build.result(),
            started_at: build.started_at,
            completed_at: build.completed_at,
        }
    }
}

impl From<BuildRecord> for Build {
    fn from(record: BuildRecord) -> Self {
        let state = record.result.map_or(BuildState::InProgress, BuildState::Completed);
        Self {
            number: record.number,
            state,
            started_at: record.started_at,
            completed_at: record.completed_at,
        }
    }
}

/// Reads and writes build records for jobs.
///
/// Every call goes back to the filesystem; nothing is cached.
pub struct BuildStore<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> BuildStore<'a> {
    /// Creates a store over the given filesystem.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Lists all builds of a job, oldest first.
    ///
    /// Entries in the builds directory that are not numbered build
    /// directories with a record (permalink links, stray files) are ignored.
    /// A record that cannot be parsed is logged and left out, so one damaged
    /// build does not hide the rest of the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the builds directory cannot be listed or a record
    /// cannot be read.
    pub fn list_builds(&self, job: &Job) -> Result<Vec<Build>, HistoryError> {
        let mut builds = Vec::new();
        for number in self.numbered_entries(job)? {
            if !self.fs.exists(&self.record_path(job, number)) {
                continue;
            }
            match self.load_build(job, number) {
                Ok(build) => builds.push(build),
                Err(HistoryError::Malformed { path, source }) => {
                    warn!(job = %job.full_name, build = %number, path = %path.display(), error = %source, "skipping malformed build record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(builds)
    }

    /// Numbered entries of the builds directory, ascending.
    fn numbered_entries(&self, job: &Job) -> Result<Vec<BuildNumber>, HistoryError> {
        if !self.fs.is_dir(&job.builds_dir) {
            return Ok(Vec::new());
        }
        let entries = self.fs.list_dir(&job.builds_dir).map_err(|e| HistoryError::Storage {
            context: format!("listing {}", job.builds_dir.display()),
            message: e.to_string(),
        })?;

        let mut numbers: Vec<BuildNumber> =
            entries.iter().filter_map(|name| name.parse::<BuildNumber>().ok()).collect();
        numbers.sort_unstable();
        Ok(numbers)
    }

    /// Loads one build record.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NotFound`] if the build has no record.
    pub fn load_build(&self, job: &Job, number: BuildNumber) -> Result<Build, HistoryError> {
        let path = self.record_path(job, number);
        if !self.fs.exists(&path) {
            return Err(HistoryError::NotFound { job: job.full_name.clone(), number: number.0 });
        }
        let contents = self.fs.read_to_string(&path).map_err(|e| HistoryError::Storage {
            context: format!("reading {}", path.display()),
            message: e.to_string(),
        })?;
        let record: BuildRecord = serde_yaml::from_str(&contents)
            .map_err(|source| HistoryError::Malformed { path, source })?;
        Ok(record.into())
    }

    /// Writes a build record, creating the build directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_build(&self, job: &Job, build: &Build) -> Result<(), HistoryError> {
        let path = self.record_path(job, build.number);
        let yaml = serde_yaml::to_string(&BuildRecord::from(build))
            .map_err(|source| HistoryError::Malformed { path: path.clone(), source })?;
        self.fs.write(&path, &yaml).map_err(|e| HistoryError::Storage {
            context: format!("writing {}", path.display()),
            message: e.to_string(),
        })
    }

    /// Removes a build directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists and cannot be removed.
    pub fn delete_build(&self, job: &Job, number: BuildNumber) -> Result<(), HistoryError> {
        let dir = job.build_dir(number);
        if !self.fs.exists(&dir) {
            return Ok(());
        }
        self.fs.remove_dir_all(&dir).map_err(|e| HistoryError::Storage {
            context: format!("deleting {}", dir.display()),
            message: e.to_string(),
        })
    }

    /// Hands out the next build number and advances the counter.
    ///
    /// Never reuses a number, even after deletions, and never hands out a
    /// number whose directory already exists.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Exhausted`] once `u32::MAX` is reached, or an
    /// error if the counter cannot be read or written.
    pub fn allocate_number(&self, job: &Job) -> Result<BuildNumber, HistoryError> {
        let path = job.root_dir.join(NEXT_NUMBER_FILE);
        let stored = if self.fs.exists(&path) {
            let text = self.fs.read_to_string(&path).map_err(|e| HistoryError::Storage {
                context: format!("reading {}", path.display()),
                message: e.to_string(),
            })?;
            text.trim().parse::<BuildNumber>().ok()
        } else {
            None
        };
        let exhausted = || HistoryError::Exhausted { job: job.full_name.clone() };
        let after_highest = match self.numbered_entries(job)?.last() {
            Some(highest) => Some(highest.next().ok_or_else(exhausted)?),
            None => None,
        };
        let number = stored.into_iter().chain(after_highest).max().unwrap_or(BuildNumber(1));
        let following = number.next().ok_or_else(exhausted)?;

        self.fs.write(&path, &format!("{following}\n")).map_err(|e| HistoryError::Storage {
            context: format!("writing {}", path.display()),
            message: e.to_string(),
        })?;
        Ok(number)
    }

    /// Appends text to a build's console log.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or written.
    pub fn append_log(&self, job: &Job, number: BuildNumber, text: &str) -> Result<(), HistoryError> {
        let path = self.log_path(job, number);
        let mut contents = if self.fs.exists(&path) {
            self.fs.read_to_string(&path).map_err(|e| HistoryError::Storage {
                context: format!("reading {}", path.display()),
                message: e.to_string(),
            })?
        } else {
            String::new()
        };
        contents.push_str(text);
        self.fs.write(&path, &contents).map_err(|e| HistoryError::Storage {
            context: format!("writing {}", path.display()),
            message: e.to_string(),
        })
    }

    /// Path of a build's console log.
    #[must_use]
    pub fn log_path(&self, job: &Job, number: BuildNumber) -> PathBuf {
        job.build_dir(number).join(LOG_FILE)
    }

    fn record_path(&self, job: &Job, number: BuildNumber) -> PathBuf {
        job.build_dir(number).join(RECORD_FILE)
    }
}
