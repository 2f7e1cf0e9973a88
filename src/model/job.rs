//! Jobs and their on-disk directory layout.

use std::path::{Path, PathBuf};

/// Directory name of the co-located builds directory under a job root.
const BUILDS_DIR_NAME: &str = "builds";

/// A named container of numbered builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Slash-separated full name, e.g. `folder/project`.
    pub full_name: String,
    /// Stable job root directory. Legacy links live here.
    pub root_dir: PathBuf,
    /// Directory holding one subdirectory per build plus the permalink links.
    pub builds_dir: PathBuf,
}

impl Job {
    /// Creates a job with the default co-located builds directory.
    #[must_use]
    pub fn new(full_name: impl Into<String>, root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let builds_dir = root_dir.join(BUILDS_DIR_NAME);
        Self { full_name: full_name.into(), root_dir, builds_dir }
    }

    /// Replaces the builds directory, e.g. with one expanded from a relocation template.
    #[must_use]
    pub fn with_builds_dir(mut self, builds_dir: impl Into<PathBuf>) -> Self {
        self.builds_dir = builds_dir.into();
        self
    }

    /// Classifies the current builds directory against the job root.
    ///
    /// Computed on every call since the builds directory comes from external
    /// configuration and may move between invocations.
    #[must_use]
    pub fn layout(&self) -> BuildsLayout {
        if self.builds_dir == self.root_dir.join(BUILDS_DIR_NAME) {
            BuildsLayout::CoLocated
        } else {
            BuildsLayout::Relocated(self.builds_dir.clone())
        }
    }

    /// Directory of a single build.
    #[must_use]
    pub fn build_dir(&self, number: super::BuildNumber) -> PathBuf {
        self.builds_dir.join(number.to_string())
    }

    /// Path of the permalink link with the given id.
    #[must_use]
    pub fn permalink_path(&self, permalink_id: &str) -> PathBuf {
        self.builds_dir.join(permalink_id)
    }

    /// Path of a legacy link in the job root.
    #[must_use]
    pub fn legacy_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }
}

/// Where a job keeps its builds relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildsLayout {
    /// `<root>/builds`.
    CoLocated,
    /// Anywhere else; holds the builds directory path.
    Relocated(PathBuf),
}

impl BuildsLayout {
    /// Target a legacy link in the job root should carry to reach the
    /// permalink link `permalink_id`.
    ///
    /// Co-located layouts use a root-relative path so the job directory can
    /// be moved as a whole; relocated layouts must address the builds
    /// directory by its full path.
    #[must_use]
    pub fn legacy_target(&self, permalink_id: &str) -> PathBuf {
        match self {
            Self::CoLocated => Path::new(BUILDS_DIR_NAME).join(permalink_id),
            Self::Relocated(builds_dir) => builds_dir.join(permalink_id),
        }
    }
}
