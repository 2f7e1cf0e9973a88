//! Runtime configuration.
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! optional `buildlinks.yaml` in the home directory, and environment
//! variables (a `.env` file in the working directory is loaded first).
//!
//! | Variable                | Meaning                                   |
//! |-------------------------|-------------------------------------------|
//! | `BUILDLINKS_HOME`       | Home directory holding `jobs/`            |
//! | `BUILDLINKS_BUILDS_DIR` | Builds directory template                 |

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::Job;
use crate::observability::LogFormat;

/// Name of the optional config file inside the home directory.
pub const CONFIG_FILE: &str = "buildlinks.yaml";

/// Builds directory template that yields the co-located layout.
pub const DEFAULT_BUILDS_DIR: &str = "${ITEM_ROOTDIR}/builds";

const HOME_ENV: &str = "BUILDLINKS_HOME";
const BUILDS_DIR_ENV: &str = "BUILDLINKS_BUILDS_DIR";

/// Contents of `buildlinks.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    builds_dir: Option<String>,
    log_format: Option<LogFormat>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute home directory.
    pub home: PathBuf,
    /// Builds directory template; see [`Config::job`].
    pub builds_dir: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the environment and the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is unreadable or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let home = std::env::var(HOME_ENV).map_or_else(|_| PathBuf::from("."), PathBuf::from);
        Self::load_from(&home, std::env::var(BUILDS_DIR_ENV).ok())
    }

    /// Loads configuration for an explicit home directory.
    ///
    /// `builds_dir_override` takes precedence over the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is unreadable or invalid.
    pub fn load_from(home: &Path, builds_dir_override: Option<String>) -> Result<Self, ConfigError> {
        let home = std::path::absolute(home)
            .map_err(|source| ConfigError::Read { path: home.to_path_buf(), source })?;
        let file = read_file_config(&home.join(CONFIG_FILE))?;

        Ok(Self {
            builds_dir: builds_dir_override
                .or(file.builds_dir)
                .unwrap_or_else(|| DEFAULT_BUILDS_DIR.to_string()),
            log_format: file.log_format.unwrap_or_default(),
            home,
        })
    }

    /// Builds the [`Job`] for a slash-separated full name.
    ///
    /// The job root for `a/b` is `<home>/jobs/a/jobs/b`. The builds directory
    /// is the template with `${ITEM_ROOTDIR}`, `${ITEM_FULL_NAME}` and
    /// `${HOME_DIR}` substituted; a relative result is taken from the home
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidJobName`] for empty names or names with
    /// empty, `.` or `..` segments.
    pub fn job(&self, full_name: &str) -> Result<Job, ConfigError> {
        let segments: Vec<&str> = full_name.split('/').collect();
        if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            return Err(ConfigError::InvalidJobName(full_name.to_string()));
        }

        let mut root_dir = self.home.clone();
        for segment in &segments {
            root_dir = root_dir.join("jobs").join(segment);
        }

        let expanded = self
            .builds_dir
            .replace("${ITEM_ROOTDIR}", &root_dir.display().to_string())
            .replace("${ITEM_FULL_NAME}", full_name)
            .replace("${HOME_DIR}", &self.home.display().to_string());
        let builds_dir = self.home.join(expanded);

        Ok(Job::new(full_name, root_dir).with_builds_dir(builds_dir))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}
