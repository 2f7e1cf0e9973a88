//! Typed errors for each layer.
//!
//! The synchronizer itself never returns these to its caller; it logs them
//! and moves on. The build engine and CLI propagate them with `?`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single symlink primitive.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The call was interrupted before it completed.
    #[error("interrupted while operating on {}", path.display())]
    Interrupted {
        /// Entry being operated on.
        path: PathBuf,
    },
    /// Symbolic links cannot be created on this platform.
    #[error("symbolic links are not supported here (wanted {})", path.display())]
    Unsupported {
        /// Entry that could not be created.
        path: PathBuf,
    },
    /// Any other OS-level failure.
    #[error("{op} {}: {source}", path.display())]
    Io {
        /// Primitive that failed (`symlink`, `readlink`, `remove`, ...).
        op: &'static str,
        /// Entry being operated on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl LinkError {
    /// Classifies an I/O error, separating interruption from everything else.
    #[must_use]
    pub fn from_io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::Interrupted {
            Self::Interrupted { path }
        } else {
            Self::Io { op, path, source }
        }
    }

    /// Returns `true` for interruption.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Failure reading or writing build records.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A filesystem call failed.
    #[error("{context}: {message}")]
    Storage {
        /// What was being done.
        context: String,
        /// Error reported by the filesystem port.
        message: String,
    },
    /// A build record could not be parsed.
    #[error("malformed build record {}: {source}", path.display())]
    Malformed {
        /// Record file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_yaml::Error,
    },
    /// The requested build does not exist.
    #[error("build #{number} of {job} not found")]
    NotFound {
        /// Job full name.
        job: String,
        /// Requested build number.
        number: u32,
    },
    /// No build number is left to hand out.
    #[error("build numbers of {job} are exhausted")]
    Exhausted {
        /// Job full name.
        job: String,
    },
    /// The build already has a result.
    #[error("build #{number} of {job} is already completed")]
    AlreadyCompleted {
        /// Job full name.
        job: String,
        /// Build number.
        number: u32,
    },
}

/// Failure loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but cannot be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid YAML for [`crate::config::Config`].
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Config file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_yaml::Error,
    },
    /// The job name is empty or contains unusable segments.
    #[error("invalid job name: {0:?}")]
    InvalidJobName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_is_classified_separately() {
        let err = LinkError::from_io(
            "symlink",
            "/j/lastStable",
            io::Error::new(io::ErrorKind::Interrupted, "signal"),
        );
        assert!(err.is_interrupted());

        let err = LinkError::from_io(
            "symlink",
            "/j/lastStable",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(!err.is_interrupted());
        assert!(err.to_string().contains("symlink /j/lastStable"));
    }
}
