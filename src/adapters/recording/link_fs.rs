//! Recording adapter for the `LinkFs` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::error::LinkError;
use crate::journal::JournalRecorder;
use crate::ports::link_fs::{LinkFs, Removal};

const PORT: &str = "links";

/// Journals symlink calls while delegating to an inner implementation.
pub struct RecordingLinkFs {
    inner: Box<dyn LinkFs>,
    recorder: Arc<Mutex<JournalRecorder>>,
}

impl RecordingLinkFs {
    /// Creates a recording adapter wrapping the given implementation.
    pub fn new(inner: Box<dyn LinkFs>, recorder: Arc<Mutex<JournalRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct CreateInput<'a> {
    dir: &'a str,
    target: &'a str,
    name: &'a str,
}

impl LinkFs for RecordingLinkFs {
    fn create_symlink(&self, dir: &Path, target: &Path, name: &str) -> Result<(), LinkError> {
        let result = self.inner.create_symlink(dir, target, name);
        let input = CreateInput {
            dir: &dir.display().to_string(),
            target: &target.display().to_string(),
            name,
        };
        record_result(&self.recorder, PORT, "create_symlink", &input, &result);
        result
    }

    fn read_link(&self, path: &Path) -> Result<Option<String>, LinkError> {
        let result = self.inner.read_link(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, PORT, "read_link", &input, &result);
        result
    }

    fn remove(&self, path: &Path) -> Result<Removal, LinkError> {
        let result = self.inner.remove(path);
        let input = PathInput { path: &path.display().to_string() };
        record_result(&self.recorder, PORT, "remove", &input, &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        let input = PathInput { path: &path.display().to_string() };
        record_interaction(&self.recorder, PORT, "is_dir", &input, &result);
        result
    }
}
