//! In-memory link filesystem and resolver for unit tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::error::LinkError;
use crate::model::{Build, BuildNumber, Job, Permalink};
use crate::ports::{LinkFs, PermalinkResolver, Removal};

#[derive(Default)]
struct State {
    dirs: HashSet<PathBuf>,
    links: HashMap<PathBuf, String>,
    fail_create: HashSet<String>,
    interrupt_create: HashSet<String>,
    stuck: HashSet<PathBuf>,
    unreadable: HashSet<PathBuf>,
    mutations: usize,
}

/// Symlink table keyed by full path, with injectable failures.
#[derive(Default)]
pub(crate) struct MemLinkFs {
    state: Mutex<State>,
}

impl MemLinkFs {
    pub(crate) fn with_dirs<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let fs = Self::default();
        fs.state.lock().unwrap().dirs.extend(dirs.iter().map(|d| d.as_ref().to_path_buf()));
        fs
    }

    pub(crate) fn link(&self, path: &Path) -> Option<String> {
        self.state.lock().unwrap().links.get(path).cloned()
    }

    pub(crate) fn put_link(&self, path: &Path, content: &str) {
        self.state.lock().unwrap().links.insert(path.to_path_buf(), content.to_string());
    }

    pub(crate) fn mutations(&self) -> usize {
        self.state.lock().unwrap().mutations
    }

    pub(crate) fn fail_create(&self, name: &str) {
        self.state.lock().unwrap().fail_create.insert(name.to_string());
    }

    pub(crate) fn interrupt_create(&self, name: &str) {
        self.state.lock().unwrap().interrupt_create.insert(name.to_string());
    }

    pub(crate) fn make_stuck(&self, path: &Path) {
        self.state.lock().unwrap().stuck.insert(path.to_path_buf());
    }

    pub(crate) fn make_unreadable(&self, path: &Path) {
        self.state.lock().unwrap().unreadable.insert(path.to_path_buf());
    }
}

impl LinkFs for MemLinkFs {
    fn create_symlink(&self, dir: &Path, target: &Path, name: &str) -> Result<(), LinkError> {
        let mut state = self.state.lock().unwrap();
        let path = dir.join(name);
        if state.interrupt_create.contains(name) {
            return Err(LinkError::Interrupted { path });
        }
        if state.fail_create.contains(name) {
            return Err(LinkError::from_io("symlink", path, io::ErrorKind::PermissionDenied.into()));
        }
        if !state.dirs.contains(dir) {
            return Err(LinkError::from_io("symlink", path, io::ErrorKind::NotFound.into()));
        }
        state.links.insert(path, target.display().to_string());
        state.mutations += 1;
        Ok(())
    }

    fn read_link(&self, path: &Path) -> Result<Option<String>, LinkError> {
        let state = self.state.lock().unwrap();
        if state.unreadable.contains(path) {
            return Err(LinkError::from_io("readlink", path, io::ErrorKind::PermissionDenied.into()));
        }
        Ok(state.links.get(path).cloned())
    }

    fn remove(&self, path: &Path) -> Result<Removal, LinkError> {
        let mut state = self.state.lock().unwrap();
        if state.stuck.contains(path) {
            return Err(LinkError::from_io("remove", path, io::ErrorKind::PermissionDenied.into()));
        }
        if state.links.remove(path).is_some() {
            state.mutations += 1;
            Ok(Removal::Removed)
        } else {
            Ok(Removal::Absent)
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }
}

/// Resolver answering from a mutable table instead of build history.
pub(crate) struct FixedResolver {
    targets: Mutex<Vec<(String, Option<u32>)>>,
}

impl FixedResolver {
    pub(crate) fn new(targets: &[(&str, Option<u32>)]) -> Self {
        Self {
            targets: Mutex::new(targets.iter().map(|(id, n)| ((*id).to_string(), *n)).collect()),
        }
    }

    pub(crate) fn set(&self, id: &str, target: Option<u32>) {
        let mut targets = self.targets.lock().unwrap();
        match targets.iter_mut().find(|(existing, _)| existing == id) {
            Some(entry) => entry.1 = target,
            None => targets.push((id.to_string(), target)),
        }
    }
}

impl PermalinkResolver for FixedResolver {
    fn list_permalinks(&self, _job: &Job) -> Vec<Permalink> {
        self.targets.lock().unwrap().iter().map(|(id, _)| Permalink::new(id.clone())).collect()
    }

    fn resolve(&self, permalink: &Permalink, _job: &Job) -> Option<Build> {
        self.targets
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| id == permalink.id())
            .and_then(|(_, n)| *n)
            .map(|n| Build::started(BuildNumber(n), Utc::now()))
    }
}
