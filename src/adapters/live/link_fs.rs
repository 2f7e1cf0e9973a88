//! Live symlink adapter using `std::fs` and `std::os::unix::fs::symlink`.

use std::io;
use std::path::Path;

use crate::error::LinkError;
use crate::ports::link_fs::{LinkFs, Removal};

/// Live symlink adapter backed by the real disk.
pub struct LiveLinkFs;

impl LinkFs for LiveLinkFs {
    fn create_symlink(&self, dir: &Path, target: &Path, name: &str) -> Result<(), LinkError> {
        let link = dir.join(name);
        // Link under a scratch name, then rename over the old entry so readers
        // never observe a missing link.
        let scratch = dir.join(format!(".{name}.{}.tmp", std::process::id()));
        match std::fs::remove_file(&scratch) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(LinkError::from_io("remove", scratch, e)),
        }
        symlink(target, &scratch)?;
        std::fs::rename(&scratch, &link).map_err(|e| {
            let _ = std::fs::remove_file(&scratch);
            LinkError::from_io("rename", &link, e)
        })
    }

    fn read_link(&self, path: &Path) -> Result<Option<String>, LinkError> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LinkError::from_io("stat", path, e)),
        };
        if !meta.file_type().is_symlink() {
            return Ok(None);
        }
        let target = std::fs::read_link(path).map_err(|e| LinkError::from_io("readlink", path, e))?;
        Ok(Some(target.to_string_lossy().into_owned()))
    }

    fn remove(&self, path: &Path) -> Result<Removal, LinkError> {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removal::Absent),
            Err(e) => return Err(LinkError::from_io("stat", path, e)),
        };
        let result = if meta.is_dir() { std::fs::remove_dir(path) } else { std::fs::remove_file(path) };
        result.map(|()| Removal::Removed).map_err(|e| LinkError::from_io("remove", path, e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<(), LinkError> {
    std::os::unix::fs::symlink(target, link).map_err(|e| LinkError::from_io("symlink", link, e))
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<(), LinkError> {
    Err(LinkError::Unsupported { path: link.to_path_buf() })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn create_read_replace_remove() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveLinkFs;
        let link = dir.path().join("lastStableBuild");

        assert_eq!(fs.read_link(&link).unwrap(), None);

        fs.create_symlink(dir.path(), Path::new("1"), "lastStableBuild").unwrap();
        assert_eq!(fs.read_link(&link).unwrap().as_deref(), Some("1"));

        fs.create_symlink(dir.path(), Path::new("2"), "lastStableBuild").unwrap();
        assert_eq!(fs.read_link(&link).unwrap().as_deref(), Some("2"));

        assert_eq!(fs.remove(&link).unwrap(), Removal::Removed);
        assert_eq!(fs.remove(&link).unwrap(), Removal::Absent);
    }

    #[test]
    fn dangling_links_are_still_readable() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveLinkFs;
        fs.create_symlink(dir.path(), Path::new("-1"), "lastFailedBuild").unwrap();
        let link = dir.path().join("lastFailedBuild");
        assert!(!link.exists());
        assert_eq!(fs.read_link(&link).unwrap().as_deref(), Some("-1"));
    }

    #[test]
    fn regular_file_reads_as_no_link() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lastStableBuild");
        std::fs::write(&path, "1").unwrap();
        assert_eq!(LiveLinkFs.read_link(&path).unwrap(), None);
        assert_eq!(LiveLinkFs.remove(&path).unwrap(), Removal::Removed);
    }

    #[test]
    fn non_empty_directory_cannot_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lastStableBuild");
        std::fs::create_dir_all(path.join("inner")).unwrap();
        assert!(LiveLinkFs.remove(&path).is_err());
    }
}
