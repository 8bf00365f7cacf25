//! Directory-backed store of produced audio files.

use crate::error::LibraryError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The audio library: one fixed directory of finished conversions.
///
/// Anything placed in the directory is listed; entries are not checked for
/// provenance and carry no metadata beyond their filename.
pub struct LibraryStore {
    root: PathBuf,
}

impl LibraryStore {
    /// Open the store, creating the directory if absent.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of audio files currently in the store, in no particular order.
    pub fn list(&self) -> Result<Vec<String>, LibraryError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    /// Hand a stored file to the platform's default opener.
    pub fn open(&self, name: &str) -> Result<(), LibraryError> {
        let path = self.entry_path(name)?;
        opener_command(&path).spawn()?;
        Ok(())
    }

    /// Remove a stored file.
    pub fn delete(&self, name: &str) -> Result<(), LibraryError> {
        let path = self.entry_path(name)?;
        std::fs::remove_file(path)?;
        Ok(())
    }

    /// Resolve a stored file by name, rejecting names that leave the root.
    fn entry_path(&self, name: &str) -> Result<PathBuf, LibraryError> {
        if name.is_empty() || name == ".." || name.contains(['/', '\\']) {
            return Err(LibraryError::InvalidName(name.to_string()));
        }
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(LibraryError::NotFound(name.to_string()));
        }
        Ok(path)
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(all(unix, not(target_os = "macos")))]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

#[cfg(windows)]
fn opener_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LibraryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("audio");
        assert!(!root.exists());

        let store = LibraryStore::new(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_list_files_only() {
        let (_dir, store) = store();
        std::fs::write(store.root().join("talk.mp3"), b"a").unwrap();
        std::fs::write(store.root().join("lecture.mp3"), b"b").unwrap();
        std::fs::create_dir(store.root().join(".slideread-work")).unwrap();

        let mut names = store.list().unwrap();
        names.sort();
        assert_eq!(names, vec!["lecture.mp3", "talk.mp3"]);
    }

    #[test]
    fn test_delete_removes_entry() {
        let (_dir, store) = store();
        std::fs::write(store.root().join("talk.mp3"), b"a").unwrap();

        store.delete("talk.mp3").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, store) = store();
        std::fs::write(store.root().join("talk.mp3"), b"a").unwrap();

        let err = store.delete("other.mp3").unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
        // The directory is unchanged
        assert_eq!(store.list().unwrap(), vec!["talk.mp3"]);
    }

    #[test]
    fn test_traversal_names_rejected() {
        let (_dir, store) = store();

        for name in ["../talk.mp3", "a/b.mp3", "..", ""] {
            let err = store.delete(name).unwrap_err();
            assert!(matches!(err, LibraryError::InvalidName(_)), "{:?}", name);
        }
    }

    #[test]
    fn test_open_missing_is_not_found() {
        let (_dir, store) = store();
        let err = store.open("ghost.mp3").unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
    }
}
