//! Atomic file operations
//!
//! The data file is replaced, never edited in place:
//!
//! 1. Write the new content to `<file>.tmp` in the same directory
//! 2. Call sync_all() to flush it to disk
//! 3. Rename the temp file over the target (atomic on POSIX filesystems)
//!
//! The target is therefore always either the previous or the new complete
//! snapshot, never a partial write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result type for atomic operations
pub type AtomicResult<T> = Result<T, AtomicError>;

/// Errors that can occur during atomic operations
#[derive(Debug, thiserror::Error)]
pub enum AtomicError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write temp file {path:?}: {source}")]
    WriteTemp { path: PathBuf, source: io::Error },
    #[error("failed to replace {path:?}: {source}")]
    Rename { path: PathBuf, source: io::Error },
    #[error("failed to remove stale temp file {path:?}: {source}")]
    Cleanup { path: PathBuf, source: io::Error },
}

/// Path of the temp file used while replacing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace `path` with `content`
///
/// # Example
///
/// ```ignore
/// atomic_write("data/events.json", b"[]")?;
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> AtomicResult<()> {
    let path = path.as_ref();
    let temp_path = temp_path(path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AtomicError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write = |file: &mut File| -> io::Result<()> {
        file.write_all(content)?;
        file.sync_all()
    };
    File::create(&temp_path)
        .and_then(|mut file| write(&mut file))
        .map_err(|source| AtomicError::WriteTemp {
            path: temp_path.clone(),
            source,
        })?;

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(AtomicError::Rename {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Remove the temp file an interrupted write may have left next to `path`
///
/// Returns `true` when a stale file was removed.
pub fn remove_stale_temp<P: AsRef<Path>>(path: P) -> AtomicResult<bool> {
    let temp_path = temp_path(path.as_ref());

    if !temp_path.is_file() {
        return Ok(false);
    }

    fs::remove_file(&temp_path).map_err(|source| AtomicError::Cleanup {
        path: temp_path.clone(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");

        atomic_write(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");

        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nested").join("events.json");

        atomic_write(&path, b"[]").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        fs::write(&path, "previous").unwrap();

        // A directory in the temp file's place makes File::create fail
        fs::create_dir(temp_path(&path)).unwrap();

        let err = atomic_write(&path, b"next").unwrap_err();
        assert!(matches!(err, AtomicError::WriteTemp { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        let path = Path::new("data/events.json");
        assert_eq!(temp_path(path), PathBuf::from("data/events.json.tmp"));
    }

    #[test]
    fn test_remove_stale_temp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        fs::write(temp_path(&path), "partial").unwrap();
        fs::write(temp_dir.path().join("other.tmp"), "keep").unwrap();

        assert!(remove_stale_temp(&path).unwrap());
        assert!(!temp_path(&path).exists());
        assert!(temp_dir.path().join("other.tmp").exists());

        assert!(!remove_stale_temp(&path).unwrap());
    }
}
