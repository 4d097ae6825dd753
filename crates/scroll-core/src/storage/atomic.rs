//! Atomic file writes
//!
//! New content only becomes visible through a single `rename` of a fully
//! written sibling temp file, so readers never observe a torn record.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

use super::error::{StoreError, StoreResult};
use super::paths::temp_path;

const DIR_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

/// Create `dir` and any missing parents
pub fn ensure_dir(dir: &Path) -> StoreResult<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);

    builder
        .create(dir)
        .map_err(|source| StoreError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })
}

/// Write data to a file atomically
///
/// 1. Write to `<path>.tmp` in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file onto `path`
///
/// The parent directory must already exist. On failure before the rename
/// the target is untouched and the temp file is removed if possible.
pub fn atomic_write(path: &Path, data: &[u8]) -> StoreResult<()> {
    let temp = temp_path(path);

    if let Err(e) = write_synced(&temp, data) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    fs::rename(&temp, path).map_err(|source| StoreError::AtomicWriteFailed {
        from: temp,
        to: path.to_path_buf(),
        source,
    })
}

fn write_synced(path: &Path, data: &[u8]) -> StoreResult<()> {
    let mut file = create_file(path).map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;

    file.write_all(data)
        .map_err(|e| StoreError::from_io(e, path.to_path_buf()))?;

    file.sync_all()
        .map_err(|e| StoreError::from_io(e, path.to_path_buf()))
}

fn create_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Existing directories are fine
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("john.json");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_failure_leaves_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("john.json");
        atomic_write(&path, b"committed").unwrap();

        // A directory squatting on the temp path makes the temp write fail
        fs::create_dir(temp_path(&path)).unwrap();

        let err = atomic_write(&path, b"never visible").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
        assert_eq!(fs::read_to_string(&path).unwrap(), "committed");
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("john.json");
        atomic_write(&path, b"{}").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may clear bits but never adds them
        assert_eq!(mode & !FILE_MODE, 0);
    }
}
