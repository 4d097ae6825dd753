//! Record addressing
//!
//! A record `<resource>` in `<collection>` lives at
//! `<root>/<collection>/<resource>.json`. Callers may pass either the bare
//! key or its `.json` form, so lookups go through [`resolve`], which probes
//! the bare path first and the suffixed path second.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::error::{StoreError, StoreResult};

/// Extension appended to every record key on disk
pub const RECORD_EXTENSION: &str = ".json";

/// Extension appended to a record path while a write is in flight
pub const TEMP_EXTENSION: &str = ".tmp";

/// An on-disk entry found by [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lexically clean a path
///
/// Drops `.` components, folds `name/..` pairs and treats `/..` as `/`.
/// An empty result becomes `.`. No filesystem access is performed.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.into_iter().collect()
}

/// Append a suffix to the final component without replacing any extension
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

/// `<dir>/<resource>.json`
pub fn record_path(dir: &Path, resource: &str) -> PathBuf {
    with_suffix(&dir.join(resource), RECORD_EXTENSION)
}

/// `<record>.tmp`, a sibling of the final record path
pub fn temp_path(record: &Path) -> PathBuf {
    with_suffix(record, TEMP_EXTENSION)
}

/// Whether a directory entry is an in-flight (or orphaned) temp file
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(TEMP_EXTENSION))
        .unwrap_or(false)
}

/// Find the entry for `path`, trying `path` then `path.json`
///
/// Fails with [`StoreError::NotFound`] (carrying the bare path) when neither
/// exists. Any other stat failure is surfaced as-is.
pub fn resolve(path: &Path) -> StoreResult<Resolved> {
    match stat(path)? {
        Some(is_dir) => Ok(Resolved {
            path: path.to_path_buf(),
            is_dir,
        }),
        None => {
            let suffixed = with_suffix(path, RECORD_EXTENSION);
            match stat(&suffixed)? {
                Some(is_dir) => Ok(Resolved {
                    path: suffixed,
                    is_dir,
                }),
                None => Err(StoreError::NotFound {
                    path: path.to_path_buf(),
                }),
            }
        }
    }
}

fn stat(path: &Path) -> StoreResult<Option<bool>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.is_dir())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::from_read_io(e, path.to_path_buf())),
    }
}
