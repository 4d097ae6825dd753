//! The document store driver
//!
//! A [`Driver`] owns a root directory and stores every record as its own
//! JSON file, one directory per collection:
//!
//! ```ignore
//! let db = Driver::open("./data", Options::default())?;
//!
//! db.write("users", "john", &user)?;
//! let john: User = db.read("users", "john")?;
//! let everyone = db.read_all("users")?;   // raw JSON strings
//! db.delete("users", "john")?;
//! ```
//!
//! ## Concurrency
//!
//! Writes and deletes hold the collection's lock for their full duration, so
//! writers to one collection are serialized while writers to different
//! collections proceed independently. Reads take no lock: new content is
//! only ever exposed by an atomic rename, so a reader sees either the old
//! record or the new one, never a mix.
//!
//! Nothing is cached; every call goes to disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::locks::LockRegistry;
use crate::logger::{Logger, TracingLogger};
use crate::storage::paths::{self, record_path, with_suffix, RECORD_EXTENSION};
use crate::storage::{
    atomic_write, clean_path, ensure_dir, resolve, NameField, Resolved, StoreError, StoreResult,
};

/// Construction options for [`Driver::open`]
#[derive(Clone, Default)]
pub struct Options {
    logger: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `logger` instead of the default [`TracingLogger`]
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Use an already shared logger
    pub fn with_shared_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("logger", &self.logger.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// JSON-file document store rooted at one directory
///
/// `Driver` is `Send + Sync`; share it across threads behind an `Arc`.
pub struct Driver {
    dir: PathBuf,
    locks: LockRegistry,
    log: Arc<dyn Logger>,
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("dir", &self.dir)
            .field("collections_locked", &self.locks.len())
            .finish()
    }
}

impl Driver {
    /// Open a store at `dir`, creating the directory if needed
    ///
    /// The path is cleaned lexically first. Existing contents are never
    /// scanned.
    pub fn open(dir: impl AsRef<Path>, options: Options) -> StoreResult<Self> {
        let dir = clean_path(dir.as_ref());
        let log = options
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::default()));

        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {
                log.debug(format_args!(
                    "Using '{}' (database already exists)",
                    dir.display()
                ));
            }
            Ok(_) => return Err(StoreError::InvalidRoot { path: dir }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log.debug(format_args!("Creating db at '{}'...", dir.display()));
                ensure_dir(&dir)?;
            }
            Err(e) => return Err(StoreError::from_read_io(e, dir)),
        }

        Ok(Self {
            dir,
            locks: LockRegistry::new(),
            log,
        })
    }

    /// The cleaned root directory
    pub fn root(&self) -> &Path {
        &self.dir
    }

    /// Store `value` as `<collection>/<resource>.json`
    ///
    /// The value is written to `<resource>.json.tmp`, synced, then renamed
    /// over the final path. If this returns `Ok`, a following [`Driver::read`]
    /// sees the new value. On any error the previous record (or its absence)
    /// is left as it was.
    pub fn write<T>(&self, collection: &str, resource: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate(collection, NameField::Collection)?;
        validate(resource, NameField::Resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = self.dir.join(collection);
        let final_path = record_path(&dir, resource);

        ensure_dir(&dir)?;

        let bytes = encode(value).map_err(|source| StoreError::Serialization {
            path: final_path.clone(),
            source,
        })?;

        atomic_write(&final_path, &bytes)?;

        self.log
            .trace(format_args!("Wrote '{}'", final_path.display()));
        Ok(())
    }

    /// Load and decode one record
    ///
    /// `resource` may be the bare key or its `.json` file name.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, resource: &str) -> StoreResult<T> {
        validate(collection, NameField::Collection)?;
        validate(resource, NameField::Resource)?;

        let resolved = resolve(&self.dir.join(collection).join(resource))?;
        let path = if resolved.is_dir {
            with_suffix(&resolved.path, RECORD_EXTENSION)
        } else {
            resolved.path
        };

        let bytes = fs::read(&path).map_err(|e| StoreError::from_read_io(e, path.clone()))?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization { path, source })
    }

    /// Raw JSON of every record in a collection, ordered by file name
    ///
    /// In-flight `.tmp` files are skipped. If any entry cannot be read the
    /// whole call fails; partial results are never returned.
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .read_entries(collection)?
            .into_iter()
            .map(|(_, content)| content)
            .collect())
    }

    /// Every record in a collection, decoded
    ///
    /// Fails on the first record that does not decode as `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.read_entries(collection)?
            .into_iter()
            .map(|(path, content)| {
                serde_json::from_str::<T>(&content)
                    .map_err(|source| StoreError::Serialization { path, source })
            })
            .collect()
    }

    /// Remove one record
    ///
    /// If `resource` names a directory inside the collection, that directory
    /// is removed recursively. Use [`Driver::delete_collection`] to remove a
    /// whole collection.
    pub fn delete(&self, collection: &str, resource: &str) -> StoreResult<()> {
        validate(collection, NameField::Collection)?;
        validate(resource, NameField::Resource)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let resolved = resolve(&self.dir.join(collection).join(resource))?;
        remove(&resolved)?;

        self.log
            .debug(format_args!("Deleted '{}'", resolved.path.display()));
        Ok(())
    }

    /// Remove a collection directory and every record in it
    pub fn delete_collection(&self, collection: &str) -> StoreResult<()> {
        validate(collection, NameField::Collection)?;

        let lock = self.locks.get_or_create(collection);
        let _guard = lock.lock();

        let dir = self.dir.join(collection);
        let resolved = resolve(&dir)?;
        if !resolved.is_dir {
            return Err(StoreError::NotFound { path: dir });
        }
        remove(&resolved)?;

        self.log
            .debug(format_args!("Deleted collection '{}'", resolved.path.display()));
        Ok(())
    }

    fn read_entries(&self, collection: &str) -> StoreResult<Vec<(PathBuf, String)>> {
        validate(collection, NameField::Collection)?;

        let dir = self.dir.join(collection);
        let resolved = resolve(&dir)?;
        if !resolved.is_dir {
            return Err(StoreError::NotFound { path: dir });
        }

        let listing =
            fs::read_dir(&resolved.path).map_err(|e| StoreError::from_read_io(e, dir.clone()))?;

        let mut files = Vec::new();
        for entry in listing {
            let entry = entry.map_err(|e| StoreError::from_scan_io(e, dir.clone()))?;
            let path = entry.path();
            if paths::is_temp_file(&path) {
                continue;
            }
            files.push(path);
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        files
            .into_iter()
            .map(|path| match fs::read_to_string(&path) {
                Ok(content) => Ok((path, content)),
                Err(e) => Err(StoreError::from_scan_io(e, path)),
            })
            .collect()
    }
}

fn validate(name: &str, field: NameField) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::EmptyName(field));
    }
    Ok(())
}

/// Tab-indented JSON with a trailing newline
fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn remove(resolved: &Resolved) -> StoreResult<()> {
    let result = if resolved.is_dir {
        fs::remove_dir_all(&resolved.path)
    } else {
        fs::remove_file(&resolved.path)
    };
    result.map_err(|e| StoreError::from_remove_io(e, resolved.path.clone()))
}
