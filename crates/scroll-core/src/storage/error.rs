//! Storage error handling
//!
//! Every driver operation returns a [`StoreError`]. Variants fall into four
//! kinds (see [`ErrorKind`]) so callers can tell "record absent" apart from
//! "storage malfunction" without matching on every variant.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which name a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    Collection,
    Resource,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameField::Collection => f.write_str("Collection name"),
            NameField::Resource => f.write_str("Resource"),
        }
    }
}

/// Coarse classification of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Serialization,
}

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A collection or resource name was empty
    #[error("{0} cannot be empty")]
    EmptyName(NameField),

    /// Record or collection does not exist
    #[error("Unable to find file or directory at '{path}'")]
    NotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("Database root '{path}' exists but is not a directory")]
    InvalidRoot { path: PathBuf },

    /// Failed to create a directory
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file or directory
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to remove file or directory
    #[error("Failed to remove '{path}': {source}")]
    RemoveError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Value could not be encoded, or stored bytes could not be decoded
    #[error("Invalid JSON for '{path}': {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create an error from an I/O error raised while writing
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.).
    /// A missing path while writing is a storage failure, never `NotFound`.
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        classify(error, path, |path, source| StoreError::WriteError { path, source })
    }

    /// Create an error from an I/O error raised while reading the addressed
    /// record or collection
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            return StoreError::NotFound { path };
        }
        Self::from_scan_io(error, path)
    }

    /// Create an error from an I/O error raised while reading an entry that
    /// a directory listing just returned
    ///
    /// The collection exists, so an entry vanishing underneath us is a read
    /// failure rather than `NotFound`.
    pub fn from_scan_io(error: io::Error, path: PathBuf) -> Self {
        classify(error, path, |path, source| StoreError::ReadError { path, source })
    }

    /// Create an error from an I/O error raised while removing the addressed
    /// record or collection
    pub fn from_remove_io(error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            return StoreError::NotFound { path };
        }
        classify(error, path, |path, source| StoreError::RemoveError { path, source })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::EmptyName(_) => ErrorKind::Validation,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Serialization { .. } => ErrorKind::Serialization,
            StoreError::InvalidRoot { .. }
            | StoreError::CreateDirectory { .. }
            | StoreError::PermissionDenied { .. }
            | StoreError::DiskFull { .. }
            | StoreError::ReadError { .. }
            | StoreError::WriteError { .. }
            | StoreError::RemoveError { .. }
            | StoreError::AtomicWriteFailed { .. } => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::DiskFull { .. } => Some("Free up disk space and try again."),
            StoreError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::InvalidRoot { .. } => {
                Some("Point the store at a directory, or remove the file occupying that path.")
            }
            _ => None,
        }
    }
}

fn classify(
    error: io::Error,
    path: PathBuf,
    fallback: impl FnOnce(PathBuf, io::Error) -> StoreError,
) -> StoreError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
            path,
            source: error,
        },
        _ if is_disk_full_error(&error) => StoreError::DiskFull {
            path,
            source: error,
        },
        _ => fallback(path, error),
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
