//! Storage layer
//!
//! Filesystem primitives used by the driver.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!   <collection>/
//!     <resource>.json      # tab-indented JSON, trailing newline
//!     <resource>.json.tmp  # only while a write is in flight
//! ```

pub mod atomic;
pub mod error;
pub mod paths;

pub use atomic::{atomic_write, ensure_dir};
pub use error::{ErrorKind, NameField, StoreError, StoreResult};
pub use paths::{clean_path, resolve, Resolved};
