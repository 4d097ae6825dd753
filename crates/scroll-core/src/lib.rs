//! Scroll Core Library
//!
//! A minimal persistent document store. Every record is a JSON file on
//! disk, grouped into collections (directories) under one root.
//!
//! # Architecture
//!
//! - **Driver**: addresses records, serializes writers per collection and
//!   publishes new content with an atomic rename
//! - **Storage**: path resolution, atomic writes, error taxonomy
//!
//! There is no in-memory cache; every operation goes to disk.
//!
//! # Quick Start
//!
//! ```text
//! let db = Driver::open("./data", Options::default())?;
//!
//! db.write("users", "john", &john)?;
//! let john: User = db.read("users", "john")?;
//! let raw: Vec<String> = db.read_all("users")?;
//! db.delete("users", "john")?;
//! ```
//!
//! # Modules
//!
//! - `driver`: the store (main entry point)
//! - `locks`: per-collection lock registry
//! - `logger`: pluggable leveled logging
//! - `storage`: filesystem primitives and errors
//! - `config`: application configuration

pub mod config;
pub mod driver;
pub mod locks;
pub mod logger;
pub mod storage;

pub use config::Config;
pub use driver::{Driver, Options};
pub use logger::{LogLevel, Logger, TracingLogger};
pub use storage::{ErrorKind, NameField, StoreError, StoreResult};
