//! Logging setup
//!
//! The driver logs through `tracing`; this installs the subscriber that
//! prints those events. Level comes from `SCROLL_LOG` if set, otherwise
//! from the config. Output goes to stderr unless `log_file` is configured.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use scroll_core::{Config, LogLevel};
use tracing_subscriber::EnvFilter;

/// Pick the log level: `SCROLL_LOG` wins over the config file
pub fn effective_level(config: &Config) -> LogLevel {
    match std::env::var("SCROLL_LOG") {
        Ok(val) => match val.parse() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Warning: ignoring SCROLL_LOG: {}", e);
                config.log_level
            }
        },
        Err(_) => config.log_level,
    }
}

/// `tracing` has no fatal level; fatal messages are emitted as errors
fn filter_directive(level: LogLevel) -> String {
    let level = match level {
        LogLevel::Fatal => "error",
        other => other.as_str(),
    };
    format!("scroll_core={},scroll_cli={}", level, level)
}

/// Install the global subscriber (ignored if one is already set)
pub fn init(config: &Config, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(level)))
        .with_target(false);

    match &config.log_file {
        Some(path) => match File::create(path) {
            Ok(file) => {
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            Err(e) => {
                eprintln!("Warning: Could not create log file {:?}: {}", path, e);
                let _ = builder.with_writer(io::stderr).try_init();
            }
        },
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }
}
