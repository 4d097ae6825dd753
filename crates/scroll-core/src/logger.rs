//! Pluggable logging
//!
//! The driver reports what it does through a [`Logger`] injected at
//! construction. Log calls are purely observational.
//!
//! The default [`TracingLogger`] forwards to `tracing`, so output ends up
//! wherever the host application's subscriber sends it (the CLI installs a
//! console subscriber on stderr).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "Unknown log level '{}'. Use one of: fatal, error, warn, info, debug, trace",
                other
            )),
        }
    }
}

/// Leveled logging capability
///
/// Implementors only provide [`Logger::log`]; the six leveled methods
/// route through it. `fatal` logs and returns; it never aborts.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Fatal, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args)
    }
}

/// Logger that emits `tracing` events
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    level: LogLevel,
}

impl TracingLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a message at `level` passes this logger's threshold
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        match level {
            LogLevel::Fatal => tracing::error!(fatal = true, "{}", args),
            LogLevel::Error => tracing::error!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Trace => tracing::trace!("{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl Logger for Recorder {
        fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
            self.lines.lock().push((level, args.to_string()));
        }
    }

    #[test]
    fn test_leveled_methods_route_to_log() {
        let recorder = Recorder::default();
        recorder.fatal(format_args!("f"));
        recorder.error(format_args!("e"));
        recorder.warn(format_args!("w"));
        recorder.info(format_args!("i {}", 1));
        recorder.debug(format_args!("d"));
        recorder.trace(format_args!("t"));

        let lines = recorder.lines.lock();
        let levels: Vec<_> = lines.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Fatal,
                LogLevel::Error,
                LogLevel::Warn,
                LogLevel::Info,
                LogLevel::Debug,
                LogLevel::Trace
            ]
        );
        assert_eq!(lines[3].1, "i 1");
    }

    #[test]
    fn test_tracing_logger_threshold() {
        let logger = TracingLogger::default();
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(logger.enabled(LogLevel::Fatal));
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Trace));

        let verbose = TracingLogger::new(LogLevel::Trace);
        assert!(verbose.enabled(LogLevel::Trace));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" trace ".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }
}
