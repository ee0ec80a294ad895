//! # dslog
//! Thread-safe logger writing colored lines to the console and a stripped copy to a log file.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! dslog = "0.1.0"
//! ```
//!
//! ```rust
//! use dslog::{Severity, logger_config};
//!
//! let logger = logger_config()
//!     .with_level(Severity::Warning)
//!     .build();
//! logger.log_msg("tagged with WARNING");
//! logger.log("explicit level", Some(Severity::Info), None, None);
//! dslog::log_here!(logger, Severity::Debug, "with line and module");
//! ```
//!
//! ## Multi-threaded logging
//! A [`Logger`] is `Send + Sync`: share it by reference or through an `Arc`.
//! ```rust
//! use std::sync::Arc;
//! use dslog::{Severity, logger_config};
//!
//! let logger = Arc::new(logger_config().with_timer(true).build());
//! let handles: Vec<_> = (0..5).map(|i| {
//!     let logger = Arc::clone(&logger);
//!     std::thread::spawn(move || {
//!         logger.log_at(format!("Hello, world from thread {i}!"), Severity::Info)
//!     })
//! }).collect();
//! for h in handles { h.join().unwrap(); }
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does. It is
//! opened for every line, so it can be moved or deleted between calls.
//!
//! ```rust
//! use dslog::logger_config;
//!
//! let path = std::env::temp_dir().join("dslog_doc_app.log");
//! std::fs::remove_file(&path).ok();
//! let logger = logger_config()
//!     .with_log_file(&path)
//!     .build();
//! logger.log_msg("Hello, world!");
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("Hello, world!\n"));
//! ```
//!
//! ## The `log` facade
//! ```rust
//! use std::sync::Arc;
//! use dslog::{init_log_facade, logger_config};
//!
//! init_log_facade(Arc::new(logger_config().build())).expect("no other logger installed");
//! log::warn!("routed through dslog");
//! ```

mod logger;

use log::{LevelFilter, Log, SetLoggerError};
use logger::Console;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

pub use dslog_core::{
    ConfigError, Elapsed, LogMemory, LogStdout, LogWriter, ParseSeverityError, Seq, Severity,
    elapsed_prefix, render, start_instant, strip_color,
};
pub use logger::Logger;

/// Logs through `logger` with the current line and module path as call site.
///
/// `log_here!(logger, level, message)` or `log_here!(logger, message)` to use the
/// logger's configured level.
#[macro_export]
macro_rules! log_here {
    ($logger:expr, $level:expr, $message:expr) => {
        $logger.log(
            $message,
            ::core::option::Option::Some($level),
            ::core::option::Option::Some(line!()),
            ::core::option::Option::Some(module_path!()),
        )
    };
    ($logger:expr, $message:expr) => {
        $logger.log(
            $message,
            ::core::option::Option::None,
            ::core::option::Option::Some(line!()),
            ::core::option::Option::Some(module_path!()),
        )
    };
}

/// Adapter routing `log` crate records to a [`Logger`].
struct LogBridge(Arc<Logger>);

impl Log for LogBridge {
    fn enabled(&self, _: &log::Metadata) -> bool {
        self.0.is_enabled()
    }

    fn log(&self, record: &log::Record) {
        self.0.log(
            record.args(),
            Some(Severity::from(record.level())),
            record.line(),
            record.module_path(),
        );
    }

    fn flush(&self) {
        self.0.flush();
    }
}

/// Installs `logger` as the backend of the `log` crate macros.
///
/// Fails if a logger was already installed for this process.
pub fn init_log_facade(logger: Arc<Logger>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge(logger)))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Builder for configuring a [`Logger`].
pub struct ConfigBuilder {
    console: Console,
    level: Severity,
    log_file: PathBuf,
    file_sink: bool,
    timer: bool,
    enabled: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            console: Box::new(LogStdout),
            level: Severity::Info,
            log_file: PathBuf::from("log.txt"),
            file_sink: false,
            timer: false,
            enabled: true,
        }
    }
}

impl ConfigBuilder {
    /// Seeds the builder from the `DSLOG_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = dslog_core::EnvConfig::load()?;
        Ok(Self {
            level: env.LEVEL,
            log_file: env.FILE,
            file_sink: env.SAVE_TO_FILE,
            timer: env.TIMER,
            enabled: env.ENABLED,
            ..Self::default()
        })
    }

    pub fn build(self) -> Logger {
        let Self {
            console,
            level,
            log_file,
            file_sink,
            timer,
            enabled,
        } = self;
        Logger::from_parts(console, level, log_file, file_sink, timer, enabled)
    }

    /// Sets the level used when a call does not give one.
    pub fn with_level(self, level: Severity) -> Self {
        Self { level, ..self }
    }
    /// Sets a log file and turns the file sink on.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            log_file: path.as_ref().to_path_buf(),
            file_sink: true,
            ..self
        }
    }
    /// Dynamically set the file sink flag.
    pub fn with_file_sink(self, yes: bool) -> Self {
        Self {
            file_sink: yes,
            ..self
        }
    }
    /// Prefix every line with the time elapsed since start.
    pub fn with_timer(self, yes: bool) -> Self {
        Self { timer: yes, ..self }
    }
    pub fn with_enabled(self, yes: bool) -> Self {
        Self {
            enabled: yes,
            ..self
        }
    }
    /// Replaces stdout by another console writer.
    pub fn with_console<W: LogWriter + Send + 'static>(self, writer: W) -> Self {
        Self {
            console: Box::new(writer),
            ..self
        }
    }
}

/// Returns a default ConfigBuilder for configuring a logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[test]
fn test_builder() {
    let memory = LogMemory::default();
    let logger = logger_config()
        .with_level(Severity::Latency)
        .with_log_file("/tmp/dslog_builder.log")
        .with_file_sink(false)
        .with_timer(true)
        .with_enabled(false)
        .with_console(memory.clone())
        .build();
    assert_eq!(logger.level(), Severity::Latency);
    assert_eq!(logger.file_path(), PathBuf::from("/tmp/dslog_builder.log"));
    assert!(!logger.is_file_sink_enabled());
    assert!(logger.is_timer_enabled());
    assert!(!logger.is_enabled());
    logger.log_msg("muted");
    assert!(memory.lines().is_empty());
}
