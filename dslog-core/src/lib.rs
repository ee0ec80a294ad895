//! # dslog-core
//! Core utilities for dslog - severity table, line rendering, color stripping and
//! elapsed-time prefixes shared by the logger and its helpers.

mod config;
mod elapsed;
mod format;
mod log_writer;
mod severity;

pub use config::{ConfigError, EnvConfig};
pub use elapsed::{Elapsed, elapsed_prefix, start_instant};
pub use format::{Seq, render, strip_color};
pub use log_writer::{LogMemory, LogStdout, LogWriter, append_line};
pub use severity::{AtomicSeverity, ParseSeverityError, Severity};
