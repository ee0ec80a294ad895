//! # dslog-timer
//! Scope timers reporting how long a block took through dslog's logger.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! dslog-timer = "0.1.0"
//! dslog = "0.1.0"
//! ```
//!
//! ```rust
//! use dslog::logger_config;
//! use dslog_timer::LatencyTimer;
//!
//! let logger = logger_config().build();
//! {
//!     let _timer = LatencyTimer::new(&logger, "load config");
//!     std::thread::sleep(std::time::Duration::from_millis(5));
//! } // logs "[LATENCY]: load config: Estimated 5ms"
//! ```
//!
//! The report is emitted exactly once, whether the scope ends normally, through an
//! early return, or while unwinding from a panic.

use std::time::{Duration, Instant};

use dslog::{Logger, Severity};

/// Guard logging the time elapsed since its creation when it goes out of scope.
pub struct LatencyTimer<'a> {
    logger: &'a Logger,
    name: String,
    start: Instant,
    finished: bool,
}

impl<'a> LatencyTimer<'a> {
    pub fn new(logger: &'a Logger, name: impl Into<String>) -> Self {
        Self {
            logger,
            name: name.into(),
            start: Instant::now(),
            finished: false,
        }
    }

    /// Like [`LatencyTimer::new`], also logging `"<name>: Started"`.
    pub fn with_start_line(logger: &'a Logger, name: impl Into<String>) -> Self {
        let timer = Self::new(logger, name);
        logger.log(
            format!("{}: Started", timer.name),
            Some(Severity::Latency),
            None,
            None,
        );
        timer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reports now instead of at the end of the scope.
    pub fn finish(mut self) {
        self.report();
    }

    fn report(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let estimated_ms = self.elapsed().as_millis();
        self.logger.log(
            format!("{}: Estimated {estimated_ms}ms", self.name),
            Some(Severity::Latency),
            None,
            None,
        );
    }
}

impl Drop for LatencyTimer<'_> {
    fn drop(&mut self) {
        self.report();
    }
}

/// Runs `f` inside a [`LatencyTimer`] named `name` and returns its result.
pub fn time_block<T>(logger: &Logger, name: &str, f: impl FnOnce() -> T) -> T {
    let _timer = LatencyTimer::new(logger, name);
    f()
}

#[test]
fn test_latency_timer() {
    use dslog::{LogMemory, logger_config, strip_color};

    let memory = LogMemory::default();
    let logger = logger_config().with_console(memory.clone()).build();
    {
        let timer = LatencyTimer::with_start_line(&logger, "Test");
        assert_eq!(timer.name(), "Test");
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));
    }
    let lines: Vec<String> = memory.lines().iter().map(|l| strip_color(l)).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[LATENCY]: Test: Started");
    assert!(lines[1].starts_with("[LATENCY]: Test: Estimated "));
    assert!(lines[1].ends_with("ms"));
}
