use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU8, Ordering},
};

use colored::{Color, ColoredString, Colorize};

/// Closed set of log importance tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Latency = 2,
    Warning = 3,
    Error = 4,
    Testing = 5,
}

impl Severity {
    /// Every variant, in declaration order.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Latency,
        Severity::Warning,
        Severity::Error,
        Severity::Testing,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Latency => "LATENCY",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Testing => "TESTING",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Severity::Debug => Color::Magenta,
            Severity::Info => Color::Green,
            Severity::Latency => Color::Cyan,
            Severity::Warning => Color::Blue,
            Severity::Error => Color::Red,
            Severity::Testing => Color::Yellow,
        }
    }

    /// Display name wrapped in the severity color.
    pub fn colored_name(self) -> ColoredString {
        self.name().color(self.color())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

/// Error returned when text or a raw value does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    input: String,
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity level: {:?}", self.input)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("warn") {
            return Ok(Severity::Warning);
        }
        Severity::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeverityError { input: s.into() })
    }
}

impl TryFrom<u8> for Severity {
    type Error = ParseSeverityError;

    fn try_from(raw: u8) -> Result<Self, ParseSeverityError> {
        Severity::ALL
            .get(raw as usize)
            .copied()
            .ok_or_else(|| ParseSeverityError {
                input: raw.to_string(),
            })
    }
}

/// A severity cell that can be shared between threads.
#[derive(Debug)]
pub struct AtomicSeverity(AtomicU8);

impl AtomicSeverity {
    pub const fn new(level: Severity) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub fn load(&self) -> Severity {
        // only `store` and `new` write the cell, both with a valid discriminant
        Severity::try_from(self.0.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn store(&self, level: Severity) {
        self.0.store(level as u8, Ordering::Relaxed);
    }
}

impl Default for AtomicSeverity {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

#[test]
fn test_severity_roundtrips_through_text_and_u8() {
    for level in Severity::ALL {
        assert_eq!(level.name().parse::<Severity>(), Ok(level));
        assert_eq!(level.name().to_lowercase().parse::<Severity>(), Ok(level));
        assert_eq!(Severity::try_from(level as u8), Ok(level));
        assert_eq!(level.to_string(), level.name());
    }
    assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
    assert!("verbose".parse::<Severity>().is_err());
    assert!(Severity::try_from(6).is_err());
}

#[test]
fn test_severity_from_log_level() {
    assert_eq!(Severity::from(log::Level::Error), Severity::Error);
    assert_eq!(Severity::from(log::Level::Warn), Severity::Warning);
    assert_eq!(Severity::from(log::Level::Info), Severity::Info);
    assert_eq!(Severity::from(log::Level::Debug), Severity::Debug);
    assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
}

#[test]
fn test_atomic_severity() {
    let cell = AtomicSeverity::default();
    assert_eq!(cell.load(), Severity::Info);
    for level in Severity::ALL {
        cell.store(level);
        assert_eq!(cell.load(), level);
    }
    // a raw value outside the table decodes to the default instead of panicking
    cell.0.store(u8::MAX, Ordering::Relaxed);
    assert_eq!(cell.load(), Severity::Info);
}
