use std::{
    fmt,
    sync::LazyLock,
    time::{Duration, Instant},
};

use colored::Colorize;

static START: LazyLock<Instant> = LazyLock::new(Instant::now);

/// The instant all elapsed-time prefixes are measured from.
///
/// Captured the first time the logging subsystem asks for it and never changed afterwards.
pub fn start_instant() -> Instant {
    *START
}

/// A duration expressed in the smallest unit that holds at least one whole unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elapsed {
    value: f64,
    unit: &'static str,
}

impl Elapsed {
    pub fn from_duration(duration: Duration) -> Self {
        if duration < Duration::from_micros(1) {
            Self { value: duration.as_nanos() as f64, unit: "ns" }
        } else if duration < Duration::from_millis(1) {
            Self { value: duration.as_micros() as f64, unit: "μs" }
        } else if duration < Duration::from_secs(1) {
            Self { value: duration.as_millis() as f64, unit: "ms" }
        } else {
            Self { value: duration.as_millis() as f64 / 1000.0, unit: "s" }
        }
    }

    /// Time from `baseline` to `now`, zero if `now` is earlier.
    pub fn between(baseline: Instant, now: Instant) -> Self {
        Self::from_duration(now.saturating_duration_since(baseline))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Console flavour: the value is highlighted.
    pub fn colored(&self) -> String {
        let value = format!("{:.3}", self.value);
        format!("[{}{}]", value.as_str().bright_yellow(), self.unit)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}{}]", self.value, self.unit)
    }
}

/// Plain `[<value><unit>]` prefix for the time between `baseline` and `now`.
pub fn elapsed_prefix(now: Instant, baseline: Instant) -> String {
    Elapsed::between(baseline, now).to_string()
}

#[test]
fn test_elapsed_tiers() {
    let baseline = Instant::now();
    let at = |duration: Duration| elapsed_prefix(baseline + duration, baseline);
    assert_eq!(at(Duration::from_nanos(500)), "[500.000ns]");
    assert_eq!(at(Duration::from_micros(500)), "[500.000μs]");
    assert_eq!(at(Duration::from_millis(500)), "[500.000ms]");
    assert_eq!(at(Duration::from_millis(1500)), "[1.500s]");
    assert_eq!(at(Duration::ZERO), "[0.000ns]");
}

#[test]
fn test_elapsed_tier_boundaries() {
    let tier = |duration: Duration| Elapsed::from_duration(duration).unit();
    assert_eq!(tier(Duration::from_nanos(999)), "ns");
    assert_eq!(tier(Duration::from_micros(1)), "μs");
    assert_eq!(tier(Duration::from_nanos(999_999)), "μs");
    assert_eq!(tier(Duration::from_millis(1)), "ms");
    assert_eq!(tier(Duration::from_micros(999_999)), "ms");
    assert_eq!(tier(Duration::from_secs(1)), "s");
    // whole units are truncated, not rounded
    assert_eq!(Elapsed::from_duration(Duration::from_nanos(1_999)).value(), 1.0);
    assert_eq!(Elapsed::from_duration(Duration::from_micros(2_345_678)).to_string(), "[2.345s]");
}

#[test]
fn test_elapsed_saturates_before_baseline() {
    let baseline = Instant::now() + Duration::from_secs(5);
    assert_eq!(elapsed_prefix(Instant::now(), baseline), "[0.000ns]");
}

#[test]
fn test_elapsed_colored_strips_to_plain() {
    let elapsed = Elapsed::from_duration(Duration::from_millis(42));
    assert_eq!(crate::strip_color(&elapsed.colored()), elapsed.to_string());
}
