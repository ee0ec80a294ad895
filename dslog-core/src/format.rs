use std::{borrow::Cow, fmt, sync::LazyLock};

use colored::Colorize;
use regex::Regex;

use crate::Severity;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape pattern is valid"));

/// Renders one log event as a console line.
///
/// The layout is `[LEVEL] Line <n>, <call_site>: <message>`. The level tag, the line
/// and the call site are each optional; the location fields that are present are
/// joined with `", "` and separated from the tag by a single space.
pub fn render(
    message: &str,
    level: Option<Severity>,
    line: Option<u32>,
    call_site: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(level) = level {
        out.push_str(&format!("[{}]", level.colored_name()));
    }
    let location: Vec<Cow<'_, str>> = line
        .map(|line| Cow::Owned(format!("Line {line}")))
        .into_iter()
        .chain(call_site.map(Cow::Borrowed))
        .collect();
    if !location.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&location.join(", "));
    }
    out.push_str(&format!(": {}", message.bright_white()));
    out
}

/// Removes every ANSI escape sequence (`ESC [ <digits/semicolons> <letter>`) from `text`.
pub fn strip_color(text: &str) -> String {
    let mut stripped = ANSI_ESCAPE.replace_all(text, "").into_owned();
    // removing a sequence can splice a new one together, e.g. "\x1b\x1b[0m[31m"
    while ANSI_ESCAPE.is_match(&stripped) {
        stripped = ANSI_ESCAPE.replace_all(&stripped, "").into_owned();
    }
    stripped
}

/// Displays a slice as `[e0, e1, ...]`.
#[derive(Debug, Clone, Copy)]
pub struct Seq<'a, T>(pub &'a [T]);

impl<T: fmt::Display> fmt::Display for Seq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_separator_scheme() {
        let plain = |line: Option<u32>, call_site: Option<&'static str>| {
            strip_color(&render("hi", Some(Severity::Info), line, call_site))
        };
        assert_eq!(plain(None, None), "[INFO]: hi");
        assert_eq!(plain(Some(7), None), "[INFO] Line 7: hi");
        assert_eq!(plain(None, Some("app::run")), "[INFO] app::run: hi");
        assert_eq!(plain(Some(7), Some("app::run")), "[INFO] Line 7, app::run: hi");
        assert_eq!(strip_color(&render("hi", None, Some(3), None)), "Line 3: hi");
        assert_eq!(strip_color(&render("hi", None, None, None)), ": hi");
    }

    #[test]
    fn test_render_names_only_its_own_level() {
        for level in Severity::ALL {
            let line = render("payload", Some(level), Some(12), Some("caller"));
            assert!(line.contains(level.name()));
            for other in Severity::ALL.into_iter().filter(|other| *other != level) {
                assert!(!line.contains(other.name()), "{line:?} mentions {other}");
            }
        }
    }

    #[test]
    fn test_render_colors_are_stripped() {
        colored::control::set_override(true);
        let line = render("payload", Some(Severity::Error), Some(1), Some("f"));
        assert!(line.contains("\x1b["));
        let stripped = strip_color(&line);
        assert!(!ANSI_ESCAPE.is_match(&stripped));
        assert_eq!(stripped, "[ERROR] Line 1, f: payload");

        let messages = ["payload", "already \x1b[31mred\x1b[0m", "lonely \x1b escape", ""];
        for level in Severity::ALL {
            for line in [None, Some(42)] {
                for call_site in [None, Some("worker::run")] {
                    for message in messages {
                        let stripped = strip_color(&render(message, Some(level), line, call_site));
                        assert!(!ANSI_ESCAPE.is_match(&stripped), "{stripped:?}");
                        assert!(stripped.starts_with(&format!("[{}]", level.name())));
                        assert!(stripped.ends_with(&strip_color(message)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_strip_color_is_idempotent() {
        let samples = [
            "",
            "no escapes at all",
            "\x1b[31mred\x1b[0m plain",
            "\x1b[1;38;5;208mbold orange\x1b[0m",
            "\x1b\x1b[0m[31mspliced",
            "lonely \x1b without bracket",
            "μs and ünïcödé",
        ];
        for sample in samples {
            let once = strip_color(sample);
            assert_eq!(strip_color(&once), once);
            assert!(!ANSI_ESCAPE.is_match(&once));
        }
        assert_eq!(strip_color("\x1b[31mred\x1b[0m plain"), "red plain");
        assert_eq!(strip_color("lonely \x1b without bracket"), "lonely \x1b without bracket");
        assert_eq!(strip_color("μs and ünïcödé"), "μs and ünïcödé");
    }

    #[test]
    fn test_seq_display() {
        assert_eq!(Seq(&[1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Seq::<u8>(&[]).to_string(), "[]");
        assert_eq!(Seq(&["a"]).to_string(), "[a]");
    }
}
