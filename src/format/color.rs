//! ANSI colour tables for console output.

use crate::record::Severity;

pub const RESET: &str = "\x1b[0m";

/// Colour of the level name.
pub const fn level_name(level: Severity) -> &'static str {
    match level {
        Severity::Emergency => "\x1b[1;48;5;198m", // red (intensive)
        Severity::Critical => "\x1b[48;5;160m",    // red (mid-intensive)
        Severity::Error => "\x1b[1;31m",           // red
        Severity::Warn => "\x1b[1;38;5;178m",      // orange
        Severity::Notice => "\x1b[0;38;5;111m",    // blue
        Severity::Info => "\x1b[38;5;255m",        // white
        Severity::Debug => "\x1b[38;5;248m",       // grey
    }
}

/// Colour of the message text.
pub const fn text(level: Severity) -> &'static str {
    match level {
        Severity::Emergency => "\x1b[1;38;5;198m",
        Severity::Critical => "\x1b[0;38;5;160m",
        Severity::Error | Severity::Warn | Severity::Notice | Severity::Info => "\x1b[38;5;15m",
        Severity::Debug => RESET,
    }
}

/// Colour of the attribute block.
pub const fn attrs(level: Severity) -> &'static str {
    match level {
        Severity::Emergency | Severity::Critical => "\x1b[38;5;255m",
        Severity::Error => "\x1b[38;5;250m",
        Severity::Warn | Severity::Notice => "\x1b[38;5;244m",
        Severity::Info | Severity::Debug => "\x1b[90m",
    }
}

/// Wrap `s` in `color` and a reset sequence.
pub fn paint(color: &str, s: &str) -> String {
    format!("{color}{s}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint() {
        assert_eq!(paint(level_name(Severity::Error), "ERR"), "\x1b[1;31mERR\x1b[0m");
    }

    #[test]
    fn test_every_level_has_colors() {
        for level in Severity::ALL {
            assert!(level_name(level).starts_with("\x1b["));
            assert!(text(level).starts_with("\x1b["));
            assert!(attrs(level).starts_with("\x1b["));
        }
    }
}
