//! Seven-level severity scale.
//!
//! # Design Decisions
//! - Ordinal values keep the gaps of the original numeric scale so that
//!   the default rendering (`INFO+2`, `ERROR+42`) stays stable
//! - Ordering is by value: a record is emitted when `record >= threshold`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log record, from DEBUG to EMERGENCY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    /// Output debug status about the system.
    Debug,
    /// Output informative status about the system.
    #[default]
    Info,
    /// The system failed, the error was recovered, no impact.
    Notice,
    /// The system failed and cannot recover. Functionality is degraded, but
    /// the results are still correct.
    Warn,
    /// The system failed and cannot recover. Local functionality is
    /// impaired and an incorrect result is returned.
    Error,
    /// The system failed. The application cannot execute correctly but can
    /// still exit gracefully.
    Critical,
    /// The system is unusable. The caller must terminate the process after
    /// emitting the record.
    Emergency,
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseSeverityError(pub String);

impl Severity {
    /// All levels, from the most verbose to the most severe.
    pub const ALL: [Severity; 7] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warn,
        Severity::Error,
        Severity::Critical,
        Severity::Emergency,
    ];

    /// Numeric value on the original scale.
    pub const fn value(self) -> i32 {
        match self {
            Severity::Debug => -4,
            Severity::Info => 0,
            Severity::Notice => 2,
            Severity::Warn => 4,
            Severity::Error => 8,
            Severity::Critical => 50,
            Severity::Emergency => 100,
        }
    }

    pub const fn long_name(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Emergency => "EMERGENCY",
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Severity::Debug => "DEB",
            Severity::Info => "INF",
            Severity::Notice => "NTC",
            Severity::Warn => "WRN",
            Severity::Error => "ERR",
            Severity::Critical => "CRT",
            Severity::Emergency => "EMR",
        }
    }

    /// Name relative to the nearest of the four base levels
    /// (DEBUG, INFO, WARN, ERROR), e.g. `INFO+2` for NOTICE.
    pub fn base_name(self) -> String {
        let (base, value) = match self.value() {
            v if v < 0 => ("DEBUG", -4),
            v if v < 4 => ("INFO", 0),
            v if v < 8 => ("WARN", 4),
            _ => ("ERROR", 8),
        };
        match self.value() - value {
            0 => base.to_string(),
            delta => format!("{base}{delta:+}"),
        }
    }

    /// Level matching the long name of an environment suffix, e.g. `DEBUG`
    /// in `CONFIG_LOG_LEVEL_DEBUG`. Exact match only.
    pub fn from_long_name(name: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.long_name() == name)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Severity::ALL
            .into_iter()
            .find(|lvl| {
                lvl.long_name().eq_ignore_ascii_case(name) || lvl.short_name().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

impl TryFrom<String> for Severity {
    type Error = ParseSeverityError;

    fn try_from(value: String) -> Result<Self, ParseSeverityError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(level: Severity) -> Self {
        level.long_name().to_string()
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_value() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].value() < pair[1].value());
        }
    }

    #[test]
    fn test_base_names() {
        assert_eq!(Severity::Debug.base_name(), "DEBUG");
        assert_eq!(Severity::Info.base_name(), "INFO");
        assert_eq!(Severity::Notice.base_name(), "INFO+2");
        assert_eq!(Severity::Warn.base_name(), "WARN");
        assert_eq!(Severity::Error.base_name(), "ERROR");
        assert_eq!(Severity::Critical.base_name(), "ERROR+42");
        assert_eq!(Severity::Emergency.base_name(), "ERROR+92");
    }

    #[test]
    fn test_parse() {
        assert_eq!("DEBUG".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("EMR".parse::<Severity>().unwrap(), Severity::Emergency);
        assert!("VERBOSE".parse::<Severity>().is_err());

        assert_eq!(Severity::from_long_name("NOTICE"), Some(Severity::Notice));
        assert_eq!(Severity::from_long_name("notice"), None);
    }

    #[test]
    fn test_serde_uses_long_names() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");

        let level: Severity = serde_json::from_str("\"ntc\"").unwrap();
        assert_eq!(level, Severity::Notice);
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(Severity::try_from("warn".to_string()), Ok(Severity::Warn));
        assert_eq!(
            Severity::try_from("LOUD".to_string()),
            Err(ParseSeverityError("LOUD".to_string()))
        );
        assert!(serde_json::from_str::<Severity>("\"LOUD\"").is_err());
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(Severity::from(tracing::Level::TRACE), Severity::Debug);
        assert_eq!(Severity::from(tracing::Level::WARN), Severity::Warn);
    }
}
