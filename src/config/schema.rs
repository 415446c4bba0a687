//! Configuration schema definitions.
//!
//! Every field is optional: an unset field keeps the value of the profile
//! preset, so a minimal file only lists what differs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format::{Format, LevelNames, SourceMode};
use crate::record::Severity;
use crate::routing::LevelRules;

/// Output profile: console lines or CloudWatch JSON lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Console,
    #[serde(alias = "CloudWatch")]
    CloudWatch,
}

impl Profile {
    pub fn format(self) -> Format {
        match self {
            Profile::Console => Format::console(),
            Profile::CloudWatch => Format::cloudwatch(),
        }
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    /// `CloudWatch` (any case) selects JSON, anything else the console.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("cloudwatch") {
            Ok(Profile::CloudWatch)
        } else {
            Ok(Profile::Console)
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Console => f.write_str("console"),
            Profile::CloudWatch => f.write_str("cloudwatch"),
        }
    }
}

/// Root configuration of the logger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output profile (console or cloudwatch).
    pub profile: Option<Profile>,

    /// Default level for paths without a module rule.
    pub level: Option<Severity>,

    /// Emit the time field.
    pub timestamp: Option<bool>,

    /// strftime format of the time field.
    pub time_format: Option<String>,

    /// Level rendering (base, long, short).
    pub level_names: Option<LevelNames>,

    /// ANSI colours.
    pub color: Option<bool>,

    /// Source rendering (none, full, file_name, shorten).
    pub source: Option<SourceMode>,

    /// Path pattern → level. `prefix*` patterns are wildcards.
    pub modules: BTreeMap<String, Severity>,
}

impl LoggerConfig {
    pub fn profile(&self) -> Profile {
        self.profile.unwrap_or_default()
    }

    pub fn level(&self) -> Severity {
        self.level.unwrap_or_default()
    }

    /// Preset of the profile with the explicit fields laid on top.
    pub fn format(&self) -> Format {
        let mut format = self.profile().format();
        if let Some(timestamp) = self.timestamp {
            format.timestamp = timestamp;
        }
        if let Some(time_format) = &self.time_format {
            format.time_format = Some(time_format.clone());
        }
        if let Some(level_names) = self.level_names {
            format.level_names = level_names;
        }
        if let Some(color) = self.color {
            format.color = color;
        }
        if let Some(source) = self.source {
            format.source = source;
        }
        format
    }

    /// Compile the level rules.
    pub fn rules(&self) -> LevelRules {
        LevelRules::with_modules(self.level(), self.modules.iter().map(|(pattern, level)| (pattern.as_str(), *level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: LoggerConfig = toml::from_str("").unwrap();
        assert_eq!(config.profile(), Profile::Console);
        assert_eq!(config.level(), Severity::Info);
        assert_eq!(config.format(), Format::console());
    }

    #[test]
    fn test_overlay_on_preset() {
        let config: LoggerConfig = toml::from_str(
            r#"
            profile = "cloudwatch"
            level = "DEBUG"
            source = "file_name"

            [modules]
            "my_app::db" = "WARN"
            "my_app/http/*" = "ERROR"
            "#,
        )
        .unwrap();

        let format = config.format();
        assert_eq!(format.source, SourceMode::FileName);
        assert!(!format.timestamp);
        assert_eq!(format.level_names, LevelNames::Long);

        let rules = config.rules();
        assert_eq!(rules.default, Severity::Debug);
        assert_eq!(rules.trie.resolve("my_app/db/pool"), Some(Severity::Warn));
        assert_eq!(rules.trie.resolve("my_app/http/server"), Some(Severity::Error));
    }

    #[test]
    fn test_profile_names() {
        let config: LoggerConfig = toml::from_str(r#"profile = "CloudWatch""#).unwrap();
        assert_eq!(config.profile(), Profile::CloudWatch);

        assert_eq!("CloudWatch".parse::<Profile>().unwrap(), Profile::CloudWatch);
        assert_eq!("stdio".parse::<Profile>().unwrap(), Profile::Console);
    }
}
