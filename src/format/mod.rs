//! Record formatting.
//!
//! # Data Flow
//! ```text
//! Record
//!     → attributes.rs (time / level / source fields, per Format)
//!     → color.rs (ANSI sequences, console only)
//!     → handler (JSON line or console line)
//! ```

pub mod attributes;
pub mod color;
pub mod shorten;

use serde::{Deserialize, Serialize};

pub use attributes::{Header, SourceField};

/// Rendering of the level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelNames {
    /// Relative to a base level: `INFO+2`, `ERROR+42`.
    #[default]
    Base,
    /// `NOTICE`, `CRITICAL`.
    Long,
    /// `NTC`, `CRT`.
    Short,
}

/// Rendering of the source field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// No source field.
    #[default]
    None,
    /// File as reported by the compiler.
    Full,
    /// Base name of the file only.
    FileName,
    /// Root-stripped, vowel-shortened directories.
    Shorten,
}

/// Formatting options shared by all handlers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Format {
    /// Emit the time field.
    pub timestamp: bool,

    /// strftime format of the time field; RFC 3339 when unset.
    pub time_format: Option<String>,

    pub level_names: LevelNames,

    /// Colour the level name (and, on the console, text and attributes).
    pub color: bool,

    pub source: SourceMode,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            timestamp: true,
            time_format: None,
            level_names: LevelNames::Base,
            color: false,
            source: SourceMode::None,
        }
    }
}

impl Format {
    /// Console preset: short coloured levels, `[15:04:05.000]` time, shortened source.
    pub fn console() -> Self {
        Self {
            timestamp: true,
            time_format: Some("[%H:%M:%S%.3f]".to_string()),
            level_names: LevelNames::Short,
            color: true,
            source: SourceMode::Shorten,
        }
    }

    /// CloudWatch preset: no time (the agent adds it), long levels, shortened source.
    pub fn cloudwatch() -> Self {
        Self {
            timestamp: false,
            time_format: None,
            level_names: LevelNames::Long,
            color: false,
            source: SourceMode::Shorten,
        }
    }
}
