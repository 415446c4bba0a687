//! Log record model.
//!
//! # Data Flow
//! ```text
//! call site (macro / #[track_caller] / tracing event)
//!     → Record { time, level, message, source, attrs }
//!     → handler (gate on level router, then format and write)
//! ```

pub mod level;
pub mod measure;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

pub use level::{ParseSeverityError, Severity};

/// Location of the code that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// Rust module path, e.g. `my_app::db::pool`.
    pub module: Option<&'static str>,
    /// Source file as reported by the compiler.
    pub file: &'static str,
    pub line: u32,
}

impl Source {
    pub const fn new(module: Option<&'static str>, file: &'static str, line: u32) -> Self {
        Self { module, file, line }
    }

    /// Source of the caller of a `#[track_caller]` function. Only the file is
    /// known in that case.
    pub fn from_location(location: &'static std::panic::Location<'static>) -> Self {
        Self {
            module: None,
            file: location.file(),
            line: location.line(),
        }
    }
}

/// A single log record.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Severity,
    pub message: String,
    pub source: Option<Source>,
    pub attrs: Vec<(String, Value)>,
}

impl Record {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach an attribute. Values that fail to serialize are recorded as
    /// the serialization error message.
    pub fn attr(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()));
        self.attrs.push((key.into(), value));
        self
    }

    /// Attach an error under the `err` key.
    pub fn error(self, err: &dyn std::error::Error) -> Self {
        self.attr("err", err.to_string())
    }
}
