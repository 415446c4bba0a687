//! Header attributes: time, level and source.
//!
//! Each field is rendered by its own rule so handlers only deal with the
//! finished strings.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::format::color;
use crate::format::shorten::shorten;
use crate::format::{Format, LevelNames, SourceMode};
use crate::record::{Record, Severity, Source};
use crate::routing::path::{normalize, strip_root};

/// Rendered header of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub time: Option<String>,
    pub level: String,
    pub source: Option<SourceField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub file: String,
    pub line: u32,
}

impl Format {
    pub fn header(&self, record: &Record) -> Header {
        Header {
            time: self.timestamp.then(|| time_field(self.time_format.as_deref(), &record.time)),
            level: level_field(self.level_names, self.color, record.level),
            source: record.source.as_ref().and_then(|s| source_field(self.source, s)),
        }
    }
}

/// True when `format` is a valid strftime string.
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Time using a strftime format, RFC 3339 with milliseconds otherwise or
/// when the format is invalid.
pub fn time_field(format: Option<&str>, time: &DateTime<Local>) -> String {
    if let Some(format) = format {
        let mut out = String::new();
        if write!(out, "{}", time.format(format)).is_ok() {
            return out;
        }
    }
    time.to_rfc3339_opts(SecondsFormat::Millis, false)
}

pub fn level_field(names: LevelNames, paint: bool, level: Severity) -> String {
    let name = match names {
        LevelNames::Base => return level.base_name(),
        LevelNames::Long => level.long_name(),
        LevelNames::Short => level.short_name(),
    };

    if !paint {
        return name.to_string();
    }
    color::paint(color::level_name(level), name)
}

pub fn source_field(mode: SourceMode, source: &Source) -> Option<SourceField> {
    let module = source.module.map(str::to_string);
    let (module, file) = match mode {
        SourceMode::None => return None,
        SourceMode::Full => (module, source.file.to_string()),
        SourceMode::FileName => (module, file_name(source.file).to_string()),
        SourceMode::Shorten => (
            source.module.map(|m| shorten(m, "::")),
            shorten(strip_root(&normalize(source.file)), "/"),
        ),
    };

    Some(SourceField {
        module,
        file,
        line: source.line,
    })
}

fn file_name(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
