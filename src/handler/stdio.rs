//! Console sink.
//!
//! ```text
//! [14:05:09.000] INF server started {
//!   "source": { ... },
//!   "port": 8080
//! }
//! ```

use serde_json::{Map, Value};

use crate::format::{color, Format};
use crate::handler::{Handler, HandlerError, LineWriter, Outcome, Writer};
use crate::record::{Record, Severity};

/// Human-readable sink: `time level message`, followed by the remaining
/// attributes as indented JSON.
#[derive(Debug)]
pub struct StdioHandler {
    writer: LineWriter,
    level: Severity,
    format: Format,
}

impl StdioHandler {
    pub fn new(writer: Writer, level: Severity, format: Format) -> Self {
        Self {
            writer: LineWriter::new(writer),
            level,
            format,
        }
    }

    pub fn render(&self, record: &Record) -> Result<String, HandlerError> {
        let header = self.format.header(record);

        let mut parts = Vec::with_capacity(4);
        if let Some(time) = header.time {
            parts.push(time);
        }
        parts.push(header.level);
        parts.push(self.paint(color::text(record.level), &record.message));

        let mut attrs = Map::with_capacity(record.attrs.len() + 1);
        if let Some(source) = header.source {
            attrs.insert("source".to_string(), serde_json::to_value(source)?);
        }
        for (key, value) in &record.attrs {
            attrs.insert(key.clone(), value.clone());
        }
        if !attrs.is_empty() {
            let block = serde_json::to_string_pretty(&Value::Object(attrs))?;
            parts.push(self.paint(color::attrs(record.level), &block));
        }

        Ok(parts.join(" "))
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.format.color {
            color::paint(code, s)
        } else {
            s.to_string()
        }
    }
}

impl Handler for StdioHandler {
    fn enabled(&self, level: Severity) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError> {
        let line = self.render(record)?;
        self.writer.write_line(&line)?;
        Ok(Outcome::Emitted)
    }
}
