//! JSON lines sink (CloudWatch).

use serde_json::{Map, Value};

use crate::format::Format;
use crate::handler::{Handler, HandlerError, LineWriter, Outcome, Writer};
use crate::record::{Record, Severity};

/// Writes one JSON object per record: `time`, `level`, `source`, `msg`,
/// then the record attributes in insertion order.
#[derive(Debug)]
pub struct JsonHandler {
    writer: LineWriter,
    level: Severity,
    format: Format,
}

impl JsonHandler {
    pub fn new(writer: Writer, level: Severity, format: Format) -> Self {
        Self {
            writer: LineWriter::new(writer),
            level,
            format,
        }
    }

    /// Render the record as a JSON object.
    pub fn encode(&self, record: &Record) -> Result<Map<String, Value>, HandlerError> {
        let header = self.format.header(record);
        let mut obj = Map::with_capacity(record.attrs.len() + 4);

        if let Some(time) = header.time {
            obj.insert("time".to_string(), Value::String(time));
        }
        obj.insert("level".to_string(), Value::String(header.level));
        if let Some(source) = header.source {
            obj.insert("source".to_string(), serde_json::to_value(source)?);
        }
        obj.insert("msg".to_string(), Value::String(record.message.clone()));
        for (key, value) in &record.attrs {
            obj.insert(key.clone(), value.clone());
        }

        Ok(obj)
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Severity) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError> {
        let line = serde_json::to_string(&self.encode(record)?)?;
        self.writer.write_line(&line)?;
        Ok(Outcome::Emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::Buffer;
    use crate::record::Source;

    #[test]
    fn test_cloudwatch_line() {
        let buf = Buffer::default();
        let handler = JsonHandler::new(Box::new(buf.clone()), Severity::Info, Format::cloudwatch());

        let record = Record::new(Severity::Critical, "quote \"here\"")
            .with_source(Source::new(Some("app::billing"), "src/billing.rs", 12))
            .attr("invoice", 42);
        assert_eq!(handler.handle(&record).unwrap(), Outcome::Emitted);

        let line = buf.contents();
        assert!(line.ends_with('\n'));
        let value: Value = serde_json::from_str(line.trim_end()).unwrap();
        let obj = value.as_object().unwrap();

        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["level", "source", "msg", "invoice"]);
        assert_eq!(obj["level"], "CRITICAL");
        assert_eq!(obj["msg"], "quote \"here\"");
        assert_eq!(obj["source"]["file"], "src/billing.rs");
        assert_eq!(obj["source"]["module"], "app::billing");
        assert_eq!(obj["invoice"], 42);
    }

    #[test]
    fn test_enabled() {
        let handler = JsonHandler::new(Box::new(Buffer::default()), Severity::Warn, Format::default());
        assert!(!handler.enabled(Severity::Notice));
        assert!(handler.enabled(Severity::Warn));
    }

    #[test]
    fn test_default_format_has_time() {
        let handler = JsonHandler::new(Box::new(Buffer::default()), Severity::Info, Format::default());
        let obj = handler.encode(&Record::new(Severity::Notice, "x")).unwrap();

        assert!(obj.contains_key("time"));
        assert_eq!(obj["level"], "INFO+2");
        assert!(!obj.contains_key("source"));
    }
}
