//! Bridge from `tracing` events to cloudlog records.
//!
//! `CloudLogLayer` turns every event it sees into a [`Record`] and hands it
//! to a [`Logger`]. `PathLevelFilter` is a per-layer filter that applies the
//! path-keyed levels of a [`LevelRouter`] to `tracing` callsites, so that
//! crates instrumented with `tracing` obey the same rules.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Filter, Layer};

use crate::logger::Logger;
use crate::record::{Record, Severity, Source};
use crate::routing::path::{normalize, strip_root};
use crate::routing::LevelRouter;

/// Layer forwarding `tracing` events to a [`Logger`].
#[derive(Debug, Clone)]
pub struct CloudLogLayer {
    logger: Logger,
}

impl CloudLogLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    fn record(event: &Event<'_>) -> Record {
        let meta = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut record = Record::new(Severity::from(*meta.level()), visitor.message.unwrap_or_default());
        record.source = Some(Source::new(
            meta.module_path(),
            meta.file().unwrap_or("<unknown>"),
            meta.line().unwrap_or(0),
        ));
        record.attrs = visitor.fields.into_iter().collect();
        record
    }
}

impl<S: Subscriber> Layer<S> for CloudLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = Self::record(event);
        let _ = self.logger.log(record);
    }
}

/// Collects the `message` field and every other field as a JSON value.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.insert(field, Value::String(format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.insert(field, Value::String(value.to_owned()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::String(value.to_string()));
    }
}

/// Per-layer filter gating callsites on a [`LevelRouter`].
#[derive(Debug, Clone)]
pub struct PathLevelFilter {
    router: Arc<LevelRouter>,
}

impl PathLevelFilter {
    pub fn new(router: Arc<LevelRouter>) -> Self {
        Self { router }
    }

    /// Trie key of a callsite: module path, else the root-stripped file.
    fn key<'a>(meta: &Metadata<'a>) -> Cow<'a, str> {
        if let Some(module) = meta.module_path() {
            return normalize(module);
        }
        match normalize(meta.file().unwrap_or_default()) {
            Cow::Borrowed(file) => Cow::Borrowed(strip_root(file)),
            Cow::Owned(file) => Cow::Owned(strip_root(&file).to_string()),
        }
    }

    pub fn allows(&self, meta: &Metadata<'_>) -> bool {
        let threshold = self.router.snapshot().path_threshold(&Self::key(meta));
        Severity::from(*meta.level()) >= threshold
    }
}

impl<S: Subscriber> Filter<S> for PathLevelFilter {
    fn enabled(&self, meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.allows(meta)
    }

    // Rules can be swapped at any time, so no callsite interest is cached.
    fn callsite_enabled(&self, _meta: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test_support::Buffer;
    use crate::logger::LoggerBuilder;
    use crate::routing::LevelRules;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_events_become_records() {
        let buf = Buffer::default();
        let logger = LoggerBuilder::cloudwatch()
            .writer(buf.clone())
            .source()
            .build();
        let subscriber = tracing_subscriber::registry().with(CloudLogLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(attempt = 3, host = "db-1", "Reconnecting");
        });

        let value: Value = serde_json::from_str(buf.contents().trim_end()).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["msg"], "Reconnecting");
        assert_eq!(value["attempt"], 3);
        assert_eq!(value["host"], "db-1");
        assert_eq!(value["source"]["module"], module_path!());
    }

    #[test]
    fn test_path_filter_follows_router() {
        let buf = Buffer::default();
        let logger = LoggerBuilder::cloudwatch()
            .writer(buf.clone())
            .level(Severity::Debug)
            .build();
        let router = Arc::new(LevelRouter::new(LevelRules::with_modules(
            Severity::Debug,
            [(module_path!(), Severity::Error)],
        )));
        let layer = CloudLogLayer::new(logger).with_filter(PathLevelFilter::new(router.clone()));
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("dropped");
            router.replace(LevelRules::new(Severity::Debug));
            tracing::info!("kept");
        });

        let out = buf.contents();
        assert!(!out.contains("dropped"));
        assert!(out.contains("kept"));
    }
}
