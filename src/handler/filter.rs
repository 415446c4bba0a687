//! Per-path level gate in front of a sink.

use std::sync::Arc;

use crate::handler::{Handler, HandlerError, Outcome};
use crate::record::{Record, Severity};
use crate::routing::LevelRouter;

/// Passes a record to the inner handler only when its level reaches the
/// threshold of its call site.
#[derive(Debug)]
pub struct PathLevelHandler<H> {
    inner: H,
    router: Arc<LevelRouter>,
}

impl<H: Handler> PathLevelHandler<H> {
    pub fn new(inner: H, router: Arc<LevelRouter>) -> Self {
        Self { inner, router }
    }

    pub fn router(&self) -> &Arc<LevelRouter> {
        &self.router
    }
}

impl<H: Handler> Handler for PathLevelHandler<H> {
    /// The threshold depends on the call site, so every level may pass.
    fn enabled(&self, _level: Severity) -> bool {
        true
    }

    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError> {
        if !self.router.enabled(record.source.as_ref(), record.level) {
            return Ok(Outcome::Suppressed);
        }
        self.inner.handle(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::handler::test_support::Buffer;
    use crate::handler::JsonHandler;
    use crate::record::Source;
    use crate::routing::LevelRules;

    fn handler(buf: &Buffer) -> PathLevelHandler<JsonHandler> {
        let rules = LevelRules::with_modules(
            Severity::Warn,
            [("app::db", Severity::Debug), ("app::http", Severity::Error)],
        );
        // the sink level is bypassed once the router decides
        let sink = JsonHandler::new(Box::new(buf.clone()), Severity::Emergency, Format::cloudwatch());
        PathLevelHandler::new(sink, Arc::new(LevelRouter::new(rules)))
    }

    fn at(module: &'static str, level: Severity) -> Record {
        Record::new(level, "m").with_source(Source::new(Some(module), "src/lib.rs", 1))
    }

    #[test]
    fn test_gates_on_call_site() {
        let buf = Buffer::default();
        let h = handler(&buf);
        assert!(h.enabled(Severity::Debug));

        assert_eq!(h.handle(&at("app::db::pool", Severity::Debug)).unwrap(), Outcome::Emitted);
        assert_eq!(h.handle(&at("app::http", Severity::Warn)).unwrap(), Outcome::Suppressed);
        assert_eq!(h.handle(&at("app::http", Severity::Error)).unwrap(), Outcome::Emitted);
        assert_eq!(buf.contents().lines().count(), 2);
    }

    #[test]
    fn test_unmatched_path_uses_default() {
        let buf = Buffer::default();
        let h = handler(&buf);

        assert_eq!(h.handle(&at("app::cli", Severity::Info)).unwrap(), Outcome::Suppressed);
        assert_eq!(h.handle(&at("app::cli", Severity::Warn)).unwrap(), Outcome::Emitted);
        assert_eq!(h.handle(&Record::new(Severity::Notice, "no source")).unwrap(), Outcome::Suppressed);
    }

    #[test]
    fn test_branch_node_is_not_a_rule() {
        let buf = Buffer::default();
        let rules = LevelRules::with_modules(
            Severity::Error,
            [("app/abc", Severity::Debug), ("app/abd", Severity::Debug)],
        );
        let sink = JsonHandler::new(Box::new(buf.clone()), Severity::Debug, Format::cloudwatch());
        let h = PathLevelHandler::new(sink, Arc::new(LevelRouter::new(rules)));

        // "app/ab" ends on the split point, which has no level of its own
        let rules = h.router().snapshot();
        let (_, node) = rules.trie.lookup("app/ab");
        assert_eq!(node.segment(), "app/ab");
        assert_eq!(node.level(), None);
        assert_eq!(h.handle(&at("app::ab", Severity::Info)).unwrap(), Outcome::Suppressed);
    }
}
