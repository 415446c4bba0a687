//! Logger options and presets.
//!
//! # Design Decisions
//! - Presets are pure; the environment is only read by `from_env` and the
//!   `*_from_env` options
//! - Module rules, when present, put a `PathLevelHandler` in front of the
//!   sink; without them the sink checks the default level itself

use std::io::Write;
use std::sync::Arc;

use crate::config::env::{level_from_env, modules_from_env, profile_from_env};
use crate::config::schema::{LoggerConfig, Profile};
use crate::format::{Format, LevelNames, SourceMode};
use crate::handler::{Handler, JsonHandler, PathLevelHandler, StdioHandler, Writer};
use crate::logger::Logger;
use crate::record::Severity;
use crate::routing::{LevelRouter, LevelRules};

/// Builder of a [`Logger`].
pub struct LoggerBuilder {
    profile: Profile,
    writer: Option<Writer>,
    level: Severity,
    level_set: bool,
    format: Format,
    modules: Option<Vec<(String, Severity)>>,
    router: Option<Arc<LevelRouter>>,
}

impl LoggerBuilder {
    fn preset(profile: Profile) -> Self {
        Self {
            profile,
            writer: None,
            level: Severity::Info,
            level_set: false,
            format: profile.format(),
            modules: None,
            router: None,
        }
    }

    /// Console preset: short coloured levels, time of day, shortened source.
    pub fn console() -> Self {
        Self::preset(Profile::Console)
    }

    /// CloudWatch preset: JSON lines, long levels, no time, shortened source.
    pub fn cloudwatch() -> Self {
        Self::preset(Profile::CloudWatch)
    }

    /// Preset picked from `AWS_LAMBDA_FUNCTION_NAME` / `CONFIG_LOG_PROFILE`,
    /// with the default level and module rules read from the environment.
    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let profile = profile_from_env(&lookup).unwrap_or_default();
        Self::preset(profile).level_from_env().level_for_mod_from_env()
    }

    /// Builder matching a loaded configuration.
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::preset(config.profile());
        builder.level = config.level();
        builder.level_set = config.level.is_some();
        builder.format = config.format();
        if !config.modules.is_empty() {
            builder.modules = Some(
                config
                    .modules
                    .iter()
                    .map(|(pattern, level)| (pattern.clone(), *level))
                    .collect(),
            );
        }
        builder
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Log writer, default stdout.
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Default level, INFO unless configured. With a shared [`router`],
    /// an explicit level is published as the router default.
    ///
    /// [`router`]: LoggerBuilder::router
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self.level_set = true;
        self
    }

    /// Default level from `CONFIG_LOG_LEVEL`, if set to a known long name.
    pub fn level_from_env(mut self) -> Self {
        if let Some(level) = level_from_env(&|key: &str| std::env::var(key).ok()) {
            self.level = level;
            self.level_set = true;
        }
        self
    }

    /// Exclude the timestamp (CloudWatch adds its own).
    pub fn without_timestamp(mut self) -> Self {
        self.format.timestamp = false;
        self
    }

    /// strftime format of the timestamp.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.format.timestamp = true;
        self.format.time_format = Some(format.into());
        self
    }

    /// Long level names, DEBUG to EMERGENCY.
    pub fn level_long(mut self) -> Self {
        self.format.level_names = LevelNames::Long;
        self
    }

    /// Three-letter level names, DEB to EMR.
    pub fn level_short(mut self) -> Self {
        self.format.level_names = LevelNames::Short;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.format.color = color;
        self
    }

    /// Per-path levels. Each pattern applies to every path it prefixes:
    ///
    /// * a file (`my_app/src/db/pool.rs`) applies only to that file,
    /// * a module (`my_app::db`) applies to everything within it,
    /// * a crate or namespace (`my_app`) applies to all modules under it.
    ///
    /// The most specific pattern wins. A trailing `*` matches any remainder.
    ///
    /// Module patterns only match records that carry a module path, i.e.
    /// those logged through the macros. The `#[track_caller]` methods
    /// ([`Logger::debug`] and friends) only know the source file and are
    /// keyed by it (`src/db/pool.rs`), so they need file patterns.
    pub fn level_for_mod<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = (S, Severity)>,
        S: Into<String>,
    {
        self.modules = Some(modules.into_iter().map(|(p, l)| (p.into(), l)).collect());
        self
    }

    /// Per-path levels from `CONFIG_LOG_LEVEL_<NAME>` variables, replacing
    /// any rule set so far when at least one is defined.
    pub fn level_for_mod_from_env(mut self) -> Self {
        let modules = modules_from_env(&|key: &str| std::env::var(key).ok());
        if !modules.is_empty() {
            self.modules = Some(modules);
        }
        self
    }

    /// Share a router, e.g. one updated by a config watcher. Module rules
    /// set on this builder are published into it, together with the level.
    /// Without module rules, only an explicitly set level replaces the
    /// router default; otherwise the router keeps its own.
    pub fn router(mut self, router: Arc<LevelRouter>) -> Self {
        self.router = Some(router);
        self
    }

    /// Log the source file as reported by the compiler.
    pub fn source(mut self) -> Self {
        self.format.source = SourceMode::Full;
        self
    }

    pub fn without_source(mut self) -> Self {
        self.format.source = SourceMode::None;
        self
    }

    /// Log the file name of the source only.
    pub fn source_file_name(mut self) -> Self {
        self.format.source = SourceMode::FileName;
        self
    }

    /// Shorten the source path to a few letters per directory.
    pub fn source_shorten(mut self) -> Self {
        self.format.source = SourceMode::Shorten;
        self
    }

    /// Build the sink selected by the profile.
    pub fn build(self) -> Logger {
        match self.profile {
            Profile::Console => self.build_stdio(),
            Profile::CloudWatch => self.build_json(),
        }
    }

    /// JSON lines sink.
    pub fn build_json(mut self) -> Logger {
        let sink = JsonHandler::new(self.take_writer(), self.level, self.format.clone());
        self.finish(sink)
    }

    /// Console sink.
    pub fn build_stdio(mut self) -> Logger {
        let sink = StdioHandler::new(self.take_writer(), self.level, self.format.clone());
        self.finish(sink)
    }

    fn take_writer(&mut self) -> Writer {
        self.writer.take().unwrap_or_else(|| Box::new(std::io::stdout()))
    }

    fn finish<H: Handler + 'static>(self, sink: H) -> Logger {
        let router = match (self.router, self.modules) {
            (Some(router), Some(modules)) => {
                router.replace(LevelRules::with_modules(self.level, modules));
                Some(router)
            }
            (Some(router), None) => {
                if self.level_set {
                    router.set_default(self.level);
                }
                Some(router)
            }
            (None, Some(modules)) if !modules.is_empty() => {
                Some(Arc::new(LevelRouter::new(LevelRules::with_modules(self.level, modules))))
            }
            (None, _) => None,
        };

        match router {
            Some(router) => Logger::from_handler(PathLevelHandler::new(sink, router)),
            None => Logger::from_handler(sink),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::console()
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("profile", &self.profile)
            .field("level", &self.level)
            .field("format", &self.format)
            .field("modules", &self.modules)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Outcome;
    use std::io;

    #[test]
    fn test_explicit_level_reaches_shared_router() {
        let router = Arc::new(LevelRouter::new(LevelRules::new(Severity::Info)));
        let logger = LoggerBuilder::cloudwatch()
            .writer(io::sink())
            .router(router.clone())
            .level(Severity::Error)
            .build();

        assert_eq!(router.default_level(), Severity::Error);
        assert_eq!(crate::warn!(logger, "below"), Outcome::Suppressed);
        assert_eq!(crate::error!(logger, "at"), Outcome::Emitted);
    }

    #[test]
    fn test_shared_router_keeps_its_default() {
        let router = Arc::new(LevelRouter::new(LevelRules::new(Severity::Debug)));
        let logger = LoggerBuilder::cloudwatch()
            .writer(io::sink())
            .router(router.clone())
            .build();

        assert_eq!(router.default_level(), Severity::Debug);
        assert_eq!(crate::debug!(logger, "kept"), Outcome::Emitted);
    }

    #[test]
    fn test_module_rules_and_level_published_together() {
        let router = Arc::new(LevelRouter::default());
        let _logger = LoggerBuilder::cloudwatch()
            .writer(io::sink())
            .router(router.clone())
            .level(Severity::Warn)
            .level_for_mod([("my_app::db", Severity::Debug)])
            .build();

        let rules = router.snapshot();
        assert_eq!(rules.default, Severity::Warn);
        assert_eq!(rules.trie.resolve("my_app/db/pool"), Some(Severity::Debug));
    }
}
