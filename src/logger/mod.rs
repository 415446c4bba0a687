//! Logger facade.
//!
//! # Responsibilities
//! - Capture the call site of every record
//! - Hand records to the configured handler chain
//! - Turn EMERGENCY records into [`Outcome::Emergency`]
//!
//! # Design Decisions
//! - Sink failures never reach the caller; the first one is reported through
//!   `tracing` and the record counts as suppressed
//! - The macros skip building the record (and serializing attributes) when
//!   the handler rejects the level up front

pub mod builder;

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::handler::{Handler, Outcome};
use crate::record::{Record, Severity, Source};

pub use builder::LoggerBuilder;

/// Structured logger writing through a [`Handler`].
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    sink_failed: Arc<AtomicBool>,
}

impl Logger {
    /// Logger configured from the environment: JSON lines inside AWS Lambda
    /// or with `CONFIG_LOG_PROFILE=CloudWatch`, console lines otherwise.
    pub fn new() -> Self {
        LoggerBuilder::from_env().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn from_handler(handler: impl Handler + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
            sink_failed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a record at `level` may be emitted somewhere.
    pub fn enabled(&self, level: Severity) -> bool {
        self.handler.enabled(level)
    }

    pub fn log(&self, record: Record) -> Outcome {
        let emergency = record.level == Severity::Emergency;
        let outcome = if self.handler.enabled(record.level) {
            match self.handler.handle(&record) {
                Ok(outcome) => outcome,
                Err(e) => {
                    if !self.sink_failed.swap(true, Ordering::Relaxed) {
                        tracing::warn!(error = %e, "Log sink failed, dropping records");
                    }
                    Outcome::Suppressed
                }
            }
        } else {
            Outcome::Suppressed
        };

        if emergency {
            Outcome::Emergency
        } else {
            outcome
        }
    }

    /// Build and log a record only when `level` passes the handler pre-check.
    pub fn log_with<F>(&self, level: Severity, build: F) -> Outcome
    where
        F: FnOnce() -> Record,
    {
        if self.handler.enabled(level) {
            self.log(build())
        } else if level == Severity::Emergency {
            Outcome::Emergency
        } else {
            Outcome::Suppressed
        }
    }

    fn log_at(&self, level: Severity, message: String, location: &'static Location<'static>) -> Outcome {
        self.log_with(level, || {
            Record::new(level, message).with_source(Source::from_location(location))
        })
    }

    // The level methods below only know the caller's file, so path rules
    // match them by file (`src/db/pool.rs`), never by module path.

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Debug, message.into(), Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Info, message.into(), Location::caller())
    }

    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Notice, message.into(), Location::caller())
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Warn, message.into(), Location::caller())
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Error, message.into(), Location::caller())
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Critical, message.into(), Location::caller())
    }

    /// Log at EMERGENCY. The caller must terminate the process, see
    /// [`Outcome::abort_on_emergency`].
    #[track_caller]
    pub fn emergency(&self, message: impl Into<String>) -> Outcome {
        self.log_at(Severity::Emergency, message.into(), Location::caller())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// Log a record with attributes, keyed by the calling module.
///
/// ```ignore
/// cloudlog::log!(logger, Severity::Notice, "cache warmed", "entries" => 512);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        let level: $crate::Severity = $level;
        $logger.log_with(level, || {
            $crate::Record::new(level, $msg)
                .with_source($crate::Source::new(
                    ::core::option::Option::Some(::core::module_path!()),
                    ::core::file!(),
                    ::core::line!(),
                ))
                $(.attr($key, $value))*
        })
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Notice, $($rest)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Critical, $($rest)+)
    };
}

/// Log at EMERGENCY; evaluates to [`Outcome::Emergency`].
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Severity::Emergency, $($rest)+)
    };
}
