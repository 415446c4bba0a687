//! Record handlers.
//!
//! # Data Flow
//! ```text
//! Logger::log(record)
//!     → PathLevelHandler (optional: gate on the call-site threshold)
//!     → JsonHandler | StdioHandler (format + write one line)
//!     → Outcome::{Emitted, Suppressed}
//! ```
//!
//! # Design Decisions
//! - Sinks own their minimum level, like any standalone handler
//! - The path-level wrapper replaces that check: once a router is in
//!   place, the router alone decides
//! - Writers are shared behind a mutex, one line per lock

pub mod filter;
pub mod json;
pub mod stdio;

use std::io::Write;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::record::{Record, Severity};

pub use filter::PathLevelHandler;
pub use json::JsonHandler;
pub use stdio::StdioHandler;

/// Destination of formatted lines.
pub type Writer = Box<dyn Write + Send>;

/// Errors raised while writing a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("writer lock poisoned")]
    Poisoned,
}

/// What happened to a record.
#[must_use = "an Emergency outcome requires the process to terminate"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Written to the sink.
    Emitted,
    /// Dropped by a level check.
    Suppressed,
    /// EMERGENCY record: the caller must terminate the process.
    Emergency,
}

impl Outcome {
    pub fn is_emergency(self) -> bool {
        self == Outcome::Emergency
    }

    /// Abort the process on `Emergency`, pass any other outcome through.
    pub fn abort_on_emergency(self) -> Self {
        if self.is_emergency() {
            std::process::abort();
        }
        self
    }
}

/// A sink, or a wrapper around one.
pub trait Handler: Send + Sync {
    /// Cheap pre-check, called before the record is built.
    fn enabled(&self, level: Severity) -> bool;

    /// Write the record, or skip it.
    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn enabled(&self, level: Severity) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError> {
        (**self).handle(record)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn enabled(&self, level: Severity) -> bool {
        (**self).enabled(level)
    }

    fn handle(&self, record: &Record) -> Result<Outcome, HandlerError> {
        (**self).handle(record)
    }
}

/// Mutex-guarded writer shared by the sinks.
pub(crate) struct LineWriter {
    inner: Mutex<Writer>,
}

impl LineWriter {
    pub(crate) fn new(writer: Writer) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Write `line` followed by a newline and flush.
    pub(crate) fn write_line(&self, line: &str) -> Result<(), HandlerError> {
        let mut w = self.inner.lock().map_err(|_| HandlerError::Poisoned)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for LineWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineWriter").finish_non_exhaustive()
    }
}
