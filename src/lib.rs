//! Structured logger for the console and AWS CloudWatch, with per-path
//! log levels.
//!
//! # Architecture Overview
//!
//! ```text
//!   call site (module_path!, file!, line!)
//!        │
//!        ▼
//!   ┌─────────┐    ┌──────────────────┐    ┌──────────────────────┐
//!   │ logger  │───▶│ handler::filter  │───▶│ handler::json/stdio  │───▶ writer
//!   │ Record  │    │ PathLevelHandler │    │ format (header attrs)│
//!   └─────────┘    └────────┬─────────┘    └──────────────────────┘
//!                           │ threshold
//!                           ▼
//!                  ┌──────────────────┐    ┌──────────────────────┐
//!                  │ routing          │◀───│ config               │
//!                  │ LevelRouter      │    │ TOML + CONFIG_LOG_*  │
//!                  │ PathLevelTrie    │    │ watcher (hot reload) │
//!                  └──────────────────┘    └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cloudlog::{LoggerBuilder, Severity};
//!
//! let logger = LoggerBuilder::cloudwatch()
//!     .level(Severity::Warn)
//!     .level_for_mod([("my_app::db", Severity::Debug)])
//!     .build();
//!
//! cloudlog::debug!(logger, "pool checked out", "idle" => 3);
//! ```

// Core
pub mod record;
pub mod routing;

// Output
pub mod format;
pub mod handler;
pub mod logger;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::{EnvOverrides, LoggerConfig, Profile};
pub use format::Format;
pub use handler::{Handler, HandlerError, Outcome};
pub use logger::{Logger, LoggerBuilder};
pub use record::{Record, Severity, Source};
pub use routing::{LevelRouter, LevelRules, PathLevelTrie};
