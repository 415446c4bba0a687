//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → env.rs (CONFIG_LOG_* overrides)
//!     → LoggerConfig (validated, immutable)
//!     → LevelRules published through LevelRouter
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → spawn_reloader applies env overrides
//!     → atomic swap of Arc<LevelRules>
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields are optional and fall back to the profile preset
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use env::EnvOverrides;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LoggerConfig, Profile};
pub use validation::ValidationError;
pub use watcher::{spawn_reloader, ConfigWatcher};
