//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! cloudlog internals (router swaps, reloads, sink failures)
//!     → tracing macros
//!     → logging.rs diagnostics subscriber (EnvFilter + fmt, stderr)
//!
//! application tracing events
//!     → layer.rs PathLevelFilter (LevelRouter thresholds)
//!     → layer.rs CloudLogLayer (event → Record)
//!     → Logger → JSON / console sink
//! ```
//!
//! # Design Decisions
//! - Diagnostics of the crate never go through the sink they describe
//! - The bridge reuses the router, so one hot reload updates both paths

pub mod layer;
pub mod logging;

pub use layer::{CloudLogLayer, PathLevelFilter};
pub use logging::{init_bridge, init_diagnostics};
