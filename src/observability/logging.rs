//! Subscriber installation.
//!
//! # Responsibilities
//! - Install the diagnostics subscriber of the crate's own binaries
//! - Route application `tracing` events through a cloudlog [`Logger`]
//!
//! # Design Decisions
//! - `RUST_LOG` wins; the fallback directive keeps the crate at INFO
//! - Installation fails instead of panicking when a global subscriber is
//!   already set

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

use crate::logger::Logger;
use crate::observability::layer::{CloudLogLayer, PathLevelFilter};
use crate::routing::LevelRouter;

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "cloudlog=info";

/// Human-readable diagnostics on stderr, filtered by `RUST_LOG`.
pub fn init_diagnostics() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVE.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Send every `tracing` event through `logger`, gated by the path levels of
/// `router`.
pub fn init_bridge(logger: Logger, router: Arc<LevelRouter>) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(CloudLogLayer::new(logger).with_filter(PathLevelFilter::new(router)))
        .try_init()
}
