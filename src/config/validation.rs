//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject module patterns the trie would accept but nobody means
//! - Reject time formats chrono cannot render
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::LoggerConfig;
use crate::format::attributes::is_valid_time_format;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("module pattern {0:?} has surrounding whitespace")]
    Whitespace(String),

    #[error("module pattern {0:?}: `*` is only allowed as the last character")]
    MisplacedWildcard(String),

    #[error("invalid time format {0:?}")]
    TimeFormat(String),
}

pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for pattern in config.modules.keys() {
        if pattern.trim() != pattern {
            errors.push(ValidationError::Whitespace(pattern.clone()));
        }

        let body = pattern.strip_suffix('*').unwrap_or(pattern);
        if body.contains('*') {
            errors.push(ValidationError::MisplacedWildcard(pattern.clone()));
        }
    }

    if let Some(format) = &config.time_format {
        if !is_valid_time_format(format) {
            errors.push(ValidationError::TimeFormat(format.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
