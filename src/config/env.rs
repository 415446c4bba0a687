//! Environment overrides.
//!
//! ```text
//! export CONFIG_LOG_LEVEL=DEBUG
//! export CONFIG_LOG_LEVEL_DEBUG=my_app/db:my_app/cache
//! export CONFIG_LOG_LEVEL_WARN=hyper*
//! export CONFIG_LOG_PROFILE=CloudWatch
//! ```
//!
//! # Design Decisions
//! - Parsing takes a lookup function, the process environment is only
//!   read by `EnvOverrides::from_env`
//! - Unknown level names are ignored, not reported
//! - Env rules win over file rules for the same pattern

use crate::config::schema::{LoggerConfig, Profile};
use crate::record::Severity;
use crate::routing::path::normalize;

/// Default level.
pub const LEVEL_VAR: &str = "CONFIG_LOG_LEVEL";

/// Prefix of the per-level pattern lists, e.g. `CONFIG_LOG_LEVEL_DEBUG`.
pub const LEVEL_FOR_MOD_PREFIX: &str = "CONFIG_LOG_LEVEL_";

/// `CloudWatch` selects the JSON sink.
pub const PROFILE_VAR: &str = "CONFIG_LOG_PROFILE";

/// Set by AWS Lambda; forces the JSON sink.
pub const LAMBDA_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub profile: Option<Profile>,
    pub level: Option<Severity>,
    pub modules: Vec<(String, Severity)>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            profile: profile_from_env(&lookup),
            level: level_from_env(&lookup),
            modules: modules_from_env(&lookup),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.profile.is_none() && self.level.is_none() && self.modules.is_empty()
    }

    pub fn apply(&self, config: &mut LoggerConfig) {
        if let Some(profile) = self.profile {
            config.profile = Some(profile);
        }
        if let Some(level) = self.level {
            config.level = Some(level);
        }
        for (pattern, level) in &self.modules {
            // `my_app::db` in the file and `my_app/db` in the env are one rule
            let key = normalize(pattern);
            config.modules.retain(|existing, _| normalize(existing) != key);
            config.modules.insert(pattern.clone(), *level);
        }
    }
}

pub fn profile_from_env<F>(lookup: &F) -> Option<Profile>
where
    F: Fn(&str) -> Option<String>,
{
    if lookup(LAMBDA_VAR).is_some() {
        return Some(Profile::CloudWatch);
    }
    lookup(PROFILE_VAR).and_then(|value| value.parse().ok())
}

pub fn level_from_env<F>(lookup: &F) -> Option<Severity>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LEVEL_VAR).and_then(|value| Severity::from_long_name(value.trim()))
}

/// `(pattern, level)` pairs from every `CONFIG_LOG_LEVEL_<NAME>` variable.
pub fn modules_from_env<F>(lookup: &F) -> Vec<(String, Severity)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut modules = Vec::new();
    for level in Severity::ALL {
        let key = format!("{LEVEL_FOR_MOD_PREFIX}{}", level.long_name());
        let Some(value) = lookup(&key) else {
            continue;
        };

        modules.extend(
            value
                .split(':')
                .map(str::trim)
                .filter(|pattern| !pattern.is_empty())
                .map(|pattern| (pattern.to_string(), level)),
        );
    }
    modules
}
