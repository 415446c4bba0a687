//! Level lookup and hot swap.
//!
//! # Responsibilities
//! - Hold the active rules (default level + trie) behind one pointer
//! - Answer "is this level enabled at this call site" without locking
//! - Replace the rules as a whole on reload
//!
//! # Design Decisions
//! - `ArcSwap` publishes a fully built `LevelRules`; readers never observe
//!   a trie under construction
//! - Default level and trie are swapped together so a reader always sees
//!   a consistent pair
//! - Unmatched paths fall back to the default level, never to whatever
//!   branch node the descent stopped on

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::record::{Severity, Source};
use crate::routing::path::{call_path, normalize};
use crate::routing::trie::PathLevelTrie;

/// Immutable snapshot of the level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelRules {
    pub default: Severity,
    pub trie: PathLevelTrie,
}

impl LevelRules {
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            trie: PathLevelTrie::new(),
        }
    }

    /// Build rules from `(pattern, level)` pairs. Patterns are normalised
    /// (`::` → `/`) before insertion.
    pub fn with_modules<I, S>(default: Severity, modules: I) -> Self
    where
        I: IntoIterator<Item = (S, Severity)>,
        S: AsRef<str>,
    {
        let trie = modules
            .into_iter()
            .map(|(pattern, level)| (normalize(pattern.as_ref()).into_owned(), level))
            .collect();
        Self { default, trie }
    }

    /// Effective threshold for a call site.
    pub fn threshold(&self, source: Option<&Source>) -> Severity {
        match source {
            Some(source) if !self.trie.is_empty() => {
                self.trie.resolve(&call_path(source)).unwrap_or(self.default)
            }
            _ => self.default,
        }
    }

    /// Effective threshold for an already normalised path key.
    pub fn path_threshold(&self, path: &str) -> Severity {
        self.trie.resolve(path).unwrap_or(self.default)
    }
}

/// Shared, swappable level rules.
#[derive(Debug, Default)]
pub struct LevelRouter {
    rules: ArcSwap<LevelRules>,
}

impl LevelRouter {
    pub fn new(rules: LevelRules) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
        }
    }

    /// Current rules. The snapshot stays valid after a swap.
    pub fn snapshot(&self) -> Arc<LevelRules> {
        self.rules.load_full()
    }

    /// Publish new rules.
    pub fn replace(&self, rules: LevelRules) {
        tracing::info!(
            default = %rules.default,
            rules = rules.trie.rule_count(),
            "Level rules replaced"
        );
        self.rules.store(Arc::new(rules));
    }

    /// Publish a new default level, keeping the current trie.
    pub fn set_default(&self, default: Severity) {
        self.rules.rcu(|current| LevelRules {
            default,
            trie: current.trie.clone(),
        });
    }

    pub fn default_level(&self) -> Severity {
        self.rules.load().default
    }

    pub fn has_path_rules(&self) -> bool {
        !self.rules.load().trie.is_empty()
    }

    pub fn threshold(&self, source: Option<&Source>) -> Severity {
        self.rules.load().threshold(source)
    }

    pub fn enabled(&self, source: Option<&Source>, level: Severity) -> bool {
        level >= self.threshold(source)
    }
}
