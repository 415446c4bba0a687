//! Level routing subsystem.
//!
//! # Data Flow
//! ```text
//! Log call (level, call site)
//!     → path.rs (call site → trie key)
//!     → router.rs (load current LevelRules)
//!     → trie.rs (most specific rule for the key)
//!     → Return: threshold, or the default level when no rule matches
//!
//! Rule Compilation (at configuration time):
//!     (pattern, level)[]
//!     → normalise patterns
//!     → insert into a fresh PathLevelTrie
//!     → publish as immutable LevelRules (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Rules compiled once, immutable at runtime
//! - No regex in the hot path (prefix matching only)
//! - Deterministic: the most specific rule wins, independent of insertion order

pub mod path;
pub mod router;
pub mod trie;

pub use router::{LevelRouter, LevelRules};
pub use trie::{Node, PathLevelTrie};
