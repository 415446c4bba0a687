//! Path-keyed log level trie.
//!
//! # Responsibilities
//! - Store `(path pattern, level)` rules in a prefix-compressed tree
//! - Resolve the threshold of a call-site path in O(len(path))
//! - Support `prefix*` wildcard rules that consume any remainder
//!
//! # Design Decisions
//! - Built once, then read-only; replaced as a whole on reload
//! - Literal children are disambiguated by their first character, so a
//!   descent never has to compare more than one candidate per level
//! - The wildcard child lives in its own slot and is only followed when no
//!   literal child matches
//! - Prefix lengths are computed on char boundaries

use std::fmt;

use crate::record::Severity;

const WILDCARD: &str = "*";

/// Key used for the empty pattern.
const ROOT_PATH: &str = "/";

/// Node of the trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Substring of the key owned by the node (edge label from its parent).
    segment: String,
    /// Threshold set by an explicit insertion; `None` for branch points.
    level: Option<Severity>,
    /// Literal children, unique by first character.
    children: Vec<Node>,
    /// Child matching any remainder of the key.
    wildcard: Option<Box<Node>>,
    matches_rest: bool,
}

impl Node {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            ..Self::default()
        }
    }

    fn wildcard() -> Self {
        Self {
            segment: WILDCARD.to_string(),
            matches_rest: true,
            ..Self::default()
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn level(&self) -> Option<Severity> {
        self.level
    }

    /// True for a wildcard node, which consumes the whole remainder of a path.
    pub fn is_wildcard(&self) -> bool {
        self.matches_rest
    }

    /// Literal children followed by the wildcard child, if any.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().chain(self.wildcard.as_deref())
    }

    fn first_char(&self) -> Option<char> {
        self.segment.chars().next()
    }

    /// Level this node contributes to paths that continue below it.
    fn inherited_level(&self) -> Option<Severity> {
        self.wildcard.as_ref().and_then(|w| w.level).or(self.level)
    }

    /// Keep `segment[..at]` in this node and move everything else under a
    /// new child owning `segment[at..]`.
    fn split(&mut self, at: usize) {
        let tail = Node {
            segment: self.segment.split_off(at),
            level: self.level.take(),
            children: std::mem::take(&mut self.children),
            wildcard: self.wildcard.take(),
            matches_rest: false,
        };
        self.children.push(tail);
    }
}

/// Prefix tree mapping source paths to severity thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathLevelTrie {
    root: Node,
}

impl PathLevelTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True when no rule has been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && self.root.wildcard.is_none()
    }

    /// Number of nodes carrying a level.
    pub fn rule_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_, node| count += usize::from(node.level.is_some()));
        count
    }

    /// Register `level` for every path matching `pattern`.
    ///
    /// `pattern` matches paths starting with it. A trailing `*` makes the rule
    /// a wildcard attached below the prefix, which also matches the prefix
    /// itself. The empty pattern stands for the root path `/`.
    pub fn insert(&mut self, pattern: &str, level: Severity) {
        match pattern.strip_suffix(WILDCARD) {
            Some(prefix) => {
                let node = self.node_for(prefix);
                let wildcard = node.wildcard.get_or_insert_with(|| Box::new(Node::wildcard()));
                wildcard.level = Some(level);
            }
            None if pattern.is_empty() => self.node_for(ROOT_PATH).level = Some(level),
            None => self.node_for(pattern).level = Some(level),
        }
    }

    /// Find or create the node whose key is exactly `key`, splitting nodes
    /// that only partially share a prefix with it.
    fn node_for(&mut self, key: &str) -> &mut Node {
        let mut node = &mut self.root;
        let mut rest = key;

        while let Some(first) = rest.chars().next() {
            let Some(at) = node.children.iter().position(|c| c.first_char() == Some(first)) else {
                // no shared prefix with any child, the remainder becomes a leaf
                node.children.push(Node::new(rest));
                let last = node.children.len() - 1;
                return &mut node.children[last];
            };

            let child = &mut node.children[at];
            let shared = common_prefix_len(rest, &child.segment);
            if shared < child.segment.len() {
                child.split(shared);
            }
            rest = &rest[shared..];
            node = child;
        }

        node
    }

    /// Hot-path discovery of the deepest node matching `path`.
    ///
    /// Returns the node and the number of bytes of `path` consumed to reach
    /// it. The node may be a branch point without a level, in which case it
    /// carries no rule of its own.
    pub fn lookup(&self, path: &str) -> (usize, &Node) {
        let (at, node, _) = self.descend(path);
        (at, node)
    }

    /// Threshold of the most specific rule matching `path`, or `None` when no
    /// rule applies and the caller's default must be used.
    pub fn resolve(&self, path: &str) -> Option<Severity> {
        let (_, node, inherited) = self.descend(path);
        node.level.or(inherited)
    }

    fn descend<'a>(&'a self, path: &str) -> (usize, &'a Node, Option<Severity>) {
        let mut node = &self.root;
        let mut at = 0;
        let mut inherited = None;

        loop {
            let rest = &path[at..];
            let next = node.children.iter().find(|c| {
                // first byte check avoids the full compare for most siblings
                c.segment.as_bytes().first() == rest.as_bytes().first() && rest.starts_with(c.segment.as_str())
            });

            match (next, node.wildcard.as_deref()) {
                (Some(child), _) => {
                    inherited = node.inherited_level().or(inherited);
                    at += child.segment.len();
                    node = child;
                }
                (None, Some(wildcard)) => return (path.len(), wildcard, node.level.or(inherited)),
                (None, None) => return (at, node, inherited),
            }
        }
    }

    /// Walk the trie in pre-order, passing the depth of each node.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &Node),
    {
        walk(&self.root, 0, &mut visit);
    }
}

fn walk<F>(node: &Node, depth: usize, visit: &mut F)
where
    F: FnMut(usize, &Node),
{
    visit(depth, node);
    for child in node.children() {
        walk(child, depth + 1, visit);
    }
}

impl<S: AsRef<str>> FromIterator<(S, Severity)> for PathLevelTrie {
    fn from_iter<I: IntoIterator<Item = (S, Severity)>>(iter: I) -> Self {
        let mut trie = PathLevelTrie::new();
        trie.extend(iter);
        trie
    }
}

impl<S: AsRef<str>> Extend<(S, Severity)> for PathLevelTrie {
    fn extend<I: IntoIterator<Item = (S, Severity)>>(&mut self, iter: I) {
        for (pattern, level) in iter {
            self.insert(pattern.as_ref(), level);
        }
    }
}

impl fmt::Display for PathLevelTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.walk(|depth, node| {
            if result.is_err() {
                return;
            }
            result = match node.level {
                Some(level) => writeln!(f, "{:indent$}{} [{}]", "", node.segment, level, indent = depth * 2),
                None => writeln!(f, "{:indent$}{}", "", node.segment, indent = depth * 2),
            };
        });
        result
    }
}

/// Length in bytes of the longest common prefix, on char boundaries.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}
