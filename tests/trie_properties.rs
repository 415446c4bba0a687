//! Behaviour of the path level trie as seen through its public API.

use cloudlog::{PathLevelTrie, Severity};
use Severity::*;

mod common;

fn trie(rules: &[(&str, Severity)]) -> PathLevelTrie {
    rules.iter().copied().collect()
}

#[test]
fn test_prefix_containment() {
    let t = trie(&[("my_app/db", Debug), ("my_app/http", Error)]);

    assert_eq!(t.resolve("my_app/db"), Some(Debug));
    assert_eq!(t.resolve("my_app/db/pool"), Some(Debug));
    assert_eq!(t.resolve("my_app/dbx"), Some(Debug));
    assert_eq!(t.resolve("my_app/http/server.rs"), Some(Error));
    assert_eq!(t.resolve("my_app/d"), None);
}

#[test]
fn test_most_specific_wins() {
    let t = trie(&[("my_app", Warn), ("my_app/db", Debug), ("my_app/db/pool", Critical)]);

    assert_eq!(t.resolve("my_app/main"), Some(Warn));
    assert_eq!(t.resolve("my_app/db/query"), Some(Debug));
    assert_eq!(t.resolve("my_app/db/pool/conn"), Some(Critical));
    // diverges inside the segment "/pool"
    assert_eq!(t.resolve("my_app/db/pop"), Some(Debug));
}

#[test]
fn test_wildcard_consumes_remainder() {
    let t = trie(&[("a/b/*", Notice)]);

    assert_eq!(t.resolve("a/b/anything/at/all"), Some(Notice));
    assert_eq!(t.resolve("a/b/"), Some(Notice));
    assert_eq!(t.resolve("a/b"), None);
    assert_eq!(t.resolve("a/c/x"), None);

    let (consumed, node) = t.lookup("a/b/anything");
    assert_eq!(consumed, "a/b/anything".len());
    assert!(node.is_wildcard());
}

#[test]
fn test_split_leaves_unset_branch() {
    let t = trie(&[("abc", Info), ("abd", Error)]);

    assert_eq!(t.resolve("abc"), Some(Info));
    assert_eq!(t.resolve("abd"), Some(Error));

    let (consumed, node) = t.lookup("ab");
    assert_eq!(consumed, 2);
    assert_eq!(node.segment(), "ab");
    assert_eq!(node.level(), None);
    assert_eq!(t.resolve("ab"), None);
    assert_eq!(t.resolve("abe"), None);
}

#[test]
fn test_empty_trie() {
    let t = PathLevelTrie::new();

    for path in ["", "/", "my_app/db", "*"] {
        let (consumed, node) = t.lookup(path);
        assert_eq!(consumed, 0);
        assert_eq!(node.level(), None);
        assert_eq!(t.resolve(path), None);
    }
}

#[test]
fn test_reinsert_is_idempotent() {
    let rules = [("my_app", Warn), ("my_app/db", Debug), ("other/*", Error)];
    let once = trie(&rules);

    let mut twice = trie(&rules);
    twice.extend(rules);

    assert_eq!(once, twice);
    assert_eq!(once.rule_count(), 3);
}

#[test]
fn test_reinsert_replaces_level() {
    let mut t = trie(&[("my_app/db", Debug)]);
    t.insert("my_app/db", Error);

    assert_eq!(t.resolve("my_app/db/pool"), Some(Error));
    assert_eq!(t.rule_count(), 1);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let rules = [
        ("github.com/org/app", Info),
        ("github.com/org/app/debugmod", Debug),
        ("github.com/org/*", Warn),
        ("github.com/o", Error),
        ("github.com/org/ap", Critical),
    ];
    let probes = [
        "github.com/org/app/file.go",
        "github.com/org/app/debugmod/x.go",
        "github.com/org/apx",
        "github.com/org/other/x",
        "github.com/org/",
        "github.com/other",
        "github.com/unrelated",
        "gitlab.com/org/app",
    ];

    let expected: Vec<_> = {
        let t = trie(&rules);
        probes.iter().map(|p| t.resolve(p)).collect()
    };

    for order in common::permutations(&rules) {
        let t = trie(&order);
        let resolved: Vec<_> = probes.iter().map(|p| t.resolve(p)).collect();
        assert_eq!(resolved, expected, "order {order:?}");
    }
}

#[test]
fn test_go_module_layout() {
    let t = trie(&[
        ("github.com/org/app", Info),
        ("github.com/org/app/debugmod", Debug),
        ("github.com/org/*", Warn),
    ]);

    assert_eq!(t.resolve("github.com/org/app/file.go"), Some(Info));
    assert_eq!(t.resolve("github.com/org/app/debugmod/x.go"), Some(Debug));
    assert_eq!(t.resolve("github.com/org/other/x"), Some(Warn));
    assert_eq!(t.resolve("github.com/unrelated"), None);
}

#[test]
fn test_tree_listing() {
    let t = trie(&[("abc", Info), ("abd", Error), ("x/*", Debug)]);

    let mut seen = Vec::new();
    t.walk(|depth, node| seen.push((depth, node.segment().to_string(), node.level())));

    assert_eq!(
        seen,
        vec![
            (0, String::new(), None),
            (1, "ab".to_string(), None),
            (2, "c".to_string(), Some(Info)),
            (2, "d".to_string(), Some(Error)),
            (1, "x/".to_string(), None),
            (2, "*".to_string(), Some(Debug)),
        ]
    );
}
