//! Call-site path keys.
//!
//! # Responsibilities
//! - Derive the trie key of a call site
//! - Normalise rule patterns the same way
//!
//! # Design Decisions
//! - Module paths are preferred over files; `::` becomes `/` so that
//!   `my_app::db` and `my_app/db` name the same rule and env values can
//!   stay colon-separated
//! - Files are stripped of the cargo registry / git checkout root, the
//!   equivalent of a GOPATH `src` split

use std::borrow::Cow;

use crate::record::Source;

const REGISTRY_SRC: &str = "/registry/src/";
const GIT_CHECKOUTS: &str = "/git/checkouts/";

/// Trie key for a call site.
pub fn call_path(source: &Source) -> Cow<'static, str> {
    if let Some(module) = source.module {
        return normalize(module);
    }

    match normalize(source.file) {
        Cow::Borrowed(file) => Cow::Borrowed(strip_root(file)),
        Cow::Owned(file) => Cow::Owned(strip_root(&file).to_string()),
    }
}

/// Use `/` as the only separator: `::` and `\` are rewritten.
pub fn normalize(path: &str) -> Cow<'_, str> {
    if !path.contains("::") && !path.contains('\\') {
        return Cow::Borrowed(path);
    }

    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.push('/');
            }
            '\\' => out.push('/'),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Drop the filesystem root of a source file.
///
/// ```text
/// /home/u/.cargo/registry/src/index.crates.io-6f17/tokio-1.40.0/src/net.rs
///     → tokio-1.40.0/src/net.rs
/// /home/u/.cargo/git/checkouts/repo-1a2b/3c4d/src/lib.rs
///     → src/lib.rs
/// ./src/main.rs
///     → src/main.rs
/// ```
pub fn strip_root(file: &str) -> &str {
    let rest = if let Some(at) = file.find(REGISTRY_SRC) {
        skip_components(&file[at + REGISTRY_SRC.len()..], 1)
    } else if let Some(at) = file.find(GIT_CHECKOUTS) {
        skip_components(&file[at + GIT_CHECKOUTS.len()..], 2)
    } else {
        file
    };

    rest.trim_start_matches("./").trim_start_matches('/')
}

fn skip_components(path: &str, n: usize) -> &str {
    let mut rest = path;
    for _ in 0..n {
        rest = rest.split_once('/').map_or("", |(_, tail)| tail);
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_root() {
        assert_eq!(
            strip_root("/home/u/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tokio-1.40.0/src/net/tcp.rs"),
            "tokio-1.40.0/src/net/tcp.rs"
        );
        assert_eq!(
            strip_root("/home/u/.cargo/git/checkouts/repo-1a2b3c/3c4d5e/src/lib.rs"),
            "src/lib.rs"
        );
        assert_eq!(strip_root("./src/main.rs"), "src/main.rs");
        assert_eq!(strip_root("src/main.rs"), "src/main.rs");
        assert_eq!(strip_root("/srv/app/src/main.rs"), "srv/app/src/main.rs");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("my_app::db::pool"), "my_app/db/pool");
        assert_eq!(normalize("src\\db\\pool.rs"), "src/db/pool.rs");
        assert!(matches!(normalize("src/db"), Cow::Borrowed(_)));
        assert_eq!(normalize("a:b:::c\\d"), "a:b/:c/d");
        assert_eq!(normalize("crate::ünï::x"), "crate/ünï/x");
    }

    #[test]
    fn test_call_path_prefers_module() {
        let source = Source::new(Some("my_app::db"), "src/db.rs", 10);
        assert_eq!(call_path(&source), "my_app/db");

        let source = Source::new(None, "/home/u/.cargo/registry/src/idx/hyper-1.0.0/src/lib.rs", 1);
        assert_eq!(call_path(&source), "hyper-1.0.0/src/lib.rs");
    }
}
