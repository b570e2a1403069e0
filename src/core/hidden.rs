//! Build-artifact and tooling-file detection.
//!
//! Listings hide scaffolding that ships alongside the published content
//! (build manifests, source trees, editor droppings) unless the user opts
//! in with the "show hidden" toggle.

use std::sync::LazyLock;

use regex::RegexSet;

use crate::core::paths;

/// Exact names hidden wherever they appear. A directory entry here hides
/// its whole subtree.
const HIDDEN_NAMES: &[&str] = &[
    "index.html",
    "Cargo.toml",
    "Cargo.lock",
    "Trunk.toml",
    "package.json",
    "package-lock.json",
    "node_modules",
    "target",
    "dist",
    "src",
    "assets",
    "public",
    ".github",
    ".git",
    ".vscode",
    "README.md",
    "LICENSE",
];

static HIDDEN_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^\.",      // dotfiles
        r"\.d\.ts$", // type declarations
        r"\.map$",   // sourcemaps
        r"~$",       // editor backups
    ])
    .unwrap()
});

/// Whether an entry should be hidden from normal listings.
///
/// Name rules match the entry itself; entries below a hidden root-level
/// directory are hidden too. Containment is checked on segment boundaries,
/// so `src` does not swallow `srcery`.
pub fn is_hidden(name: &str, path: &str) -> bool {
    for hidden in HIDDEN_NAMES {
        if name == *hidden || paths::is_sub_path(hidden, path) {
            return true;
        }
    }
    HIDDEN_PATTERNS.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_known_names() {
        assert!(is_hidden("Cargo.toml", "Cargo.toml"));
        assert!(is_hidden("node_modules", "node_modules"));
        assert!(!is_hidden("notes.md", "notes.md"));
    }

    #[test]
    fn hides_contents_of_hidden_directories() {
        assert!(is_hidden("main.rs", "src/main.rs"));
        assert!(is_hidden("deep.txt", "target/wasm/deep.txt"));
        assert!(!is_hidden("srcery.txt", "srcery.txt"));
        // only root-level scaffolding dirs are pruned
        assert!(!is_hidden("notes.txt", "docs/src-history/notes.txt"));
    }

    #[test]
    fn hides_dotfiles_and_artifacts() {
        assert!(is_hidden(".env", ".env"));
        assert!(is_hidden("app.js.map", "js/app.js.map"));
        assert!(is_hidden("types.d.ts", "lib/types.d.ts"));
        assert!(is_hidden("draft.md~", "draft.md~"));
        assert!(!is_hidden("archive.tar", "archive.tar"));
    }
}
