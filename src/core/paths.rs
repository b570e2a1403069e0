//! Path utilities for content-root-relative paths.
//!
//! Canonical form: `/`-joined segments with no leading or trailing slash;
//! the content root itself is the empty string.

/// Collapse duplicate separators and strip edge slashes.
///
/// Idempotent: `normalize(normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_slash {
                out.push('/');
            }
            prev_slash = true;
        } else {
            out.push(ch);
            prev_slash = false;
        }
    }
    out.trim_matches('/').to_string()
}

/// Join path parts, dropping empty ones, into canonical form.
pub fn join(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    normalize(&joined)
}

/// Split a path into its non-empty segments.
pub fn split(path: &str) -> Vec<String> {
    normalize(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parent directory of a path. The root's parent is the root itself.
pub fn parent(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Final segment of a path; empty for the root.
pub fn file_name(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rsplit_once('/') {
        Some((_, name)) => name.to_string(),
        None => normalized,
    }
}

/// Lowercased extension of the final segment; `None` without one.
pub fn extension(path: &str) -> Option<String> {
    let name = file_name(path);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Whether `child` lies at or below `parent`, on segment boundaries.
///
/// The root contains everything; a path contains itself; `"fold"` does not
/// contain `"folder/x"`.
pub fn is_sub_path(parent: &str, child: &str) -> bool {
    let parent = normalize(parent);
    if parent.is_empty() {
        return true;
    }
    let child = normalize(child);
    child == parent || child.starts_with(&format!("{parent}/"))
}

/// Strip `base` from the front of `path`, on segment boundaries.
///
/// `None` when `path` is not under `base`.
pub fn relative_to(base: &str, path: &str) -> Option<String> {
    let base = normalize(base);
    let path = normalize(path);
    if base.is_empty() {
        return Some(path);
    }
    if path == base {
        return Some(String::new());
    }
    path.strip_prefix(&format!("{base}/")).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize("a//b///c/"), "a/b/c");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/a/b"), "a/b");
        assert_eq!(normalize("a/b"), "a/b");
    }

    #[test]
    fn normalize_is_idempotent() {
        for p in ["", "/", "a//b///c/", "//x//", "plain", "a/b/c"] {
            assert_eq!(normalize(&normalize(p)), normalize(p), "input {p:?}");
        }
    }

    #[test]
    fn join_drops_empty_parts() {
        assert_eq!(join(&["a", "", "b"]), "a/b");
        assert_eq!(join(&[]), "");
        assert_eq!(join(&["", ""]), "");
        assert_eq!(join(&["a/", "/b"]), "a/b");
    }

    #[test]
    fn split_is_inverse_of_join_modulo_empties() {
        let parts = ["docs", "", "guide", "intro"];
        let joined = join(&parts);
        let non_empty: Vec<String> = parts
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();
        assert_eq!(split(&joined), non_empty);
        assert!(split("").is_empty());
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent("a/b/c"), "a/b");
        assert_eq!(parent("a"), "");
        assert_eq!(parent(""), "");
        assert_eq!(file_name("a/b/c.txt"), "c.txt");
        assert_eq!(file_name("a"), "a");
        assert_eq!(file_name(""), "");
    }

    #[test]
    fn extension_reads_only_the_final_segment() {
        assert_eq!(extension("docs/guide.MD").as_deref(), Some("md"));
        assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension("a.b/c"), None);
        assert_eq!(extension("Makefile"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn sub_path_is_reflexive_and_segment_aware() {
        assert!(is_sub_path("a/b", "a/b"));
        assert!(is_sub_path("", "anything/at/all"));
        assert!(is_sub_path("a", "a/b/c"));
        assert!(!is_sub_path("fold", "folder/x"));
        assert!(!is_sub_path("a/b", "a"));
    }

    #[test]
    fn relative_to_strips_on_segment_boundaries() {
        assert_eq!(relative_to("docs", "docs/guide.md"), Some("guide.md".into()));
        assert_eq!(relative_to("docs", "docs"), Some(String::new()));
        assert_eq!(relative_to("", "docs/guide.md"), Some("docs/guide.md".into()));
        assert_eq!(relative_to("docs", "docsier/guide.md"), None);
        assert_eq!(relative_to("docs", "other/guide.md"), None);
    }
}
