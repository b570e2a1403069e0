//! Wire types for the GitHub content API.
//!
//! Serde mirrors of the REST responses the remote client consumes.
//! Unknown fields are ignored so API additions never break parsing.

use serde::Deserialize;

/// One row of a `GET /repos/{owner}/{repo}/contents/{path}` listing.
#[derive(Clone, Debug, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    /// Repository-relative path, including the configured base path.
    pub path: String,
    pub sha: String,
    /// Zero for directories.
    pub size: u64,
    /// `"file"` or `"dir"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub html_url: Option<String>,
    pub download_url: Option<String>,
}

impl ContentEntry {
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// `GET /repos/{owner}/{repo}/git/ref/heads/{branch}` response.
#[derive(Clone, Debug, Deserialize)]
pub struct GitRef {
    pub object: GitObject,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GitObject {
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1` response.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeItem>,
    /// Set when the listing was cut off server-side.
    #[serde(default)]
    pub truncated: bool,
}

/// One row of a recursive tree listing.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeItem {
    pub path: String,
    /// `"blob"` or `"tree"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub sha: String,
    /// Blobs only.
    pub size: Option<u64>,
}

impl TreeItem {
    #[inline]
    pub fn is_tree(&self) -> bool {
        self.kind == "tree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_entry_parses_api_row() {
        let json = r#"{
            "name": "intro.md",
            "path": "docs/intro.md",
            "sha": "abc123",
            "size": 420,
            "type": "file",
            "html_url": "https://github.com/o/r/blob/main/docs/intro.md",
            "download_url": "https://raw.githubusercontent.com/o/r/main/docs/intro.md",
            "git_url": "ignored-extra-field"
        }"#;
        let entry: ContentEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "intro.md");
        assert_eq!(entry.size, 420);
        assert!(!entry.is_dir());
    }

    #[test]
    fn tree_response_defaults_truncated() {
        let json = r#"{"tree": [{"path": "docs", "type": "tree", "sha": "d1"}]}"#;
        let resp: TreeResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.truncated);
        assert!(resp.tree[0].is_tree());
        assert_eq!(resp.tree[0].size, None);
    }
}
