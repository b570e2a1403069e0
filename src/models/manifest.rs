//! Wire type for the local file-service.
//!
//! The same node shape appears in three places: the static
//! `file-tree.json` manifest (fully nested), the dynamic
//! `/api/directory` listing (flat, children absent), and the
//! `/api/tree` sidebar tree (nested to a limited depth).

use serde::{Deserialize, Serialize};

use super::file::EntryKind;

/// One node of a manifest or directory-API response.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ManifestNode {
    pub name: String,
    /// Content-root-relative path.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ManifestNode>>,
}

/// Error envelope returned by the dynamic API with non-2xx statuses.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_manifest() {
        let json = r#"[
            {"name": "a", "path": "a", "type": "directory", "children": [
                {"name": "b.txt", "path": "a/b.txt", "type": "file", "size": 10}
            ]},
            {"name": "top.md", "path": "top.md", "type": "file", "size": 3}
        ]"#;
        let nodes: Vec<ManifestNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, EntryKind::Directory);
        let children = nodes[0].children.as_ref().unwrap();
        assert_eq!(children[0].path, "a/b.txt");
        assert_eq!(children[0].size, Some(10));
    }

    #[test]
    fn parses_flat_listing_without_children() {
        let json = r#"[{"name": "x", "path": "p/x", "type": "directory"}]"#;
        let nodes: Vec<ManifestNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].children, None);
        assert_eq!(nodes[0].size, None);
    }

    #[test]
    fn parses_error_envelope() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "Directory not found"}"#).unwrap();
        assert_eq!(body.error, "Directory not found");
    }
}
