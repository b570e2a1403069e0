//! Filesystem entry types shared by every backend.

use serde::{Deserialize, Serialize};

use crate::core::paths;

// =============================================================================
// Entry Kind
// =============================================================================

/// Kind of a filesystem entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    #[inline]
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

// =============================================================================
// FileSystemItem
// =============================================================================

/// One filesystem entry as presented by a backend.
///
/// Paths are relative to the content root, `/`-joined, with no leading or
/// trailing slash. `revision` is an opaque identity token: the repository
/// blob sha for remote entries, a derived path hash for local ones.
#[derive(Clone, Debug, PartialEq)]
pub struct FileSystemItem {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    /// Byte size; files only, directories carry `None`.
    pub size: Option<u64>,
    pub revision: String,
    /// Canonical location of the entry (page URL or served path).
    pub source_url: String,
    /// Direct content URL; files only.
    pub download_url: Option<String>,
    pub is_accessible: bool,
    /// Human-readable reason, present only when `is_accessible` is false.
    pub access_error: Option<String>,
}

impl FileSystemItem {
    /// Extension after the last dot, lowercased. `None` when the name has
    /// no dot or ends with one.
    pub fn extension(&self) -> Option<String> {
        paths::extension(&self.name)
    }
}

// =============================================================================
// FileNode
// =============================================================================

/// A [`FileSystemItem`] in tree form, used by the navigation sidebar.
///
/// `children == None` means "not fetched yet"; `Some(vec![])` means the
/// directory was fetched and is empty. `children_loaded` records which of
/// the two a directory is in. Files never carry children.
#[derive(Clone, Debug, PartialEq)]
pub struct FileNode {
    pub item: FileSystemItem,
    pub children: Option<Vec<FileNode>>,
    pub children_loaded: bool,
}

impl FileNode {
    /// Leaf node for a file. Nothing further to load.
    pub fn file(item: FileSystemItem) -> Self {
        Self {
            item,
            children: None,
            children_loaded: true,
        }
    }

    pub fn directory(item: FileSystemItem, children: Option<Vec<FileNode>>, loaded: bool) -> Self {
        Self {
            item,
            children,
            children_loaded: loaded,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.item.kind.is_dir()
    }
}

// =============================================================================
// View preferences
// =============================================================================

/// Listing layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Field the listing is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Size,
    /// Orders files by extension; directories fall back to their name.
    Kind,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Kind => "Type",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Pure predicate input for listing filtering. No persisted identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileFilter {
    /// Case-insensitive substring match on entry names. Empty = match all.
    pub search_query: String,
    /// Extension allow-list applied to files only. Empty = allow all.
    pub file_types: Vec<String>,
    pub show_hidden: bool,
}

// =============================================================================
// Preview kinds
// =============================================================================

/// How the preview pane renders a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Markdown,
    Image,
    Pdf,
    /// Source code, rendered as a highlighted fenced block.
    Code,
    Text,
    Unknown,
}

impl PreviewKind {
    /// Detect preview kind from a file name's extension.
    pub fn from_name(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => return Self::Unknown,
        };
        match ext.as_str() {
            "md" | "markdown" => Self::Markdown,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "ico" | "bmp" => Self::Image,
            "pdf" => Self::Pdf,
            "rs" | "js" | "ts" | "jsx" | "tsx" | "py" | "rb" | "go" | "c" | "h" | "cpp"
            | "css" | "html" | "json" | "toml" | "yaml" | "yml" | "sh" | "sql" | "xml" => {
                Self::Code
            }
            "txt" | "log" | "csv" => Self::Text,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, kind: EntryKind) -> FileSystemItem {
        FileSystemItem {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            size: None,
            revision: String::new(),
            source_url: String::new(),
            download_url: None,
            is_accessible: true,
            access_error: None,
        }
    }

    #[test]
    fn entry_kind_serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::from_str::<EntryKind>("\"directory\"").unwrap(),
            EntryKind::Directory
        );
        assert_eq!(
            serde_json::to_string(&EntryKind::File).unwrap(),
            "\"file\""
        );
    }

    #[test]
    fn extension_is_lowercased_and_optional() {
        assert_eq!(item("a.MD", EntryKind::File).extension().as_deref(), Some("md"));
        assert_eq!(item("Makefile", EntryKind::File).extension(), None);
        assert_eq!(item("archive.", EntryKind::File).extension(), None);
        assert_eq!(
            item("a.tar.gz", EntryKind::File).extension().as_deref(),
            Some("gz")
        );
    }

    #[test]
    fn preview_kind_detection() {
        assert_eq!(PreviewKind::from_name("notes.md"), PreviewKind::Markdown);
        assert_eq!(PreviewKind::from_name("photo.JPG"), PreviewKind::Image);
        assert_eq!(PreviewKind::from_name("paper.pdf"), PreviewKind::Pdf);
        assert_eq!(PreviewKind::from_name("main.rs"), PreviewKind::Code);
        assert_eq!(PreviewKind::from_name("notes.txt"), PreviewKind::Text);
        assert_eq!(PreviewKind::from_name("binary.bin"), PreviewKind::Unknown);
        assert_eq!(PreviewKind::from_name("no_extension"), PreviewKind::Unknown);
    }

    #[test]
    fn file_node_constructors() {
        let file = FileNode::file(item("a.txt", EntryKind::File));
        assert!(file.children.is_none());
        assert!(file.children_loaded);

        let dir = FileNode::directory(item("docs", EntryKind::Directory), None, false);
        assert!(dir.is_dir());
        assert!(!dir.children_loaded);
    }
}
