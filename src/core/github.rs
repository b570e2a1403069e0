//! Remote file source backed by a GitHub repository.
//!
//! Listings come from the contents API, the sidebar tree from one
//! recursive git-trees call, raw bytes from the same contents endpoint
//! with a raw media type. All reads go through TTL caches so revisits
//! inside the cache window cost nothing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::CACHE_TTL_MS;
use crate::core::cache::TtlCache;
use crate::core::debug;
use crate::core::error::{FetchError, SourceError};
use crate::core::hash;
use crate::core::paths;
use crate::models::{ContentEntry, EntryKind, FileNode, FileSystemItem, GitRef, TreeItem, TreeResponse};
use crate::utils::fetch;

const API_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/vnd.github+json"),
    ("X-GitHub-Api-Version", "2022-11-28"),
];

const RAW_HEADERS: [(&str, &str); 2] = [
    ("Accept", "application/vnd.github.raw+json"),
    ("X-GitHub-Api-Version", "2022-11-28"),
];

/// Repository coordinates and endpoints for the GitHub backend.
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Repository subdirectory served as the content root; empty for the
    /// whole repository.
    pub base_path: String,
    pub api_url: String,
    pub raw_url: String,
}

/// GitHub-backed file source.
///
/// Cheap to clone; clones share the caches.
#[derive(Clone)]
pub struct GitHubService {
    config: Rc<GitHubConfig>,
    listings: Rc<RefCell<TtlCache<Vec<FileSystemItem>>>>,
    trees: Rc<RefCell<TtlCache<Vec<FileNode>>>>,
}

impl GitHubService {
    pub fn new(config: GitHubConfig) -> Self {
        Self {
            config: Rc::new(config),
            listings: Rc::new(RefCell::new(TtlCache::new(CACHE_TTL_MS))),
            trees: Rc::new(RefCell::new(TtlCache::new(CACHE_TTL_MS))),
        }
    }

    /// List the direct children of a directory.
    pub async fn directory_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, SourceError> {
        let rel = paths::normalize(path);
        let full = self.full_path(&rel);
        let key = format!("contents:{full}");

        let cached = {
            let cache = self.listings.borrow();
            cache.get(&key).map(|entry| entry.data.clone())
        };
        if let Some(items) = cached {
            return Ok(items);
        }

        let url = self.contents_url(&full);
        debug::debug("github", format!("GET {url}"));
        let entries: Vec<ContentEntry> = fetch::fetch_json_with_headers(&url, &API_HEADERS)
            .await
            .map_err(|err| not_found_as(err, &rel))?;

        let items: Vec<FileSystemItem> = entries
            .into_iter()
            .filter_map(|entry| self.to_item(entry))
            .collect();
        let fingerprint = hash::listing_fingerprint(&items);
        self.listings
            .borrow_mut()
            .insert(key, items.clone(), Some(fingerprint));
        Ok(items)
    }

    /// Fetch the complete content tree in a single recursive listing.
    pub async fn full_tree(&self) -> Result<Vec<FileNode>, SourceError> {
        const KEY: &str = "tree:recursive";

        let cached = {
            let cache = self.trees.borrow();
            cache.get(KEY).map(|entry| entry.data.clone())
        };
        if let Some(tree) = cached {
            return Ok(tree);
        }

        let config = &self.config;
        let ref_url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            config.api_url, config.owner, config.repo, config.branch
        );
        debug::debug("github", format!("GET {ref_url}"));
        let git_ref: GitRef = fetch::fetch_json_with_headers(&ref_url, &API_HEADERS).await?;

        let tree_url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            config.api_url, config.owner, config.repo, git_ref.object.sha
        );
        debug::debug("github", format!("GET {tree_url}"));
        let resp: TreeResponse = fetch::fetch_json_with_headers(&tree_url, &API_HEADERS).await?;
        if resp.truncated {
            debug::warn("github", "recursive tree was truncated; sidebar is incomplete");
        }

        let nodes = build_tree(config, resp.tree);
        self.trees
            .borrow_mut()
            .insert(KEY.to_string(), nodes.clone(), None);
        Ok(nodes)
    }

    /// Fetch a file's raw content as text.
    pub async fn file_content(&self, path: &str) -> Result<String, SourceError> {
        let rel = paths::normalize(path);
        let url = self.contents_url(&self.full_path(&rel));
        debug::debug("github", format!("GET {url} (raw)"));
        fetch::fetch_text_with_headers(&url, &RAW_HEADERS)
            .await
            .map_err(|err| not_found_as(err, &rel))
    }

    /// Direct raw-content URL for a file, suitable for `img` and `embed`
    /// elements.
    pub fn raw_url(&self, path: &str) -> String {
        let config = &self.config;
        let full = self.full_path(&paths::normalize(path));
        if full.is_empty() {
            format!(
                "{}/{}/{}/{}",
                config.raw_url, config.owner, config.repo, config.branch
            )
        } else {
            format!(
                "{}/{}/{}/{}/{}",
                config.raw_url, config.owner, config.repo, config.branch, full
            )
        }
    }

    /// Drop the cached listing for one directory.
    pub fn invalidate_cache(&self, path: &str) {
        let full = self.full_path(&paths::normalize(path));
        self.listings
            .borrow_mut()
            .invalidate(&format!("contents:{full}"));
    }

    /// Drop everything cached.
    pub fn clear_cache(&self) {
        self.listings.borrow_mut().clear();
        self.trees.borrow_mut().clear();
    }

    fn full_path(&self, rel: &str) -> String {
        paths::join(&[&self.config.base_path, rel])
    }

    fn contents_url(&self, full: &str) -> String {
        let config = &self.config;
        if full.is_empty() {
            format!(
                "{}/repos/{}/{}/contents?ref={}",
                config.api_url, config.owner, config.repo, config.branch
            )
        } else {
            format!(
                "{}/repos/{}/{}/contents/{}?ref={}",
                config.api_url, config.owner, config.repo, full, config.branch
            )
        }
    }

    /// Convert an API row into an item with content-root-relative paths.
    ///
    /// Rows outside the configured base path are dropped.
    fn to_item(&self, entry: ContentEntry) -> Option<FileSystemItem> {
        let rel = paths::relative_to(&self.config.base_path, &entry.path)?;
        let kind = if entry.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let source_url = entry
            .html_url
            .unwrap_or_else(|| web_url(&self.config, kind, &entry.path));
        Some(FileSystemItem {
            name: entry.name,
            path: rel,
            kind,
            size: (kind == EntryKind::File).then_some(entry.size),
            revision: entry.sha,
            source_url,
            download_url: entry.download_url,
            is_accessible: true,
            access_error: None,
        })
    }
}

/// Classify a fetch failure for a path read; a 404 names the path.
fn not_found_as(err: FetchError, path: &str) -> SourceError {
    match err {
        FetchError::Http(404) => SourceError::NotFound(path.to_string()),
        other => other.into(),
    }
}

/// Browser-facing page URL for an entry, used when the API row carries none.
fn web_url(config: &GitHubConfig, kind: EntryKind, repo_path: &str) -> String {
    let section = if kind.is_dir() { "tree" } else { "blob" };
    format!(
        "https://github.com/{}/{}/{}/{}/{}",
        config.owner, config.repo, section, config.branch, repo_path
    )
}

/// Assemble a recursive git-trees listing into nested nodes.
///
/// Entries outside the base path are dropped. The listing is complete, so
/// every directory ends up with `children_loaded` set; a directory with no
/// surviving entries gets an empty child list.
fn build_tree(config: &GitHubConfig, items: Vec<TreeItem>) -> Vec<FileNode> {
    let mut flat: Vec<FileSystemItem> = Vec::new();
    for item in items {
        let repo_path = paths::normalize(&item.path);
        let rel = match paths::relative_to(&config.base_path, &repo_path) {
            Some(rel) if !rel.is_empty() => rel,
            _ => continue,
        };
        let kind = if item.is_tree() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let download_url = (kind == EntryKind::File).then(|| {
            format!(
                "{}/{}/{}/{}/{}",
                config.raw_url, config.owner, config.repo, config.branch, repo_path
            )
        });
        flat.push(FileSystemItem {
            name: paths::file_name(&rel),
            path: rel,
            kind,
            size: if kind == EntryKind::File { item.size } else { None },
            revision: item.sha,
            source_url: web_url(config, kind, &repo_path),
            download_url,
            is_accessible: true,
            access_error: None,
        });
    }
    flat.sort_by(|a, b| a.path.cmp(&b.path));

    let mut children: HashMap<String, Vec<FileSystemItem>> = HashMap::new();
    for item in flat {
        children.entry(paths::parent(&item.path)).or_default().push(item);
    }
    assemble(&mut children, "")
}

fn assemble(children: &mut HashMap<String, Vec<FileSystemItem>>, path: &str) -> Vec<FileNode> {
    let Some(items) = children.remove(path) else {
        return Vec::new();
    };
    items
        .into_iter()
        .map(|item| {
            if item.kind.is_dir() {
                let sub = assemble(children, &item.path);
                FileNode::directory(item, Some(sub), true)
            } else {
                FileNode::file(item)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GitHubConfig {
        GitHubConfig {
            owner: "octo".to_string(),
            repo: "notes".to_string(),
            branch: "main".to_string(),
            base_path: String::new(),
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
        }
    }

    fn tree_item(path: &str, kind: &str, size: Option<u64>) -> TreeItem {
        TreeItem {
            path: path.to_string(),
            kind: kind.to_string(),
            sha: format!("sha-{path}"),
            size,
        }
    }

    #[test]
    fn urls_follow_repository_layout() {
        let service = GitHubService::new(config());
        assert_eq!(
            service.contents_url(""),
            "https://api.github.com/repos/octo/notes/contents?ref=main"
        );
        assert_eq!(
            service.contents_url("docs/guide.md"),
            "https://api.github.com/repos/octo/notes/contents/docs/guide.md?ref=main"
        );
        assert_eq!(
            service.raw_url("docs/guide.md"),
            "https://raw.githubusercontent.com/octo/notes/main/docs/guide.md"
        );
    }

    #[test]
    fn base_path_prefixes_requests_and_strips_from_items() {
        let service = GitHubService::new(GitHubConfig {
            base_path: "content".to_string(),
            ..config()
        });
        assert_eq!(
            service.contents_url(&service.full_path("docs")),
            "https://api.github.com/repos/octo/notes/contents/content/docs?ref=main"
        );

        let entry = ContentEntry {
            name: "guide.md".to_string(),
            path: "content/docs/guide.md".to_string(),
            sha: "abc".to_string(),
            size: 12,
            kind: "file".to_string(),
            html_url: None,
            download_url: None,
        };
        let item = service.to_item(entry).unwrap();
        assert_eq!(item.path, "docs/guide.md");
        assert_eq!(item.size, Some(12));
        assert_eq!(
            item.source_url,
            "https://github.com/octo/notes/blob/main/content/docs/guide.md"
        );

        // rows outside the base path vanish
        let stray = ContentEntry {
            name: "x".to_string(),
            path: "elsewhere/x".to_string(),
            sha: "s".to_string(),
            size: 0,
            kind: "file".to_string(),
            html_url: None,
            download_url: None,
        };
        assert!(service.to_item(stray).is_none());
    }

    #[test]
    fn missing_paths_surface_the_requested_path() {
        assert_eq!(
            not_found_as(FetchError::Http(404), "docs/gone"),
            SourceError::NotFound("docs/gone".to_string())
        );
        assert_eq!(not_found_as(FetchError::Http(500), "x"), SourceError::Http(500));
        assert_eq!(not_found_as(FetchError::Timeout, "x"), SourceError::Timeout);
    }

    #[test]
    fn directories_carry_no_size() {
        let service = GitHubService::new(config());
        let entry = ContentEntry {
            name: "docs".to_string(),
            path: "docs".to_string(),
            sha: "d1".to_string(),
            size: 0,
            kind: "dir".to_string(),
            html_url: Some("https://github.com/octo/notes/tree/main/docs".to_string()),
            download_url: None,
        };
        let item = service.to_item(entry).unwrap();
        assert_eq!(item.kind, EntryKind::Directory);
        assert_eq!(item.size, None);
        assert_eq!(item.revision, "d1");
    }

    #[test]
    fn build_tree_nests_and_marks_everything_loaded() {
        let nodes = build_tree(
            &config(),
            vec![
                tree_item("docs", "tree", None),
                tree_item("docs/guide.md", "blob", Some(10)),
                tree_item("docs/api", "tree", None),
                tree_item("docs/api/ref.md", "blob", Some(4)),
                tree_item("top.txt", "blob", Some(1)),
            ],
        );
        assert_eq!(nodes.len(), 2);
        let docs = &nodes[0];
        assert_eq!(docs.item.name, "docs");
        assert!(docs.children_loaded);
        let docs_children = docs.children.as_ref().unwrap();
        assert_eq!(docs_children.len(), 2);
        let api = &docs_children[0];
        assert_eq!(api.item.path, "docs/api");
        assert!(api.children_loaded);
        assert_eq!(api.children.as_ref().unwrap()[0].item.name, "ref.md");
        assert_eq!(nodes[1].item.name, "top.txt");
        assert!(nodes[1].children.is_none());
    }

    #[test]
    fn build_tree_keeps_empty_directories() {
        let nodes = build_tree(&config(), vec![tree_item("empty", "tree", None)]);
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].children_loaded);
        assert_eq!(nodes[0].children.as_deref(), Some(&[][..]));
    }

    #[test]
    fn build_tree_filters_by_base_path() {
        let config = GitHubConfig {
            base_path: "content".to_string(),
            ..config()
        };
        let nodes = build_tree(
            &config,
            vec![
                tree_item("content", "tree", None),
                tree_item("content/a.md", "blob", Some(2)),
                tree_item("README.md", "blob", Some(5)),
            ],
        );
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].item.path, "a.md");
        assert_eq!(
            nodes[0].item.download_url.as_deref(),
            Some("https://raw.githubusercontent.com/octo/notes/main/content/a.md")
        );
    }
}
