//! Local file source with dynamic-API detection and manifest fallback.
//!
//! A deployment either runs the dev server, which answers arbitrary
//! directory queries under `/api/`, or is a static bundle shipping a
//! precomputed `file-tree.json` manifest. Which of the two exists is
//! discovered on the first listing request and then locked in for the
//! life of the service, so later requests never pay for re-detection.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo_timers::callback::Interval;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

use crate::config::CACHE_TTL_MS;
use crate::core::cache::TtlCache;
use crate::core::debug;
use crate::core::error::{FetchError, SourceError};
use crate::core::hash;
use crate::core::paths;
use crate::core::watch::{self, DirectoryWatcher, WatchCallback, WatchHandle, WatcherMap};
use crate::models::{ApiErrorBody, EntryKind, FileNode, FileSystemItem, ManifestNode};
use crate::utils::fetch;

// =============================================================================
// Configuration
// =============================================================================

/// Endpoints and polling rate for the local backend.
#[derive(Clone, Debug)]
pub struct LocalConfig {
    /// URL prefix raw files are served under (kept verbatim, so a leading
    /// slash survives).
    pub base_path: String,
    pub api_directory_url: String,
    pub api_tree_url: String,
    pub manifest_url: String,
    pub poll_interval_ms: u32,
}

// =============================================================================
// Data source mode
// =============================================================================

/// Which backing store answers listing requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// Not yet determined; the next request runs detection.
    Unknown,
    /// Dynamic same-origin API.
    Api,
    /// Precomputed static manifest.
    StaticManifest,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "local",
            Self::Api => "local api",
            Self::StaticManifest => "static manifest",
        }
    }
}

/// Result of one detection-relevant attempt.
#[derive(Clone, Copy, Debug)]
pub enum AttemptOutcome {
    /// The dynamic API answered a listing.
    ApiOk,
    /// The dynamic API endpoint itself is absent (404).
    ApiMissing,
    /// The static manifest loaded and parsed.
    ManifestOk,
    /// The manifest could not be fetched or parsed.
    ManifestFailed,
}

/// Mode transition function.
///
/// Only `Unknown` ever moves: a successful API listing locks `Api`, a
/// successful manifest load locks `StaticManifest`, and a failed manifest
/// load stays `Unknown` so the next request retries detection from
/// scratch. A locked mode never changes.
pub fn next_source(current: DataSource, outcome: AttemptOutcome) -> DataSource {
    match (current, outcome) {
        (DataSource::Unknown, AttemptOutcome::ApiOk) => DataSource::Api,
        (DataSource::Unknown, AttemptOutcome::ManifestOk) => DataSource::StaticManifest,
        (DataSource::Unknown, _) => DataSource::Unknown,
        (locked, _) => locked,
    }
}

// =============================================================================
// Manifest helpers
// =============================================================================

/// Immediate children of `path` within a nested manifest.
///
/// Walks the tree segment by segment, matching directory names. `None`
/// when the path does not lead to a directory; a directory node without a
/// `children` field lists as empty.
pub fn manifest_children<'a>(nodes: &'a [ManifestNode], path: &str) -> Option<&'a [ManifestNode]> {
    let mut current = nodes;
    for segment in paths::split(path) {
        let next = current
            .iter()
            .find(|node| node.name == segment && node.kind.is_dir())?;
        current = next.children.as_deref().unwrap_or(&[]);
    }
    Some(current)
}

/// Convert one manifest or API row into an item.
///
/// The manifest carries no revision ids, so the identity token is a stable
/// hash of the path.
fn manifest_item(config: &LocalConfig, node: &ManifestNode) -> FileSystemItem {
    let rel = paths::normalize(&node.path);
    let is_file = node.kind == EntryKind::File;
    let url = serve_url(config, &rel);
    FileSystemItem {
        name: node.name.clone(),
        path: rel.clone(),
        kind: node.kind,
        size: if is_file { node.size } else { None },
        revision: hash::path_revision(&rel),
        download_url: is_file.then(|| url.clone()),
        source_url: url,
        is_accessible: true,
        access_error: None,
    }
}

/// Where a path is served from, under the configured base.
fn serve_url(config: &LocalConfig, rel: &str) -> String {
    let base = config.base_path.trim_end_matches('/');
    if rel.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{rel}")
    }
}

fn listing_key(path: &str) -> String {
    format!("contents:{path}")
}

const TREE_KEY: &str = "tree:full";

/// Convert a depth-limited API tree. A directory with children present is
/// loaded (empty list means known empty); one without is yet to load.
fn api_tree_nodes(config: &LocalConfig, nodes: &[ManifestNode]) -> Vec<FileNode> {
    nodes
        .iter()
        .map(|node| {
            let item = manifest_item(config, node);
            if node.kind.is_dir() {
                match &node.children {
                    Some(children) => {
                        FileNode::directory(item, Some(api_tree_nodes(config, children)), true)
                    }
                    None => FileNode::directory(item, None, false),
                }
            } else {
                FileNode::file(item)
            }
        })
        .collect()
}

/// Convert the full manifest into a shallow tree: structure is preserved
/// but every directory is marked unloaded, so the sidebar requests real
/// children on demand and stays consistent with the API-mode flow.
fn manifest_tree_nodes(config: &LocalConfig, nodes: &[ManifestNode]) -> Vec<FileNode> {
    nodes
        .iter()
        .map(|node| {
            let item = manifest_item(config, node);
            if node.kind.is_dir() {
                let children = node
                    .children
                    .as_ref()
                    .map(|c| manifest_tree_nodes(config, c));
                FileNode::directory(item, children, false)
            } else {
                FileNode::file(item)
            }
        })
        .collect()
}

// =============================================================================
// Service
// =============================================================================

/// Local file source.
///
/// Cheap to clone; clones share mode, caches, and the watcher registry.
#[derive(Clone)]
pub struct LocalFileService {
    config: Rc<LocalConfig>,
    source: Rc<Cell<DataSource>>,
    manifest: Rc<RefCell<Option<Vec<ManifestNode>>>>,
    listings: Rc<RefCell<TtlCache<Vec<FileSystemItem>>>>,
    trees: Rc<RefCell<TtlCache<Vec<FileNode>>>>,
    watchers: WatcherMap,
}

impl LocalFileService {
    pub fn new(config: LocalConfig) -> Self {
        Self {
            config: Rc::new(config),
            source: Rc::new(Cell::new(DataSource::Unknown)),
            manifest: Rc::new(RefCell::new(None)),
            listings: Rc::new(RefCell::new(TtlCache::new(CACHE_TTL_MS))),
            trees: Rc::new(RefCell::new(TtlCache::new(CACHE_TTL_MS))),
            watchers: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Current data source mode.
    pub fn data_source(&self) -> DataSource {
        self.source.get()
    }

    /// List the direct children of a directory.
    ///
    /// Tries the dynamic API unless the mode is locked to the manifest; a
    /// 404 from the API is absorbed and answered from the manifest instead
    /// of failing the call.
    pub async fn directory_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, SourceError> {
        let rel = paths::normalize(path);
        let key = listing_key(&rel);

        let cached = {
            let cache = self.listings.borrow();
            cache.get(&key).map(|entry| entry.data.clone())
        };
        if let Some(items) = cached {
            return Ok(items);
        }

        if self.source.get() != DataSource::StaticManifest {
            match self.fetch_listing_api(&rel).await {
                Ok(mut items) => {
                    self.transition(AttemptOutcome::ApiOk);
                    self.probe_access(&mut items).await;
                    let fingerprint = hash::listing_fingerprint(&items);
                    self.listings
                        .borrow_mut()
                        .insert(key, items.clone(), Some(fingerprint));
                    return Ok(items);
                }
                Err(SourceError::Http(404)) => {
                    self.transition(AttemptOutcome::ApiMissing);
                }
                Err(other) => return Err(other),
            }
        }

        let items = self.manifest_listing(&rel).await?;
        let fingerprint = hash::listing_fingerprint(&items);
        self.listings
            .borrow_mut()
            .insert(key, items.clone(), Some(fingerprint));
        Ok(items)
    }

    /// Fetch the sidebar tree.
    ///
    /// API mode returns a depth-limited tree; manifest mode a shallow
    /// conversion of the whole manifest.
    pub async fn full_tree(&self) -> Result<Vec<FileNode>, SourceError> {
        let cached = {
            let cache = self.trees.borrow();
            cache.get(TREE_KEY).map(|entry| entry.data.clone())
        };
        if let Some(nodes) = cached {
            return Ok(nodes);
        }

        let nodes = if self.source.get() != DataSource::StaticManifest {
            match self.fetch_tree_api().await {
                Ok(nodes) => {
                    self.transition(AttemptOutcome::ApiOk);
                    nodes
                }
                Err(SourceError::Http(404)) => {
                    self.transition(AttemptOutcome::ApiMissing);
                    self.manifest_tree().await?
                }
                Err(other) => return Err(other),
            }
        } else {
            self.manifest_tree().await?
        };

        self.trees
            .borrow_mut()
            .insert(TREE_KEY.to_string(), nodes.clone(), None);
        Ok(nodes)
    }

    /// Fetch a file's content as text from the served path.
    pub async fn file_content(&self, path: &str) -> Result<String, SourceError> {
        let rel = paths::normalize(path);
        let url = serve_url(&self.config, &rel);
        debug::debug("local", format!("GET {url}"));
        fetch::fetch_text(&url).await.map_err(move |err| match err {
            FetchError::Http(404) => SourceError::NotFound(rel),
            other => other.into(),
        })
    }

    /// Served URL for a path. Pure string construction.
    pub fn raw_url(&self, path: &str) -> String {
        serve_url(&self.config, &paths::normalize(path))
    }

    /// Poll `path` for changes, invoking `callback` when its listing
    /// fingerprint moves.
    ///
    /// At most one timer runs per path; watching an already-watched path
    /// swaps the callback on the existing timer. In manifest mode there is
    /// nothing to poll and the returned handle is inert.
    pub fn watch_directory(&self, path: &str, callback: Rc<dyn Fn()>) -> WatchHandle {
        let rel = paths::normalize(path);
        if self.source.get() == DataSource::StaticManifest {
            debug::debug("watch", format!("manifest mode; not watching {rel:?}"));
            return WatchHandle::inert();
        }

        {
            let watchers = self.watchers.borrow();
            if let Some(existing) = watchers.get(&rel) {
                *existing.callback.borrow_mut() = callback;
                return WatchHandle::new(&rel, Rc::downgrade(&self.watchers));
            }
        }

        debug::debug(
            "watch",
            format!("watching {rel:?} every {}ms", self.config.poll_interval_ms),
        );
        let watcher = self.spawn_watcher(&rel, callback);
        self.watchers.borrow_mut().insert(rel.clone(), watcher);
        WatchHandle::new(&rel, Rc::downgrade(&self.watchers))
    }

    /// Stop every active watcher.
    pub fn unwatch_all(&self) {
        let count = self.watchers.borrow().len();
        if count > 0 {
            self.watchers.borrow_mut().clear();
            debug::debug("watch", format!("stopped {count} watchers"));
        }
    }

    /// Drop the cached listing for one path, forcing the next read to
    /// refetch.
    pub fn invalidate_cache(&self, path: &str) {
        let rel = paths::normalize(path);
        self.listings.borrow_mut().invalidate(&listing_key(&rel));
    }

    /// Drop all cached listings, the tree, and the parsed manifest.
    ///
    /// The detected mode survives; a deployment does not change shape
    /// mid-session.
    pub fn clear_cache(&self) {
        self.listings.borrow_mut().clear();
        self.trees.borrow_mut().clear();
        *self.manifest.borrow_mut() = None;
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn transition(&self, outcome: AttemptOutcome) {
        let current = self.source.get();
        let next = next_source(current, outcome);
        if next != current {
            debug::info(
                "source",
                format!("data source: {} -> {}", current.label(), next.label()),
            );
            self.source.set(next);
        }
    }

    async fn fetch_listing_api(&self, rel: &str) -> Result<Vec<FileSystemItem>, SourceError> {
        let url = directory_query_url(&self.config, rel);
        debug::debug("local", format!("GET {url}"));
        let (status, body) = fetch::fetch_response(&url, &[]).await?;
        if status == 404 {
            return Err(SourceError::Http(404));
        }
        if !(200..300).contains(&status) {
            if let Ok(envelope) = serde_json::from_str::<ApiErrorBody>(&body) {
                debug::warn("local", format!("directory API {status}: {}", envelope.error));
            }
            return Err(SourceError::Http(status));
        }
        let rows: Vec<ManifestNode> =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(rows
            .iter()
            .map(|node| manifest_item(&self.config, node))
            .collect())
    }

    async fn fetch_tree_api(&self) -> Result<Vec<FileNode>, SourceError> {
        let url = &self.config.api_tree_url;
        debug::debug("local", format!("GET {url}"));
        let nodes: Vec<ManifestNode> = fetch::fetch_json(url).await?;
        Ok(api_tree_nodes(&self.config, &nodes))
    }

    async fn manifest_listing(&self, rel: &str) -> Result<Vec<FileSystemItem>, SourceError> {
        self.ensure_manifest().await?;
        let manifest = self.manifest.borrow();
        let nodes = manifest.as_deref().unwrap_or(&[]);
        // An unknown path lists as empty rather than failing, mirroring
        // how the API treats directories it cannot see.
        let listing = manifest_children(nodes, rel)
            .map(|children| {
                children
                    .iter()
                    .map(|node| manifest_item(&self.config, node))
                    .collect()
            })
            .unwrap_or_default();
        Ok(listing)
    }

    async fn manifest_tree(&self) -> Result<Vec<FileNode>, SourceError> {
        self.ensure_manifest().await?;
        let manifest = self.manifest.borrow();
        let nodes = manifest.as_deref().unwrap_or(&[]);
        Ok(manifest_tree_nodes(&self.config, nodes))
    }

    /// Load and parse the manifest once per instance.
    async fn ensure_manifest(&self) -> Result<(), SourceError> {
        if self.manifest.borrow().is_some() {
            return Ok(());
        }
        let url = &self.config.manifest_url;
        debug::debug("local", format!("GET {url}"));
        match fetch::fetch_json::<Vec<ManifestNode>>(url).await {
            Ok(nodes) => {
                self.transition(AttemptOutcome::ManifestOk);
                debug::info(
                    "local",
                    format!("manifest loaded with {} top-level entries", nodes.len()),
                );
                *self.manifest.borrow_mut() = Some(nodes);
                Ok(())
            }
            Err(err) => {
                self.transition(AttemptOutcome::ManifestFailed);
                debug::warn("local", format!("manifest load failed: {err}"));
                Err(err.into())
            }
        }
    }

    /// Probe each file for reachability. 401/403 mark the item
    /// inaccessible with a readable reason; anything else, including
    /// transport failures, assumes accessible because opaque cross-origin
    /// responses are indistinguishable from permission problems.
    async fn probe_access(&self, items: &mut [FileSystemItem]) {
        for item in items.iter_mut() {
            if item.kind.is_dir() {
                continue;
            }
            let url = serve_url(&self.config, &item.path);
            match fetch::probe_status(&url).await {
                Ok(401) => {
                    item.is_accessible = false;
                    item.access_error = Some("Authentication required (HTTP 401)".to_string());
                }
                Ok(403) => {
                    item.is_accessible = false;
                    item.access_error = Some("Access forbidden (HTTP 403)".to_string());
                }
                Ok(_) => {}
                Err(err) => {
                    debug::debug("local", format!("probe {url} failed ({err}); assuming accessible"));
                }
            }
        }
    }

    #[allow(unused_variables)]
    fn spawn_watcher(&self, rel: &str, callback: Rc<dyn Fn()>) -> DirectoryWatcher {
        let callback: WatchCallback = Rc::new(RefCell::new(callback));

        #[cfg(target_arch = "wasm32")]
        let interval = {
            let baseline = {
                let cache = self.listings.borrow();
                cache
                    .get(&listing_key(rel))
                    .and_then(|entry| entry.fingerprint.clone())
            };
            let config = self.config.clone();
            let listings = self.listings.clone();
            let tick_callback = callback.clone();
            let last_seen = Rc::new(RefCell::new(baseline));
            let path = rel.to_string();

            Interval::new(self.config.poll_interval_ms, move || {
                let config = config.clone();
                let listings = listings.clone();
                let tick_callback = tick_callback.clone();
                let last_seen = last_seen.clone();
                let path = path.clone();
                spawn_local(async move {
                    let url = directory_query_url(&config, &path);
                    let rows: Vec<ManifestNode> = match fetch::fetch_json(&url).await {
                        Ok(rows) => rows,
                        Err(err) => {
                            // transient poll failures are silent; the next
                            // tick tries again
                            debug::debug("watch", format!("poll {path:?} failed: {err}"));
                            return;
                        }
                    };
                    let items: Vec<FileSystemItem> = rows
                        .iter()
                        .map(|node| manifest_item(&config, node))
                        .collect();
                    let fresh = hash::listing_fingerprint(&items);
                    let previous = { last_seen.borrow().clone() };
                    if watch::is_change(previous.as_deref(), &fresh) {
                        debug::info("watch", format!("change detected in {path:?}"));
                        listings.borrow_mut().invalidate(&listing_key(&path));
                        *last_seen.borrow_mut() = Some(fresh);
                        let notify = tick_callback.borrow().clone();
                        notify();
                    } else if previous.is_none() {
                        *last_seen.borrow_mut() = Some(fresh);
                    }
                });
            })
        };

        DirectoryWatcher {
            callback,
            #[cfg(target_arch = "wasm32")]
            _interval: interval,
        }
    }
}

fn directory_query_url(config: &LocalConfig, rel: &str) -> String {
    let encoded = String::from(js_sys::encode_uri_component(rel));
    format!("{}?path={}", config.api_directory_url, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LocalConfig {
        LocalConfig {
            base_path: "/trunk".to_string(),
            api_directory_url: "/api/directory".to_string(),
            api_tree_url: "/api/tree".to_string(),
            manifest_url: "/file-tree.json".to_string(),
            poll_interval_ms: 3000,
        }
    }

    fn dir(name: &str, path: &str, children: Option<Vec<ManifestNode>>) -> ManifestNode {
        ManifestNode {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::Directory,
            size: None,
            children,
        }
    }

    fn file(name: &str, path: &str, size: u64) -> ManifestNode {
        ManifestNode {
            name: name.to_string(),
            path: path.to_string(),
            kind: EntryKind::File,
            size: Some(size),
            children: None,
        }
    }

    #[test]
    fn detection_locks_on_first_success() {
        use AttemptOutcome::*;
        use DataSource::*;

        assert_eq!(next_source(Unknown, ApiOk), Api);
        assert_eq!(next_source(Unknown, ManifestOk), StaticManifest);
        // a missing API or failed manifest keeps detection open
        assert_eq!(next_source(Unknown, ApiMissing), Unknown);
        assert_eq!(next_source(Unknown, ManifestFailed), Unknown);
        // locked modes never move
        assert_eq!(next_source(Api, ManifestOk), Api);
        assert_eq!(next_source(Api, ApiMissing), Api);
        assert_eq!(next_source(StaticManifest, ApiOk), StaticManifest);
        assert_eq!(next_source(StaticManifest, ManifestFailed), StaticManifest);
    }

    #[test]
    fn manifest_walk_finds_nested_children() {
        let manifest = vec![dir(
            "a",
            "a",
            Some(vec![file("b.txt", "a/b.txt", 10)]),
        )];

        let children = manifest_children(&manifest, "a").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path, "a/b.txt");

        let root = manifest_children(&manifest, "").unwrap();
        assert_eq!(root.len(), 1);

        // files and unknown paths do not resolve to directories
        assert!(manifest_children(&manifest, "a/b.txt").is_none());
        assert!(manifest_children(&manifest, "missing").is_none());
    }

    #[test]
    fn directory_without_children_field_lists_empty() {
        let manifest = vec![dir("empty", "empty", None)];
        let children = manifest_children(&manifest, "empty").unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn empty_manifest_lists_an_empty_root() {
        let root = manifest_children(&[], "").unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn manifest_items_carry_derived_identity_and_urls() {
        let cfg = config();
        let item = manifest_item(&cfg, &file("b.txt", "a/b.txt", 10));
        assert_eq!(item.name, "b.txt");
        assert_eq!(item.path, "a/b.txt");
        assert_eq!(item.size, Some(10));
        assert_eq!(item.revision.len(), 8);
        assert_eq!(item.revision, hash::path_revision("a/b.txt"));
        assert_eq!(item.source_url, "/trunk/a/b.txt");
        assert_eq!(item.download_url.as_deref(), Some("/trunk/a/b.txt"));
        assert!(item.is_accessible);

        let folder = manifest_item(&cfg, &dir("a", "a", None));
        assert_eq!(folder.size, None);
        assert_eq!(folder.download_url, None);
        assert_eq!(folder.source_url, "/trunk/a");
    }

    #[test]
    fn serve_url_keeps_the_leading_slash() {
        let cfg = config();
        assert_eq!(serve_url(&cfg, ""), "/trunk");
        assert_eq!(serve_url(&cfg, "docs/x.md"), "/trunk/docs/x.md");

        let slashed = LocalConfig {
            base_path: "/trunk/".to_string(),
            ..config()
        };
        assert_eq!(serve_url(&slashed, "x"), "/trunk/x");
    }

    #[test]
    fn api_tree_marks_loaded_where_children_are_present() {
        let cfg = config();
        let nodes = api_tree_nodes(
            &cfg,
            &[
                dir("full", "full", Some(vec![file("x.md", "full/x.md", 1)])),
                dir("known-empty", "known-empty", Some(vec![])),
                dir("deeper", "deeper", None),
            ],
        );
        assert!(nodes[0].children_loaded);
        assert_eq!(nodes[0].children.as_ref().unwrap().len(), 1);
        assert!(nodes[1].children_loaded);
        assert_eq!(nodes[1].children.as_deref(), Some(&[][..]));
        assert!(!nodes[2].children_loaded);
        assert!(nodes[2].children.is_none());
    }

    #[test]
    fn manifest_tree_is_shallow_everywhere() {
        let cfg = config();
        let nodes = manifest_tree_nodes(
            &cfg,
            &[dir(
                "a",
                "a",
                Some(vec![dir("b", "a/b", Some(vec![file("c.txt", "a/b/c.txt", 2)]))]),
            )],
        );
        // structure survives but every directory wants a real load
        assert!(!nodes[0].children_loaded);
        let b = &nodes[0].children.as_ref().unwrap()[0];
        assert!(!b.children_loaded);
        assert_eq!(b.children.as_ref().unwrap()[0].item.name, "c.txt");
    }

    #[test]
    fn fresh_service_starts_undetected() {
        let service = LocalFileService::new(config());
        assert_eq!(service.data_source(), DataSource::Unknown);
        assert_eq!(service.raw_url("docs/a.md"), "/trunk/docs/a.md");
        // cache plumbing is callable before any fetch
        service.invalidate_cache("docs");
        service.clear_cache();
        service.unwatch_all();
    }

    #[test]
    fn listing_keys_are_path_scoped() {
        assert_eq!(listing_key(""), "contents:");
        assert_eq!(listing_key("a/b"), "contents:a/b");
    }
}
