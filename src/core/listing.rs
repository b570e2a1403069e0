//! Filtering and ordering of directory listings.

use std::cmp::Ordering;

use crate::core::hidden;
use crate::models::{FileFilter, FileNode, FileSystemItem, SortField, SortOrder};

/// Whether an item survives the active filter.
pub fn matches_filter(item: &FileSystemItem, filter: &FileFilter) -> bool {
    if !filter.show_hidden && hidden::is_hidden(&item.name, &item.path) {
        return false;
    }
    if !filter.search_query.is_empty() {
        let query = filter.search_query.to_lowercase();
        if !item.name.to_lowercase().contains(&query) {
            return false;
        }
    }
    // Extension allow-list constrains files only; directories stay visible
    // so their contents remain reachable.
    if !filter.file_types.is_empty() && !item.kind.is_dir() {
        let ext = item.extension().unwrap_or_default();
        if !filter.file_types.iter().any(|t| t.eq_ignore_ascii_case(&ext)) {
            return false;
        }
    }
    true
}

/// Listing order: directories always group before files, whatever the sort
/// field and direction; the direction only flips ordering within each group.
pub fn compare(a: &FileSystemItem, b: &FileSystemItem, field: SortField, order: SortOrder) -> Ordering {
    match (a.kind.is_dir(), b.kind.is_dir()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let within = match field {
        SortField::Name => name_cmp(a, b),
        SortField::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
        SortField::Kind => type_key(a).cmp(&type_key(b)),
    };
    match order {
        SortOrder::Asc => within,
        SortOrder::Desc => within.reverse(),
    }
}

fn name_cmp(a: &FileSystemItem, b: &FileSystemItem) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

fn type_key(item: &FileSystemItem) -> String {
    if item.kind.is_dir() {
        item.name.to_lowercase()
    } else {
        item.extension()
            .unwrap_or_else(|| item.name.to_lowercase())
    }
}

/// Filter then sort a listing for display.
pub fn prepare(
    mut items: Vec<FileSystemItem>,
    filter: &FileFilter,
    field: SortField,
    order: SortOrder,
) -> Vec<FileSystemItem> {
    items.retain(|item| matches_filter(item, filter));
    items.sort_by(|a, b| compare(a, b, field, order));
    items
}

/// Strip hidden entries from a tree, recursively.
pub fn prune_hidden(nodes: Vec<FileNode>) -> Vec<FileNode> {
    nodes
        .into_iter()
        .filter(|node| !hidden::is_hidden(&node.item.name, &node.item.path))
        .map(|mut node| {
            node.children = node.children.map(prune_hidden);
            node
        })
        .collect()
}

/// Convert a flat listing into tree nodes. Directories come back unloaded
/// so the tree can fetch them lazily on expansion.
pub fn nodes_from_listing(items: &[FileSystemItem]) -> Vec<FileNode> {
    items
        .iter()
        .map(|item| {
            if item.kind.is_dir() {
                FileNode::directory(item.clone(), None, false)
            } else {
                FileNode::file(item.clone())
            }
        })
        .collect()
}

/// Attach freshly loaded children to the tree node at `path`.
///
/// Returns false when the path is no longer present, which happens when the
/// tree was replaced while the fetch was in flight.
pub fn attach_children(nodes: &mut [FileNode], path: &str, children: Vec<FileNode>) -> bool {
    for node in nodes.iter_mut() {
        if node.item.path == path {
            node.children = Some(children);
            node.children_loaded = true;
            return true;
        }
        if let Some(sub) = node.children.as_mut()
            && attach_children(sub, path, children.clone())
        {
            return true;
        }
    }
    false
}
