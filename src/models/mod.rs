//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`FileSystemItem`], [`FileNode`], [`EntryKind`] - Filesystem entries and trees
//! - [`ContentEntry`], [`TreeItem`] - GitHub content API wire types
//! - [`ManifestNode`] - Local manifest / directory API wire type
//! - [`NavHistory`], [`ViewPrefs`] - Navigation and persisted view state
//! - [`ViewMode`], [`SortField`], [`SortOrder`], [`FileFilter`] - Listing presentation

mod explorer;
mod file;
mod github;
mod manifest;

pub use explorer::{NavHistory, ViewPrefs};
pub use file::{
    EntryKind, FileFilter, FileNode, FileSystemItem, PreviewKind, SortField, SortOrder, ViewMode,
};
pub use github::{ContentEntry, GitRef, TreeItem, TreeResponse};
pub use manifest::{ApiErrorBody, ManifestNode};
