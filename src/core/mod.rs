//! Core data-access and presentation logic for the explorer.
//!
//! This module provides:
//! - [`FileSource`] backends for remote repositories and local serving
//! - [`listing`] filtering and ordering over fetched directory contents
//! - [`WatchHandle`] polling subscriptions for local change detection
//! - [`ThumbnailService`] canvas rendering for the grid view
//! - [`debug`] the in-memory diagnostic log

pub mod cache;
pub mod debug;
pub mod error;
pub mod github;
pub mod hash;
pub mod hidden;
pub mod listing;
pub mod local;
pub mod paths;
mod source;
mod thumbnail;
pub mod watch;

pub use error::{FetchError, SourceError};
pub use source::FileSource;
pub use thumbnail::ThumbnailService;
pub use watch::WatchHandle;
