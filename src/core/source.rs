//! Data source selection and dispatch.
//!
//! The UI talks to one [`FileSource`] value and never learns which
//! backend sits behind it. The variant is chosen once from build-time
//! configuration; everything downstream receives the constructed source
//! rather than reaching for globals.

use std::rc::Rc;

use crate::config;
use crate::core::error::SourceError;
use crate::core::github::{GitHubConfig, GitHubService};
use crate::core::local::LocalFileService;
use crate::core::watch::WatchHandle;
use crate::models::{FileNode, FileSystemItem};

// =============================================================================
// Source Enum
// =============================================================================

/// A configured file backend.
#[derive(Clone)]
pub enum FileSource {
    GitHub(GitHubService),
    Local(LocalFileService),
}

impl FileSource {
    /// Build the source selected at compile time.
    pub fn from_config() -> Result<Self, SourceError> {
        match config::backend() {
            "github" => github_source(config::github_config()),
            _ => Ok(Self::Local(LocalFileService::new(config::local_config()))),
        }
    }

    /// Short name for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GitHub(_) => "github",
            Self::Local(service) => service.data_source().label(),
        }
    }

    /// List the direct children of a directory.
    pub async fn directory_contents(&self, path: &str) -> Result<Vec<FileSystemItem>, SourceError> {
        match self {
            Self::GitHub(service) => service.directory_contents(path).await,
            Self::Local(service) => service.directory_contents(path).await,
        }
    }

    /// Fetch the sidebar tree.
    pub async fn full_tree(&self) -> Result<Vec<FileNode>, SourceError> {
        match self {
            Self::GitHub(service) => service.full_tree().await,
            Self::Local(service) => service.full_tree().await,
        }
    }

    /// Fetch a file's content as text.
    pub async fn file_content(&self, path: &str) -> Result<String, SourceError> {
        match self {
            Self::GitHub(service) => service.file_content(path).await,
            Self::Local(service) => service.file_content(path).await,
        }
    }

    /// Direct URL for a file's raw bytes.
    pub fn raw_url(&self, path: &str) -> String {
        match self {
            Self::GitHub(service) => service.raw_url(path),
            Self::Local(service) => service.raw_url(path),
        }
    }

    /// Poll a directory for changes where the backend supports it.
    ///
    /// The remote API exposes no change feed, so GitHub sources return
    /// `None` and callers simply do not re-render on external edits.
    pub fn watch_directory(&self, path: &str, callback: Rc<dyn Fn()>) -> Option<WatchHandle> {
        match self {
            Self::GitHub(_) => None,
            Self::Local(service) => Some(service.watch_directory(path, callback)),
        }
    }

    /// Stop all active directory watchers.
    pub fn unwatch_all(&self) {
        if let Self::Local(service) = self {
            service.unwatch_all();
        }
    }

    /// Drop the cached listing for one directory.
    pub fn invalidate_cache(&self, path: &str) {
        match self {
            Self::GitHub(service) => service.invalidate_cache(path),
            Self::Local(service) => service.invalidate_cache(path),
        }
    }

    /// Drop everything cached.
    pub fn clear_cache(&self) {
        match self {
            Self::GitHub(service) => service.clear_cache(),
            Self::Local(service) => service.clear_cache(),
        }
    }
}

/// Validate remote coordinates before constructing the client, so a
/// half-configured build fails with a readable error instead of issuing
/// requests to `https://api.github.com/repos///...`.
fn github_source(config: GitHubConfig) -> Result<FileSource, SourceError> {
    if config.owner.is_empty() || config.repo.is_empty() {
        return Err(SourceError::NotInitialized("repository owner and name"));
    }
    Ok(FileSource::GitHub(GitHubService::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(owner: &str, repo: &str) -> GitHubConfig {
        GitHubConfig {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: "main".to_string(),
            base_path: String::new(),
            api_url: "https://api.github.com".to_string(),
            raw_url: "https://raw.githubusercontent.com".to_string(),
        }
    }

    #[test]
    fn default_build_selects_the_local_backend() {
        let source = FileSource::from_config().unwrap();
        assert!(matches!(source, FileSource::Local(_)));
        assert_eq!(source.label(), "local");
    }

    #[test]
    fn github_needs_both_coordinates() {
        assert!(matches!(
            github_source(coords("", "")),
            Err(SourceError::NotInitialized(_))
        ));
        assert!(matches!(
            github_source(coords("owner", "")),
            Err(SourceError::NotInitialized(_))
        ));
        assert!(matches!(
            github_source(coords("", "repo")),
            Err(SourceError::NotInitialized(_))
        ));

        let source = github_source(coords("owner", "repo")).unwrap();
        assert_eq!(source.label(), "github");
    }

    #[test]
    fn github_sources_do_not_watch() {
        let source = github_source(coords("owner", "repo")).unwrap();
        let handle = source.watch_directory("docs", Rc::new(|| {}));
        assert!(handle.is_none());
        source.unwatch_all();
    }
}
