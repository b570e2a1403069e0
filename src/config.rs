//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Deployment settings (which backend serves the files, repository
//! coordinates) are baked in at compile time via `option_env!`, so a static
//! bundle needs no runtime config file.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header.
pub const APP_NAME: &str = "docuryon";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Cache and Watch Configuration
// =============================================================================

/// Directory listing cache lifetime (5 minutes).
pub const CACHE_TTL_MS: f64 = 300_000.0;

/// Poll interval for directory change watching.
pub const WATCH_POLL_INTERVAL_MS: u32 = 3000;

// =============================================================================
// Preview Configuration
// =============================================================================

/// Largest file the preview pane will fetch.
pub const MAX_PREVIEW_BYTES: u64 = 5 * 1024 * 1024;

/// Thumbnail rendering parameters for the grid view.
pub mod thumbnails {
    /// Canvas width in CSS pixels.
    pub const WIDTH: u32 = 120;
    /// Canvas height in CSS pixels.
    pub const HEIGHT: u32 = 160;
    /// JPEG encoder quality for downscaled images.
    pub const JPEG_QUALITY: f64 = 0.8;
    /// Lines of text drawn for document thumbnails.
    pub const TEXT_LINES: usize = 14;
    /// Characters kept per drawn line.
    pub const TEXT_CHARS_PER_LINE: usize = 26;
}

// =============================================================================
// Diagnostic Log Configuration
// =============================================================================

/// In-app log sizing and persistence.
pub mod log {
    /// Entries kept in memory.
    pub const MAX_ENTRIES: usize = 500;
    /// Entries persisted to localStorage across reloads.
    pub const PERSISTED_ENTRIES: usize = 100;
    /// localStorage key for the persisted tail.
    pub const STORAGE_KEY: &str = "debug_log_tail";
}

// =============================================================================
// Persistence Keys
// =============================================================================

/// localStorage key for view preferences (sort, layout, sidebar).
pub const VIEW_PREFS_KEY: &str = "view_prefs";

// =============================================================================
// Deployment Configuration
// =============================================================================

/// Which backend serves file data: "local" (dev server or static bundle)
/// or "github" (repository contents API).
pub fn backend() -> &'static str {
    option_env!("DOCURYON_BACKEND").unwrap_or("local")
}

fn trunk_path() -> &'static str {
    option_env!("DOCURYON_TRUNK_PATH").unwrap_or("/trunk")
}

fn repo_owner() -> &'static str {
    option_env!("DOCURYON_REPO_OWNER").unwrap_or("")
}

fn repo_name() -> &'static str {
    option_env!("DOCURYON_REPO_NAME").unwrap_or("")
}

fn repo_branch() -> &'static str {
    option_env!("DOCURYON_REPO_BRANCH").unwrap_or("main")
}

fn repo_base_path() -> &'static str {
    option_env!("DOCURYON_BASE_PATH").unwrap_or("")
}

use crate::core::github::GitHubConfig;
use crate::core::local::LocalConfig;

/// Repository coordinates for the GitHub backend.
pub fn github_config() -> GitHubConfig {
    GitHubConfig {
        owner: repo_owner().to_string(),
        repo: repo_name().to_string(),
        branch: repo_branch().to_string(),
        base_path: repo_base_path().to_string(),
        api_url: "https://api.github.com".to_string(),
        raw_url: "https://raw.githubusercontent.com".to_string(),
    }
}

/// Endpoints for the local backend.
///
/// `base_path` is where raw files are served from; the API endpoints exist
/// only under the dev server and the client falls back to the static
/// manifest when they are absent.
pub fn local_config() -> LocalConfig {
    LocalConfig {
        base_path: trunk_path().to_string(),
        api_directory_url: "/api/directory".to_string(),
        api_tree_url: "/api/tree".to_string(),
        manifest_url: "/file-tree.json".to_string(),
        poll_interval_ms: WATCH_POLL_INTERVAL_MS,
    }
}
