//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer view
//! - [`FileList`] - Column list of files and directories
//! - [`FileGrid`] - Thumbnail grid of files and directories
//! - [`Sidebar`] - Lazily loaded directory tree
//! - [`PreviewPanel`] - Side panel for file preview
//! - [`use_explorer_data`] - Hook wiring listing, tree, and watch effects

#[allow(clippy::module_inception)]
mod explorer;
mod file_grid;
mod file_list;
mod header;
mod hook;
mod pathbar;
mod preview;
mod sidebar;

pub use explorer::Explorer;
pub use file_grid::FileGrid;
pub use file_list::FileList;
pub use header::Header;
pub use hook::use_explorer_data;
pub use pathbar::PathBar;
pub use preview::PreviewPanel;
pub use sidebar::Sidebar;
