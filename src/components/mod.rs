//! UI components built with Leptos.
//!
//! - [`Explorer`] - File browser UI (main entry point)
//! - [`icons`] - Centralized icon definitions
//! - [`status`] - Status bar showing listing and source info
//! - [`debug`] - Diagnostic log panel

pub mod debug;
pub mod explorer;
pub mod icons;
pub mod status;

pub use explorer::Explorer;
