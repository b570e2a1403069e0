//! Utility modules for web, DOM, and data structure operations.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity buffer backing the in-app log
//! - [`fetch::fetch_json`] and friends - Network fetching with timeout
//! - [`markdown_to_html`] - Markdown rendering with XSS sanitization
//! - [`storage`] - Typed localStorage helpers

pub mod dom;
pub mod fetch;
pub mod format;
pub mod markdown;
mod ring_buffer;
pub mod storage;

pub use markdown::{markdown_to_html, source_to_html};
pub use ring_buffer::RingBuffer;
