//! In-app diagnostic log.
//!
//! Keeps a bounded history of what the data layer did (source transitions,
//! cache hits, watcher ticks, fetch failures) so problems can be inspected
//! from the debug panel without a devtools session. Entries mirror to the
//! browser console, and the tail of the log survives reloads through
//! localStorage.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::config;
use crate::core::cache::now_ms;
use crate::utils::RingBuffer;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub seq: u64,
    /// Epoch milliseconds at record time.
    pub timestamp: f64,
    pub level: LogLevel,
    pub category: String,
    pub message: String,
}

struct LogState {
    buffer: RingBuffer<LogEntry>,
    next_seq: u64,
}

thread_local! {
    static LOG: RefCell<LogState> = RefCell::new(LogState {
        buffer: RingBuffer::new(config::log::MAX_ENTRIES),
        next_seq: 0,
    });
}

/// Record an entry at the given level.
pub fn log(level: LogLevel, category: &str, message: impl Into<String>) {
    let message = message.into();

    #[cfg(target_arch = "wasm32")]
    console_mirror(level, category, &message);

    LOG.with(|log| {
        let mut state = log.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.buffer.push(LogEntry {
            seq,
            timestamp: now_ms(),
            level,
            category: category.to_string(),
            message,
        });
    });

    // Only problems are worth persisting across a reload.
    #[cfg(target_arch = "wasm32")]
    if matches!(level, LogLevel::Warn | LogLevel::Error) {
        persist_tail();
    }
}

pub fn debug(category: &str, message: impl Into<String>) {
    log(LogLevel::Debug, category, message);
}

pub fn info(category: &str, message: impl Into<String>) {
    log(LogLevel::Info, category, message);
}

pub fn warn(category: &str, message: impl Into<String>) {
    log(LogLevel::Warn, category, message);
}

pub fn error(category: &str, message: impl Into<String>) {
    log(LogLevel::Error, category, message);
}

/// Snapshot of the current log, oldest first.
pub fn entries() -> Vec<LogEntry> {
    LOG.with(|log| log.borrow().buffer.to_vec())
}

/// Drop all entries, including the persisted tail.
pub fn clear() {
    LOG.with(|log| log.borrow_mut().buffer.clear());
    #[cfg(target_arch = "wasm32")]
    crate::utils::storage::remove(config::log::STORAGE_KEY);
}

/// Serialize the log for download.
pub fn export_json() -> String {
    serde_json::to_string_pretty(&entries()).unwrap_or_else(|_| "[]".to_string())
}

/// Reload the persisted tail from a previous session into the buffer.
///
/// Call once at startup, before anything logs.
pub fn restore_persisted() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(tail) = crate::utils::storage::get::<Vec<LogEntry>>(config::log::STORAGE_KEY)
        else {
            return;
        };
        LOG.with(|log| {
            let mut state = log.borrow_mut();
            for entry in tail {
                state.next_seq = state.next_seq.max(entry.seq + 1);
                state.buffer.push(entry);
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn console_mirror(level: LogLevel, category: &str, message: &str) {
    let line = format!("[{category}] {message}");
    let value = wasm_bindgen::JsValue::from_str(&line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::log_1(&value),
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Error => web_sys::console::error_1(&value),
    }
}

#[cfg(target_arch = "wasm32")]
fn persist_tail() {
    let all = entries();
    let start = all.len().saturating_sub(config::log::PERSISTED_ENTRIES);
    let _ = crate::utils::storage::set(config::log::STORAGE_KEY, &all[start..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test runs on its own thread, so every test sees a fresh log.

    #[test]
    fn records_entries_in_order() {
        info("test", "first");
        warn("test", "second");
        let all = entries();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "first");
        assert_eq!(all[1].message, "second");
        assert!(all[0].seq < all[1].seq);
        assert_eq!(all[1].level, LogLevel::Warn);
    }

    #[test]
    fn buffer_is_bounded() {
        for i in 0..(config::log::MAX_ENTRIES + 10) {
            debug("loop", format!("entry {i}"));
        }
        let all = entries();
        assert_eq!(all.len(), config::log::MAX_ENTRIES);
        assert_eq!(all[0].message, "entry 10");
    }

    #[test]
    fn clear_empties_the_buffer() {
        error("test", "boom");
        clear();
        assert!(entries().is_empty());
    }

    #[test]
    fn export_round_trips_through_json() {
        info("export", "hello");
        let json = export_json();
        let parsed: Vec<LogEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].category, "export");
        assert_eq!(parsed[0].level, LogLevel::Info);
    }

    #[test]
    fn levels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
        assert_eq!(LogLevel::Error.label(), "error");
    }
}
