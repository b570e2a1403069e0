//! Explorer-side state types: navigation history and persisted view
//! preferences.

use serde::{Deserialize, Serialize};

use super::file::{SortField, SortOrder, ViewMode};
use crate::core::paths;

// =============================================================================
// NavHistory
// =============================================================================

/// Browser-style navigation history over content paths.
///
/// Starts with the single entry `""` (content root). Invariants after every
/// action: `index < entries.len()` and `current() == entries[index]`.
#[derive(Clone, Debug, PartialEq)]
pub struct NavHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
            index: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Navigate to a new path: drops the forward tail, then appends.
    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Navigate to the parent directory. No-op at the content root.
    pub fn up(&mut self) -> Option<&str> {
        let parent = paths::parent(self.current());
        if parent == self.current() || self.current().is_empty() {
            return None;
        }
        self.push(parent);
        Some(self.current())
    }

    #[inline]
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    #[inline]
    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

impl Default for NavHistory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// View preferences
// =============================================================================

/// The slice of view state persisted across sessions. Navigation, listings,
/// and selection are deliberately session-only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewPrefs {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

fn default_sidebar_open() -> bool {
    true
}

impl ViewPrefs {
    pub fn initial() -> Self {
        Self {
            view_mode: ViewMode::default(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            sidebar_open: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(nav: &NavHistory) {
        assert!(nav.index < nav.entries.len());
        assert_eq!(nav.current(), nav.entries[nav.index]);
    }

    #[test]
    fn starts_at_root() {
        let nav = NavHistory::new();
        assert_eq!(nav.current(), "");
        assert!(!nav.can_go_back());
        assert!(!nav.can_go_forward());
        assert_invariant(&nav);
    }

    #[test]
    fn push_then_back_and_forward() {
        let mut nav = NavHistory::new();
        nav.push("docs");
        nav.push("docs/guide");
        assert_eq!(nav.current(), "docs/guide");

        assert_eq!(nav.back(), Some("docs"));
        assert_eq!(nav.back(), Some(""));
        assert_eq!(nav.back(), None);

        assert_eq!(nav.forward(), Some("docs"));
        assert_eq!(nav.forward(), Some("docs/guide"));
        assert_eq!(nav.forward(), None);
        assert_invariant(&nav);
    }

    #[test]
    fn push_truncates_forward_tail() {
        let mut nav = NavHistory::new();
        nav.push("a");
        nav.push("b");
        nav.back();
        nav.push("c");

        assert_eq!(nav.current(), "c");
        assert!(!nav.can_go_forward());
        assert_eq!(nav.back(), Some("a"));
        assert_invariant(&nav);
    }

    #[test]
    fn up_walks_to_parent_and_stops_at_root() {
        let mut nav = NavHistory::new();
        nav.push("a/b/c");
        assert_eq!(nav.up(), Some("a/b"));
        assert_eq!(nav.up(), Some("a"));
        assert_eq!(nav.up(), Some(""));
        assert_eq!(nav.up(), None);
        // going up is a navigation, so it is replayable with back
        assert_eq!(nav.back(), Some("a"));
        assert_invariant(&nav);
    }

    #[test]
    fn view_prefs_deserialize_with_missing_fields() {
        let prefs: ViewPrefs = serde_json::from_str(r#"{"view_mode": "list"}"#).unwrap();
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.sort_field, SortField::Name);
        assert!(prefs.sidebar_open);
    }
}
