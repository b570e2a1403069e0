//! Root application module.
//!
//! Contains the main App component, AppContext definition, ExplorerState,
//! and application-level setup logic following Leptos conventions.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::components::Explorer;
use crate::config::VIEW_PREFS_KEY;
use crate::core::{FileSource, SourceError, ThumbnailService, debug, paths};
use crate::models::{
    FileFilter, FileNode, FileSystemItem, NavHistory, SortField, SortOrder, ViewMode, ViewPrefs,
};
use crate::utils::{dom, storage};

// ============================================================================
// ExplorerState
// ============================================================================

/// Explorer state managed with Leptos signals.
///
/// Listing data, navigation, selection, and view settings each live in
/// their own signal so components subscribe only to what they render.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct ExplorerState {
    /// Browser-style back/forward history over content paths.
    pub history: RwSignal<NavHistory>,
    /// Path of the directory currently listed. `""` is the content root.
    pub current_path: RwSignal<String>,
    /// Listing of the current directory, already filtered and sorted.
    pub entries: RwSignal<Vec<FileSystemItem>>,
    /// Sidebar tree. Directories load their children lazily.
    pub tree: RwSignal<Vec<FileNode>>,
    /// Item selected for preview, if any.
    pub selected: RwSignal<Option<FileSystemItem>>,
    /// True while a listing fetch is in flight.
    pub loading: RwSignal<bool>,
    /// Human-readable reason the last listing fetch failed.
    pub error: RwSignal<Option<String>>,

    // View settings
    pub view_mode: RwSignal<ViewMode>,
    pub sort_field: RwSignal<SortField>,
    pub sort_order: RwSignal<SortOrder>,
    pub search_query: RwSignal<String>,
    pub show_hidden: RwSignal<bool>,
    /// Extension allow-list for the type filter. Empty = all types.
    pub type_filter: RwSignal<Vec<String>>,
    pub sidebar_open: RwSignal<bool>,
    /// Paths of directories expanded in the sidebar tree.
    pub expanded_folders: RwSignal<HashSet<String>>,

    /// Bumped to force a refetch of the current listing.
    pub refresh: RwSignal<u64>,
    /// Label of the backend currently answering requests.
    pub source_label: RwSignal<&'static str>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            history: RwSignal::new(NavHistory::new()),
            current_path: RwSignal::new(String::new()),
            entries: RwSignal::new(Vec::new()),
            tree: RwSignal::new(Vec::new()),
            selected: RwSignal::new(None),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            view_mode: RwSignal::new(ViewMode::default()),
            sort_field: RwSignal::new(SortField::default()),
            sort_order: RwSignal::new(SortOrder::default()),
            search_query: RwSignal::new(String::new()),
            show_hidden: RwSignal::new(false),
            type_filter: RwSignal::new(Vec::new()),
            sidebar_open: RwSignal::new(true),
            expanded_folders: RwSignal::new(HashSet::new()),
            refresh: RwSignal::new(0),
            source_label: RwSignal::new("local"),
        }
    }

    /// Navigate to a directory, recording it in history and dropping any
    /// pending selection.
    pub fn navigate_to(&self, path: impl Into<String>) {
        let path = paths::normalize(&path.into());
        if path == self.current_path.get_untracked() {
            return;
        }
        self.history.update(|h| h.push(path.clone()));
        self.current_path.set(path);
        self.selected.set(None);
    }

    pub fn go_back(&self) {
        let target = self
            .history
            .try_update(|h| h.back().map(str::to_string))
            .flatten();
        if let Some(path) = target {
            self.current_path.set(path);
            self.selected.set(None);
        }
    }

    pub fn go_forward(&self) {
        let target = self
            .history
            .try_update(|h| h.forward().map(str::to_string))
            .flatten();
        if let Some(path) = target {
            self.current_path.set(path);
            self.selected.set(None);
        }
    }

    pub fn go_up(&self) {
        let target = self
            .history
            .try_update(|h| h.up().map(str::to_string))
            .flatten();
        if let Some(path) = target {
            self.current_path.set(path);
            self.selected.set(None);
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history.with(|h| h.can_go_back())
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.with(|h| h.can_go_forward())
    }

    /// Current filter settings as one value. Reads signals, so calling
    /// this inside a reactive scope subscribes to all three.
    pub fn filter(&self) -> FileFilter {
        FileFilter {
            search_query: self.search_query.get(),
            file_types: self.type_filter.get(),
            show_hidden: self.show_hidden.get(),
        }
    }

    pub fn toggle_view_mode(&self) {
        self.view_mode.update(|mode| {
            *mode = match mode {
                ViewMode::List => ViewMode::Grid,
                ViewMode::Grid => ViewMode::List,
            }
        });
    }

    /// Order by `field`; selecting the active field flips the direction.
    pub fn sort_by(&self, field: SortField) {
        if self.sort_field.get_untracked() == field {
            self.sort_order.update(|order| *order = order.flipped());
        } else {
            self.sort_field.set(field);
            self.sort_order.set(SortOrder::Asc);
        }
    }

    /// Force the current listing to refetch, bypassing the cache consumers
    /// may have primed.
    pub fn bump_refresh(&self) {
        self.refresh.update(|n| *n = n.wrapping_add(1));
    }

    pub fn prefs(&self) -> ViewPrefs {
        ViewPrefs {
            view_mode: self.view_mode.get(),
            sort_field: self.sort_field.get(),
            sort_order: self.sort_order.get(),
            sidebar_open: self.sidebar_open.get(),
        }
    }

    pub fn apply_prefs(&self, prefs: ViewPrefs) {
        self.view_mode.set(prefs.view_mode);
        self.sort_field.set(prefs.sort_field);
        self.sort_order.set(prefs.sort_order);
        self.sidebar_open.set(prefs.sidebar_open);
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Architecture
///
/// The [`AppContext`] separates concerns into independent domains:
/// - **Explorer state**: Listing, navigation, selection, view settings
/// - **File source**: The backend answering listing and content requests
/// - **Thumbnails**: Canvas renderer shared by every grid tile
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Explorer state (listing, navigation, selection).
    pub explorer: ExplorerState,

    /// The configured file backend. Stored rather than signal-wrapped:
    /// the backend never changes after startup, only its internal caches
    /// do.
    pub source: StoredValue<FileSource, LocalStorage>,

    /// Shared thumbnail renderer for the grid view.
    pub thumbnails: StoredValue<ThumbnailService, LocalStorage>,

    /// Whether the diagnostic log panel is open.
    pub debug_open: RwSignal<bool>,
}

impl AppContext {
    pub fn new(source: FileSource) -> Self {
        Self {
            explorer: ExplorerState::new(),
            source: StoredValue::new_local(source),
            thumbnails: StoredValue::new_local(ThumbnailService::new()),
            debug_open: RwSignal::new(false),
        }
    }

    /// The configured backend. Cheap; sources clone by reference count.
    pub fn source(&self) -> FileSource {
        self.source.get_value()
    }
}

/// Build the context and wire up persistence, then hand off to the
/// explorer view. Failing to construct a backend surfaces through the
/// surrounding [`ErrorBoundary`].
fn init_app() -> Result<AnyView, SourceError> {
    let source = FileSource::from_config()?;
    let ctx = AppContext::new(source);
    provide_context(ctx);

    debug::restore_persisted();
    if let Some(prefs) = storage::get::<ViewPrefs>(VIEW_PREFS_KEY) {
        ctx.explorer.apply_prefs(prefs);
    }

    // Persist view settings whenever one of them changes.
    Effect::new(move |_| {
        let prefs = ctx.explorer.prefs();
        if let Err(err) = storage::set(VIEW_PREFS_KEY, &prefs) {
            debug::warn("prefs", format!("failed to persist view prefs: {err}"));
        }
    });

    Ok(view! { <Explorer /> }.into_any())
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the main Explorer component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #0a0e27;
                    color: #e0e0e0;
                    font-family: 'Courier New', monospace;
                ">
                    <div style="
                        max-width: 600px;
                        text-align: center;
                    ">
                        <h1 style="color: #ff6b6b; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #a0a0a0; margin-bottom: 2rem;">
                            "The explorer could not start. Reloading usually recovers it; clearing saved data helps when stale preferences are the cause."
                        </p>
                        <details style="
                            text-align: left;
                            background: #151a35;
                            padding: 1rem;
                            border-radius: 4px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #6c7a89;">
                                "Error details"
                            </summary>
                            <ul style="
                                margin: 1rem 0 0 0;
                                padding-left: 1.5rem;
                                color: #ff6b6b;
                                font-size: 0.9rem;
                            ">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <div style="display: flex; gap: 0.75rem; justify-content: center;">
                            <button
                                on:click=move |_| {
                                    if let Some(window) = web_sys::window() {
                                        let _ = window.location().reload();
                                    }
                                }
                                style="
                                    background: #4a90e2;
                                    color: white;
                                    border: none;
                                    padding: 0.75rem 1.5rem;
                                    border-radius: 4px;
                                    cursor: pointer;
                                    font-family: 'Courier New', monospace;
                                    font-size: 1rem;
                                "
                            >
                                "Reload Page"
                            </button>
                            <button
                                on:click=move |_| {
                                    if let Some(storage) = dom::local_storage() {
                                        let _ = storage.clear();
                                    }
                                    if let Some(window) = web_sys::window() {
                                        let _ = window.location().reload();
                                    }
                                }
                                style="
                                    background: #151a35;
                                    color: #e0e0e0;
                                    border: 1px solid #2a3166;
                                    padding: 0.75rem 1.5rem;
                                    border-radius: 4px;
                                    cursor: pointer;
                                    font-family: 'Courier New', monospace;
                                    font-size: 1rem;
                                "
                            >
                                "Clear Data and Reload"
                            </button>
                            <button
                                on:click=move |_| {
                                    let json = debug::export_json();
                                    dom::download_text("explorer-log.json", &json, "application/json");
                                }
                                style="
                                    background: #151a35;
                                    color: #e0e0e0;
                                    border: 1px solid #2a3166;
                                    padding: 0.75rem 1.5rem;
                                    border-radius: 4px;
                                    cursor: pointer;
                                    font-family: 'Courier New', monospace;
                                    font-size: 1rem;
                                "
                            >
                                "Export Logs"
                            </button>
                        </div>
                    </div>
                </div>
            }
        >
            {init_app()}
        </ErrorBoundary>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keeps_history_and_path_in_step() {
        let state = ExplorerState::new();
        state.navigate_to("docs");
        state.navigate_to("docs/guide");
        assert_eq!(state.current_path.get_untracked(), "docs/guide");
        assert!(state.can_go_back());

        state.go_back();
        assert_eq!(state.current_path.get_untracked(), "docs");
        assert!(state.can_go_forward());

        state.go_forward();
        assert_eq!(state.current_path.get_untracked(), "docs/guide");

        state.go_up();
        assert_eq!(state.current_path.get_untracked(), "docs");
    }

    #[test]
    fn navigating_to_the_current_path_is_a_noop() {
        let state = ExplorerState::new();
        state.navigate_to("docs");
        state.navigate_to("docs/");
        assert!(!state.can_go_forward());
        state.go_back();
        // a second entry for the same path was not recorded
        assert_eq!(state.current_path.get_untracked(), "");
        assert!(!state.can_go_back());
    }

    #[test]
    fn navigation_clears_the_selection() {
        let state = ExplorerState::new();
        state.selected.set(Some(crate::models::FileSystemItem {
            name: "a.txt".to_string(),
            path: "a.txt".to_string(),
            kind: crate::models::EntryKind::File,
            size: Some(1),
            revision: "r".to_string(),
            source_url: String::new(),
            download_url: None,
            is_accessible: true,
            access_error: None,
        }));
        state.navigate_to("docs");
        assert!(state.selected.get_untracked().is_none());
    }

    #[test]
    fn sorting_by_the_active_field_flips_direction() {
        let state = ExplorerState::new();
        assert_eq!(state.sort_field.get_untracked(), SortField::Name);
        assert_eq!(state.sort_order.get_untracked(), SortOrder::Asc);

        state.sort_by(SortField::Name);
        assert_eq!(state.sort_order.get_untracked(), SortOrder::Desc);

        state.sort_by(SortField::Size);
        assert_eq!(state.sort_field.get_untracked(), SortField::Size);
        assert_eq!(state.sort_order.get_untracked(), SortOrder::Asc);
    }

    #[test]
    fn prefs_round_trip_through_the_state() {
        let state = ExplorerState::new();
        state.apply_prefs(ViewPrefs {
            view_mode: ViewMode::List,
            sort_field: SortField::Size,
            sort_order: SortOrder::Desc,
            sidebar_open: false,
        });
        let prefs = state.prefs();
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.sort_field, SortField::Size);
        assert_eq!(prefs.sort_order, SortOrder::Desc);
        assert!(!prefs.sidebar_open);
    }
}
