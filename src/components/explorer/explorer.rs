//! Main explorer component.
//!
//! ## Layout
//!
//! Header on top; sidebar, file area, and preview panel side by side in
//! the body; path bar and status bar at the bottom. The diagnostic panel
//! overlays the lot when open.

use leptos::prelude::*;

use super::{FileGrid, FileList, Header, PathBar, PreviewPanel, Sidebar, use_explorer_data};
use crate::app::AppContext;
use crate::components::debug::DebugPanel;
use crate::components::status::StatusBar;
use crate::models::ViewMode;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // All data loading hangs off this one call.
    use_explorer_data();

    let has_selection = Signal::derive(move || ctx.explorer.selected.get().is_some());
    let sidebar_open = ctx.explorer.sidebar_open;
    let view_mode = ctx.explorer.view_mode;
    let loading = ctx.explorer.loading;
    let error = ctx.explorer.error;
    let entries = ctx.explorer.entries;

    let filter_active = Signal::derive(move || {
        !ctx.explorer.search_query.with(|q| q.is_empty())
            || !ctx.explorer.type_filter.with(|t| t.is_empty())
    });

    let retry = move |_: leptos::ev::MouseEvent| {
        let path = ctx.explorer.current_path.get_untracked();
        ctx.source().invalidate_cache(&path);
        ctx.explorer.bump_refresh();
    };

    view! {
        <div class=css::explorer>
            <Header />

            <div class=css::body>
                <Show when=move || sidebar_open.get()>
                    <Sidebar />
                </Show>

                // File area: list or grid, with loading/error/empty states
                <div class=move || {
                    if has_selection.get() {
                        format!("{} {}", css::filePane, css::filePaneWithPreview)
                    } else {
                        css::filePane.to_string()
                    }
                }>
                    {move || {
                        if loading.get() {
                            view! { <div class=css::loading>"Loading..."</div> }.into_any()
                        } else if let Some(message) = error.get() {
                            view! {
                                <div class=css::error>
                                    <p class=css::errorTitle>"Could not load this directory"</p>
                                    <p class=css::errorDetail>{message}</p>
                                    <button class=css::retryButton on:click=retry>
                                        "Retry"
                                    </button>
                                </div>
                            }
                            .into_any()
                        } else if entries.with(|e| e.is_empty()) {
                            view! {
                                <div class=css::empty>
                                    <p>{move || {
                                        if filter_active.get() {
                                            "No items match the current filter"
                                        } else {
                                            "This folder is empty"
                                        }
                                    }}</p>
                                </div>
                            }
                            .into_any()
                        } else {
                            match view_mode.get() {
                                ViewMode::List => view! { <FileList /> }.into_any(),
                                ViewMode::Grid => view! { <FileGrid /> }.into_any(),
                            }
                        }
                    }}
                </div>

                // Preview panel (only while something is selected)
                <Show when=move || has_selection.get()>
                    <PreviewPanel />
                </Show>
            </div>

            <PathBar />
            <StatusBar />

            <Show when=move || ctx.debug_open.get()>
                <DebugPanel />
            </Show>
        </div>
    }
}
