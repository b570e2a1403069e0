//! File grid component for explorer view.
//!
//! Displays the current listing as thumbnail tiles. Thumbnails render
//! lazily per tile; entries without a rendered thumbnail fall back to
//! their kind icon.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::file_list::entry_icon;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::hidden;
use crate::models::FileSystemItem;

stylance::import_crate_style!(css, "src/components/explorer/file_grid.module.css");

#[component]
pub fn FileGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    view! {
        <div class=css::grid role="grid" aria-label="File grid">
            // Keyed by path and revision so a changed file re-renders its tile
            <For
                each=move || state.entries.get()
                key=|entry| format!("{}@{}", entry.path, entry.revision)
                children=move |entry| {
                    view! { <GridTile entry=entry /> }
                }
            />
        </div>
    }
}

#[component]
fn GridTile(entry: FileSystemItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let is_dir = entry.kind.is_dir();
    let is_hidden = hidden::is_hidden(&entry.name, &entry.path);
    let icon = entry_icon(&entry);
    let inaccessible = !entry.is_accessible;
    let access_title = entry.access_error.clone().unwrap_or_default();

    let item_path = entry.path.clone();
    let is_selected = Signal::derive(move || {
        state
            .selected
            .with(|s| s.as_ref().is_some_and(|sel| sel.path == item_path))
    });

    let entry_for_select = entry.clone();
    let handle_click = move |_: leptos::ev::MouseEvent| {
        state.selected.set(Some(entry_for_select.clone()));
    };

    let entry_path_for_nav = entry.path.clone();
    let handle_dblclick = move |_: leptos::ev::MouseEvent| {
        if is_dir {
            state.navigate_to(&entry_path_for_nav);
        }
    };

    // Directories keep their icon. Files reuse a cached thumbnail when one
    // exists and render one in the background otherwise.
    let thumb_view = if is_dir {
        view! { <span class=css::tileIcon><Icon icon=icon /></span> }.into_any()
    } else if let Some(url) = ctx.thumbnails.get_value().cached(&entry) {
        view! { <img class=css::tileImage src=url alt="" /> }.into_any()
    } else {
        let service = ctx.thumbnails.get_value();
        let item = entry.clone();
        let raw_url = entry
            .download_url
            .clone()
            .unwrap_or_else(|| ctx.source().raw_url(&entry.path));

        let thumbnail = LocalResource::new(move || {
            let service = service.clone();
            let item = item.clone();
            let raw_url = raw_url.clone();
            async move { service.thumbnail(&item, &raw_url).await }
        });

        view! {
            <Suspense fallback=move || {
                view! { <span class=css::tileIcon><Icon icon=icon /></span> }
            }>
                {move || {
                    thumbnail.get().map(|rendered| match rendered {
                        Some(url) => {
                            view! { <img class=css::tileImage src=url alt="" /> }.into_any()
                        }
                        None => {
                            view! { <span class=css::tileIcon><Icon icon=icon /></span> }
                                .into_any()
                        }
                    })
                }}
            </Suspense>
        }
        .into_any()
    };

    let tile_class = move || {
        if is_selected.get() {
            format!("{} {}", css::tile, css::tileSelected)
        } else {
            css::tile.to_string()
        }
    };

    let name_class = if is_hidden {
        format!("{} {}", css::tileName, css::tileNameHidden)
    } else {
        css::tileName.to_string()
    };

    let aria_label = if is_dir {
        format!("Folder: {}", entry.name)
    } else {
        format!("File: {}", entry.name)
    };

    view! {
        <div
            class=tile_class
            on:click=handle_click
            on:dblclick=handle_dblclick
            role="gridcell"
            tabindex="0"
            aria-label=aria_label
            aria-selected=move || is_selected.get()
        >
            <div class=css::tileThumb>
                {thumb_view}
                {inaccessible.then(|| view! {
                    <span class=css::tileLock title=access_title.clone()>
                        <Icon icon=ic::LOCK />
                    </span>
                })}
            </div>
            <span class=name_class>{entry.name.clone()}</span>
        </div>
    }
}
