//! Navigation sidebar with a lazily loaded directory tree.
//!
//! The tree signal holds whatever the backend returned; hidden entries are
//! pruned at render time so toggling their visibility never refetches.
//! Unloaded directories fetch their children on first expansion.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use super::file_list::entry_icon;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::{debug, listing};
use crate::models::FileNode;

stylance::import_crate_style!(css, "src/components/explorer/sidebar.module.css");

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;
    let expanded = state.expanded_folders;

    let visible = Memo::new(move |_| {
        let nodes = state.tree.get();
        if state.show_hidden.get() {
            nodes
        } else {
            listing::prune_hidden(nodes)
        }
    });

    let root_class = move || {
        if state.current_path.with(|p| p.is_empty()) {
            format!("{} {}", css::nodeButton, css::nodeButtonActive)
        } else {
            css::nodeButton.to_string()
        }
    };

    view! {
        <aside class=css::sidebar aria-label="Directory tree">
            <div class=css::sidebarTitle>"Files"</div>
            <div class=css::tree>
                <div class=css::treeItem>
                    <span class=css::chevronSpacer></span>
                    <button class=root_class on:click=move |_| state.navigate_to("")>
                        <span class=css::nodeIcon><Icon icon=ic::HOME /></span>
                        <span class=css::nodeName>"Home"</span>
                    </button>
                </div>
                // The whole tree re-renders on any change; trees stay small
                // enough that diffing per node buys nothing.
                {move || {
                    visible
                        .get()
                        .iter()
                        .map(|node| render_node(node, 1, expanded, ctx))
                        .collect_view()
                }}
            </div>
        </aside>
    }
}

/// Render one tree node and, when expanded, its subtree.
fn render_node(
    node: &FileNode,
    depth: usize,
    expanded: RwSignal<HashSet<String>>,
    ctx: AppContext,
) -> AnyView {
    let state = ctx.explorer;
    let item = node.item.clone();
    let path = item.path.clone();
    let is_dir = node.is_dir();
    let loaded = node.children_loaded;

    let is_expanded = is_dir && expanded.with(|set| set.contains(&path));
    let is_active = state.current_path.with(|p| *p == path);

    let node_icon = if is_dir {
        if is_expanded { ic::FOLDER_OPEN } else { ic::FOLDER }
    } else {
        entry_icon(&item)
    };

    let toggle_path = path.clone();
    let on_toggle = move |_: leptos::ev::MouseEvent| {
        let was_expanded = expanded.with_untracked(|set| set.contains(&toggle_path));
        if was_expanded {
            expanded.update(|set| {
                set.remove(&toggle_path);
            });
        } else {
            expanded.update(|set| {
                set.insert(toggle_path.clone());
            });
            if !loaded {
                load_children(ctx, expanded, toggle_path.clone());
            }
        }
    };

    let activate_path = path.clone();
    let activate_item = item.clone();
    let on_activate = move |_: leptos::ev::MouseEvent| {
        if is_dir {
            state.navigate_to(&activate_path);
            let already = expanded.with_untracked(|set| set.contains(&activate_path));
            if !already {
                expanded.update(|set| {
                    set.insert(activate_path.clone());
                });
                if !loaded {
                    load_children(ctx, expanded, activate_path.clone());
                }
            }
        } else {
            state.selected.set(Some(activate_item.clone()));
        }
    };

    let button_class = if is_active {
        format!("{} {}", css::nodeButton, css::nodeButtonActive)
    } else {
        css::nodeButton.to_string()
    };

    let chevron = if is_dir {
        let chevron_icon = if is_expanded {
            ic::CHEVRON_DOWN
        } else {
            ic::CHEVRON_RIGHT
        };
        view! {
            <button
                class=css::chevron
                on:click=on_toggle
                aria-label=if is_expanded { "Collapse" } else { "Expand" }
            >
                <Icon icon=chevron_icon />
            </button>
        }
        .into_any()
    } else {
        view! { <span class=css::chevronSpacer></span> }.into_any()
    };

    let subtree = is_expanded.then(|| {
        if !loaded {
            view! { <div class=css::treeLoading>"Loading..."</div> }.into_any()
        } else {
            node.children
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .map(|child| render_node(child, depth + 1, expanded, ctx))
                .collect_view()
                .into_any()
        }
    });

    view! {
        <div class=css::treeItem style=format!("padding-left: {}px", depth * 14)>
            {chevron}
            <button class=button_class on:click=on_activate aria-expanded=is_expanded>
                <span class=css::nodeIcon><Icon icon=node_icon /></span>
                <span class=css::nodeName>{item.name.clone()}</span>
            </button>
        </div>
        {subtree}
    }
    .into_any()
}

/// Fetch children for a directory expanded before its subtree was loaded.
fn load_children(ctx: AppContext, expanded: RwSignal<HashSet<String>>, path: String) {
    spawn_local(async move {
        match ctx.source().directory_contents(&path).await {
            Ok(items) => {
                let children = listing::nodes_from_listing(&items);
                ctx.explorer.tree.update(|nodes| {
                    // The tree can be replaced while the fetch is in flight
                    if !listing::attach_children(nodes, &path, children) {
                        debug::warn("tree", format!("no node at {path:?} to attach children to"));
                    }
                });
            }
            Err(err) => {
                debug::error("tree", format!("failed to load children of {path:?}: {err}"));
                expanded.update(|set| {
                    set.remove(&path);
                });
            }
        }
    });
}
