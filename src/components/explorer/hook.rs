//! Data-loading hook for the explorer.
//!
//! Wires listing, tree, and change-watch effects onto the shared state.
//! Call once from the Explorer root; every other component only reads the
//! signals this hook keeps fresh.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::{WatchHandle, debug, listing};

/// Orchestrates data loading for the explorer.
///
/// Three effects:
/// 1. **Listing**: refetches when the path, filter, sort, or refresh
///    counter changes. A generation counter drops responses that were
///    superseded while in flight, so a slow fetch can never overwrite a
///    newer one.
/// 2. **Tree**: loads once; a failure re-arms the load so the next
///    navigation or refresh retries it.
/// 3. **Watch**: keeps at most one change subscription, re-registered on
///    navigation and torn down with the component.
pub fn use_explorer_data() {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    // Listing effect.
    let generation = Rc::new(Cell::new(0u64));
    Effect::new({
        let generation = generation.clone();
        move |_| {
            let path = state.current_path.get();
            let filter = state.filter();
            let field = state.sort_field.get();
            let order = state.sort_order.get();
            let _ = state.refresh.get();

            generation.set(generation.get() + 1);
            let my_generation = generation.get();
            let generation = generation.clone();

            state.loading.set(true);
            state.error.set(None);

            let source = ctx.source();
            spawn_local(async move {
                let result = source.directory_contents(&path).await;
                // a newer request owns the state now
                if generation.get() != my_generation {
                    debug::debug("explorer", format!("dropping stale listing for {path:?}"));
                    return;
                }
                match result {
                    Ok(items) => {
                        let total = items.len();
                        let prepared = listing::prepare(items, &filter, field, order);
                        debug::info(
                            "explorer",
                            format!("listed {path:?}: {} of {total} items shown", prepared.len()),
                        );
                        state.entries.set(prepared);
                    }
                    Err(err) => {
                        debug::error("explorer", format!("listing {path:?} failed: {err}"));
                        state.entries.set(Vec::new());
                        state.error.set(Some(err.to_string()));
                    }
                }
                if state.source_label.get_untracked() != source.label() {
                    state.source_label.set(source.label());
                }
                state.loading.set(false);
            });
        }
    });

    // Tree effect. Loads once, re-armed by failure.
    let tree_loaded = Rc::new(Cell::new(false));
    Effect::new({
        let tree_loaded = tree_loaded.clone();
        move |_| {
            let _ = state.current_path.get();
            let _ = state.refresh.get();
            if tree_loaded.get() {
                return;
            }
            tree_loaded.set(true);

            let tree_loaded = tree_loaded.clone();
            let source = ctx.source();
            spawn_local(async move {
                match source.full_tree().await {
                    Ok(nodes) => {
                        debug::info(
                            "explorer",
                            format!("tree loaded: {} top-level nodes", nodes.len()),
                        );
                        state.tree.set(nodes);
                    }
                    Err(err) => {
                        tree_loaded.set(false);
                        debug::error("explorer", format!("tree load failed: {err}"));
                    }
                }
            });
        }
    });

    // Watch effect. The label dependency re-evaluates the subscription
    // once backend detection settles, so a poll started against an absent
    // API gets torn down instead of failing every tick.
    let active_watch: StoredValue<Option<WatchHandle>, LocalStorage> =
        StoredValue::new_local(None);
    Effect::new(move |_| {
        let path = state.current_path.get();
        let _ = state.source_label.get();

        let handle = ctx
            .source()
            .watch_directory(&path, Rc::new(move || state.bump_refresh()));
        active_watch.update_value(|slot| {
            if let Some(previous) = slot.take() {
                previous.cancel();
            }
            *slot = handle;
        });
    });

    on_cleanup(move || {
        active_watch.update_value(|slot| {
            if let Some(previous) = slot.take() {
                previous.cancel();
            }
        });
        ctx.source().unwatch_all();
    });
}
