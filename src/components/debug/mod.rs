//! Diagnostic log panel.
//!
//! Overlays the explorer with the recent data-layer log and offers
//! export and clear actions. Toggled from the header.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::debug::{self, LogLevel};
use crate::utils::dom;
use crate::utils::format::format_clock;

stylance::import_crate_style!(css, "src/components/debug/debug.module.css");

fn level_class(level: LogLevel) -> String {
    let modifier = match level {
        LogLevel::Debug => css::levelDebug,
        LogLevel::Info => css::levelInfo,
        LogLevel::Warn => css::levelWarn,
        LogLevel::Error => css::levelError,
    };
    format!("{} {}", css::level, modifier)
}

#[component]
pub fn DebugPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let snapshot = RwSignal::new(debug::entries());

    // The log is plain thread-local state, so the open panel polls it.
    let poll = StoredValue::new_local(Some(Interval::new(1000, move || {
        let fresh = debug::entries();
        let changed = snapshot.with_untracked(|old| {
            old.len() != fresh.len()
                || old.last().map(|e| e.seq) != fresh.last().map(|e| e.seq)
        });
        if changed {
            snapshot.set(fresh);
        }
    })));
    on_cleanup(move || {
        poll.update_value(|slot| {
            slot.take();
        });
    });

    let on_export = move |_: leptos::ev::MouseEvent| {
        let json = debug::export_json();
        if !dom::download_text("explorer-log.json", &json, "application/json") {
            debug::warn("debug", "log export failed");
        }
    };

    let on_clear = move |_: leptos::ev::MouseEvent| {
        debug::clear();
        snapshot.set(Vec::new());
    };

    let on_close = move |_: leptos::ev::MouseEvent| {
        ctx.debug_open.set(false);
    };

    view! {
        <div class=css::panel role="log" aria-label="Diagnostic log">
            <header class=css::header>
                <span class=css::title>
                    <Icon icon=ic::BUG />
                    "Diagnostic Log"
                </span>
                <span class=css::count>
                    {move || snapshot.with(|s| format!("{} entries", s.len()))}
                </span>
                <div class=css::actions>
                    <button class=css::actionButton on:click=on_export title="Export log as JSON">
                        <Icon icon=ic::DOWNLOAD />
                    </button>
                    <button class=css::actionButton on:click=on_clear title="Clear log">
                        <Icon icon=ic::TRASH />
                    </button>
                    <button class=css::actionButton on:click=on_close title="Close panel">
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            </header>

            <div class=css::entries>
                <Show when=move || snapshot.with(|s| s.is_empty())>
                    <div class=css::empty>"No log entries"</div>
                </Show>
                // Newest first
                <For
                    each=move || {
                        let mut entries = snapshot.get();
                        entries.reverse();
                        entries
                    }
                    key=|entry| entry.seq
                    children=move |entry| {
                        view! {
                            <div class=css::entry>
                                <span class=css::time>{format_clock(entry.timestamp)}</span>
                                <span class=level_class(entry.level)>{entry.level.label()}</span>
                                <span class=css::category>{entry.category.clone()}</span>
                                <span class=css::message>{entry.message.clone()}</span>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
