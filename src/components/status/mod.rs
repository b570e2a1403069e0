//! Status bar component.
//!
//! Displays listing counts, the current selection, and the active data
//! source at the bottom of the explorer.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::utils::format::{format_count, format_size};

stylance::import_crate_style!(css, "src/components/status/status.module.css");

#[component]
pub fn StatusBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let counts = Signal::derive(move || {
        state.entries.with(|entries| {
            let dirs = entries.iter().filter(|e| e.kind.is_dir()).count();
            let files = entries.len() - dirs;
            format!(
                "{}, {}",
                format_count(dirs, "folder"),
                format_count(files, "file")
            )
        })
    });

    let selection = Signal::derive(move || {
        state.selected.with(|sel| {
            sel.as_ref()
                .map(|item| format!("{} ({})", item.name, format_size(item.size)))
        })
    });

    view! {
        <footer class=css::bar>
            <div class=css::section>
                <span class=css::label>
                    <span class=css::value>{counts}</span>
                </span>

                {move || selection.get().map(|text| view! {
                    <span class=css::labelAccent>
                        <span class=css::value>{text}</span>
                    </span>
                })}

                <Show when=move || state.show_hidden.get()>
                    <span class=css::labelMuted>
                        <span class=css::labelIcon><Icon icon=ic::EYE /></span>
                        <span class=css::value>"hidden shown"</span>
                    </span>
                </Show>
            </div>

            <div class=css::section>
                <Show when=move || state.loading.get()>
                    <span class=css::labelMuted>
                        <span class=css::labelIcon><Icon icon=ic::REFRESH /></span>
                        <span class=css::value>"loading"</span>
                    </span>
                </Show>

                {move || state.error.get().map(|_| view! {
                    <span class=css::labelError>
                        <span class=css::labelIcon><Icon icon=ic::WARNING /></span>
                        <span class=css::value>"error"</span>
                    </span>
                })}

                // Which backend is serving the listing
                <span class=css::labelSource title="Active data source">
                    <span class=css::labelIcon>
                        {move || {
                            if state.source_label.get() == "github" {
                                view! { <Icon icon=ic::CLOUD /> }.into_any()
                            } else {
                                view! { <Icon icon=ic::HARD_DRIVE /> }.into_any()
                            }
                        }}
                    </span>
                    <span class=css::value>{move || state.source_label.get()}</span>
                </span>
            </div>
        </footer>
    }
}
