//! Explorer header component.
//!
//! Contains navigation buttons, current location title, the search box,
//! and view action buttons.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::paths;
use crate::models::{SortField, SortOrder, ViewMode};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// Explorer header with navigation and actions.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let at_root = Signal::derive(move || state.current_path.with(|p| p.is_empty()));

    // Last path segment names the current location
    let current_name = Memo::new(move |_| {
        let path = state.current_path.get();
        if path.is_empty() {
            "Home".to_string()
        } else {
            paths::file_name(&path)
        }
    });

    view! {
        <header class=css::header>
            <NavButtons />

            // Current location title (center)
            <div class=css::title>
                <span class=css::titleIcon>
                    {move || {
                        if at_root.get() {
                            view! { <Icon icon=ic::HOME /> }.into_any()
                        } else {
                            view! { <Icon icon=ic::FOLDER /> }.into_any()
                        }
                    }}
                </span>
                <span class=css::titleLabel>{move || current_name.get()}</span>
            </div>

            <SearchBox />
            <ActionButtons />
        </header>
    }
}

/// Navigation buttons (back, forward, up, home).
#[component]
fn NavButtons() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let can_back = Signal::derive(move || state.history.with(|h| h.can_go_back()));
    let can_forward = Signal::derive(move || state.history.with(|h| h.can_go_forward()));
    let at_root = Signal::derive(move || state.current_path.with(|p| p.is_empty()));

    view! {
        <div class=css::navButtons>
            <button
                class=move || nav_button_class(!can_back.get())
                on:click=move |_| state.go_back()
                disabled=move || !can_back.get()
                title="Go back"
            >
                <Icon icon=ic::CHEVRON_LEFT />
            </button>
            <button
                class=move || nav_button_class(!can_forward.get())
                on:click=move |_| state.go_forward()
                disabled=move || !can_forward.get()
                title="Go forward"
            >
                <Icon icon=ic::CHEVRON_RIGHT />
            </button>
            <button
                class=move || nav_button_class(at_root.get())
                on:click=move |_| state.go_up()
                disabled=move || at_root.get()
                title="Go to parent directory"
            >
                <Icon icon=ic::ARROW_UP />
            </button>
            <button
                class=move || nav_button_class(at_root.get())
                on:click=move |_| state.navigate_to("")
                disabled=move || at_root.get()
                title="Go to root"
            >
                <Icon icon=ic::HOME />
            </button>
        </div>
    }
}

fn nav_button_class(disabled: bool) -> String {
    if disabled {
        format!("{} {}", css::navButton, css::navButtonDisabled)
    } else {
        css::navButton.to_string()
    }
}

/// Name filter input.
#[component]
fn SearchBox() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    view! {
        <div class=css::searchBox>
            <span class=css::searchIcon><Icon icon=ic::SEARCH /></span>
            <input
                type="text"
                class=css::searchInput
                placeholder="Filter by name"
                prop:value=move || state.search_query.get()
                on:input=move |ev| state.search_query.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Action buttons (view toggle, hidden toggle, sort, refresh, panels).
#[component]
fn ActionButtons() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let (sort_menu_open, set_sort_menu_open) = signal(false);

    let on_view_toggle = move |_: leptos::ev::MouseEvent| {
        state.toggle_view_mode();
    };

    let on_hidden_toggle = move |_: leptos::ev::MouseEvent| {
        state.show_hidden.update(|v| *v = !*v);
    };

    let on_refresh = move |_: leptos::ev::MouseEvent| {
        let path = state.current_path.get_untracked();
        ctx.source().invalidate_cache(&path);
        state.bump_refresh();
    };

    let on_sidebar_toggle = move |_: leptos::ev::MouseEvent| {
        state.sidebar_open.update(|v| *v = !*v);
    };

    let on_debug_toggle = move |_: leptos::ev::MouseEvent| {
        ctx.debug_open.update(|v| *v = !*v);
    };

    view! {
        <div class=css::actionButtons>
            <button
                class=move || action_button_class(state.sidebar_open.get())
                on:click=on_sidebar_toggle
                title="Toggle sidebar"
            >
                <Icon icon=ic::SIDEBAR />
            </button>

            <button
                class=css::actionButton
                on:click=on_view_toggle
                title="Toggle view"
            >
                {move || match state.view_mode.get() {
                    ViewMode::List => view! { <Icon icon=ic::GRID /> }.into_any(),
                    ViewMode::Grid => view! { <Icon icon=ic::LIST /> }.into_any(),
                }}
            </button>

            <button
                class=move || action_button_class(state.show_hidden.get())
                on:click=on_hidden_toggle
                title="Toggle hidden files"
            >
                {move || {
                    if state.show_hidden.get() {
                        view! { <Icon icon=ic::EYE /> }.into_any()
                    } else {
                        view! { <Icon icon=ic::EYE_OFF /> }.into_any()
                    }
                }}
            </button>

            <SortMenu menu_open=sort_menu_open set_menu_open=set_sort_menu_open />

            <button class=css::actionButton on:click=on_refresh title="Refresh">
                <Icon icon=ic::REFRESH />
            </button>

            <button
                class=move || action_button_class(ctx.debug_open.get())
                on:click=on_debug_toggle
                title="Toggle diagnostic log"
            >
                <Icon icon=ic::BUG />
            </button>
        </div>
    }
}

fn action_button_class(active: bool) -> String {
    if active {
        format!("{} {}", css::actionButton, css::actionButtonActive)
    } else {
        css::actionButton.to_string()
    }
}

/// Sort field dropdown.
#[component]
fn SortMenu(menu_open: ReadSignal<bool>, set_menu_open: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    // Close the menu when focus leaves the dropdown wrapper.
    let on_focusout = move |event: web_sys::FocusEvent| {
        if let Some(related) = event.related_target() {
            if let Some(current) = event.current_target() {
                use wasm_bindgen::JsCast;
                if let (Some(wrapper), Some(target)) = (
                    current.dyn_ref::<web_sys::Node>(),
                    related.dyn_ref::<web_sys::Node>(),
                ) && !wrapper.contains(Some(target))
                {
                    set_menu_open.set(false);
                }
            }
        } else {
            set_menu_open.set(false);
        }
    };

    let sort_item = move |field: SortField| {
        let active = Signal::derive(move || state.sort_field.get() == field);
        let order = state.sort_order;
        view! {
            <button
                class=move || {
                    if active.get() {
                        format!("{} {}", css::dropdownItem, css::dropdownItemActive)
                    } else {
                        css::dropdownItem.to_string()
                    }
                }
                on:click=move |_| {
                    set_menu_open.set(false);
                    state.sort_by(field);
                }
            >
                <span class=css::dropdownIcon>
                    {move || {
                        if !active.get() {
                            ().into_any()
                        } else if order.get() == SortOrder::Asc {
                            view! { <Icon icon=ic::CHEVRON_UP /> }.into_any()
                        } else {
                            view! { <Icon icon=ic::CHEVRON_DOWN /> }.into_any()
                        }
                    }}
                </span>
                {field.label()}
            </button>
        }
    };

    view! {
        <div class=css::dropdownWrapper on:focusout=on_focusout>
            <button
                class=css::actionButton
                on:click=move |_| set_menu_open.update(|v| *v = !*v)
                title="Sort by"
            >
                <Icon icon=ic::MORE />
            </button>
            <Show when=move || menu_open.get()>
                <div class=css::dropdownMenu>
                    {sort_item(SortField::Name)}
                    {sort_item(SortField::Size)}
                    {sort_item(SortField::Kind)}
                </div>
            </Show>
        </div>
    }
}
