//! Path bar component (macOS Finder style).
//!
//! Displays the current path at the bottom of the explorer with clickable
//! segments.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::paths;

stylance::import_crate_style!(css, "src/components/explorer/pathbar.module.css");

/// Segment data for path bar rendering.
#[derive(Clone)]
struct PathSegment {
    /// Display label
    label: String,
    /// Icon to show
    icon: icondata::Icon,
    /// Target path for navigation (None = current/disabled)
    target: Option<String>,
}

/// Path bar displayed at the bottom of the explorer.
///
/// Shows the path from the root with a clickable segment per ancestor.
#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    view! {
        <nav class=css::pathbar>
            {move || {
                let path = state.current_path.get();

                if path.is_empty() {
                    return view! {
                        <SegmentCurrent icon=ic::HOME label="Home".to_string() />
                    }
                    .into_any();
                }

                let segments = paths::split(&path);

                let mut segment_data: Vec<PathSegment> = Vec::new();

                // Root segment (always shown)
                segment_data.push(PathSegment {
                    label: "Home".to_string(),
                    icon: ic::HOME,
                    target: Some(String::new()),
                });

                for (idx, segment) in segments.iter().enumerate() {
                    let is_last = idx == segments.len() - 1;
                    let target = (!is_last).then(|| segments[..=idx].join("/"));

                    segment_data.push(PathSegment {
                        label: segment.clone(),
                        icon: ic::FOLDER,
                        target,
                    });
                }

                let views: Vec<_> = segment_data
                    .into_iter()
                    .enumerate()
                    .map(|(idx, seg)| {
                        let show_separator = idx > 0;

                        view! {
                            <>
                                {show_separator.then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                {if let Some(target) = seg.target {
                                    view! {
                                        <SegmentLink
                                            icon=seg.icon
                                            label=seg.label.clone()
                                            on_click=move || state.navigate_to(&target)
                                        />
                                    }
                                    .into_any()
                                } else {
                                    view! {
                                        <SegmentCurrent icon=seg.icon label=seg.label.clone() />
                                    }
                                    .into_any()
                                }}
                            </>
                        }
                    })
                    .collect();

                views.collect_view().into_any()
            }}
        </nav>
    }
}

/// Clickable path segment.
#[component]
fn SegmentLink<F>(icon: icondata::Icon, label: String, on_click: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            class=css::segment
            on:click=move |_| on_click()
        >
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::label>{label}</span>
        </button>
    }
}

/// Current (disabled) path segment.
#[component]
fn SegmentCurrent(icon: icondata::Icon, label: String) -> impl IntoView {
    view! {
        <button class=format!("{} {}", css::segment, css::segmentCurrent) disabled=true>
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::label>{label}</span>
        </button>
    }
}
