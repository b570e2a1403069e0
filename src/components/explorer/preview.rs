//! Preview panel for the selected entry (Finder style).
//!
//! Markdown, code, and plain text fetch their content and render inline;
//! images and PDFs render straight from their raw URL. Everything else
//! falls back to a download hint.

use leptos::prelude::*;
use leptos_icons::Icon;

use super::file_list::kind_label;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config;
use crate::models::{FileSystemItem, PreviewKind};
use crate::utils::format::format_size;
use crate::utils::markdown::{markdown_to_html, source_to_html};

stylance::import_crate_style!(css, "src/components/explorer/preview.module.css");
stylance::import_crate_style!(md_css, "src/components/explorer/markdown.module.css");

/// Fetched preview content, by renderer.
#[derive(Clone, Debug, PartialEq)]
enum PreviewContent {
    /// Rendered markup injected via `inner_html`.
    Html(String),
    Text(String),
    Error(String),
    TooLarge,
}

#[component]
pub fn PreviewPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    // Direct content URL for the selection; images, PDFs, and the download
    // action all use it.
    let raw_url = Signal::derive(move || {
        state.selected.with(|sel| {
            sel.as_ref().map(|item| {
                item.download_url
                    .clone()
                    .unwrap_or_else(|| ctx.source().raw_url(&item.path))
            })
        })
    });

    let pdf_viewer_url = Memo::new(move |_| {
        raw_url
            .get()
            .map(|url| {
                let encoded = js_sys::encode_uri_component(&url);
                format!("https://mozilla.github.io/pdf.js/web/viewer.html?file={encoded}")
            })
            .unwrap_or_default()
    });

    // Text-like selections fetch their content here; other kinds resolve
    // to None immediately.
    let content = LocalResource::new(move || {
        let selected = state.selected.get();
        let source = ctx.source();
        async move {
            let item = selected?;
            if item.kind.is_dir() || !item.is_accessible {
                return None;
            }
            let kind = PreviewKind::from_name(&item.name);
            let text = match kind {
                PreviewKind::Markdown | PreviewKind::Code | PreviewKind::Text => {
                    if item.size.is_some_and(|s| s > config::MAX_PREVIEW_BYTES) {
                        return Some(PreviewContent::TooLarge);
                    }
                    match source.file_content(&item.path).await {
                        Ok(text) => text,
                        Err(err) => return Some(PreviewContent::Error(err.to_string())),
                    }
                }
                _ => return None,
            };
            Some(match kind {
                PreviewKind::Markdown => PreviewContent::Html(markdown_to_html(&text)),
                PreviewKind::Code => PreviewContent::Html(source_to_html(
                    &text,
                    &item.extension().unwrap_or_default(),
                )),
                _ => PreviewContent::Text(text),
            })
        }
    });

    view! {
        <aside class=css::panel role="complementary" aria-label="File preview">
            <PreviewHeader />

            <div class=css::content>
                {move || {
                    state
                        .selected
                        .get()
                        .map(|item| preview_body(item, raw_url, pdf_viewer_url, content))
                }}
            </div>

            <ActionBar raw_url=raw_url />
        </aside>
    }
}

/// Preview header with filename and close button.
#[component]
fn PreviewHeader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let name = Signal::derive(move || {
        state
            .selected
            .with(|sel| sel.as_ref().map(|item| item.name.clone()).unwrap_or_default())
    });

    view! {
        <header class=css::header>
            <span class=css::filename>{move || name.get()}</span>
            <button
                class=css::closeButton
                on:click=move |_| state.selected.set(None)
                title="Close preview"
                aria-label="Close preview panel"
            >
                <Icon icon=ic::CLOSE />
            </button>
        </header>
    }
}

/// Body content for one selected item.
fn preview_body(
    item: FileSystemItem,
    raw_url: Signal<Option<String>>,
    pdf_viewer_url: Memo<String>,
    content: LocalResource<Option<PreviewContent>>,
) -> AnyView {
    let meta = format!("{} \u{00b7} {}", kind_label(&item), format_size(item.size));

    if item.kind.is_dir() {
        return view! {
            <div class=css::dirPreview>
                <span class=css::dirIcon><Icon icon=ic::FOLDER /></span>
                <p class=css::dirTitle>{item.name.clone()}</p>
                <p class=css::hint>"Double-click in the listing to open"</p>
            </div>
        }
        .into_any();
    }

    if !item.is_accessible {
        let reason = item
            .access_error
            .clone()
            .unwrap_or_else(|| "This file is not accessible".to_string());
        return view! {
            <div class=css::lockedPreview>
                <span class=css::lockIcon><Icon icon=ic::LOCK /></span>
                <p class=css::lockedText>{reason}</p>
            </div>
        }
        .into_any();
    }

    match PreviewKind::from_name(&item.name) {
        PreviewKind::Image => view! {
            <div class=css::imagePreview>
                {move || raw_url.get().map(|url| view! {
                    <img src=url alt=item.name.clone() class=css::imageFull />
                })}
                <p class=css::meta>{meta.clone()}</p>
            </div>
        }
        .into_any(),
        PreviewKind::Pdf => view! {
            <iframe
                src=pdf_viewer_url.get()
                class=css::pdfViewer
                title="PDF Viewer"
            />
        }
        .into_any(),
        _ => view! {
            <div class=css::textPreview>
                <Suspense fallback=move || view! { <div class=css::loading>"Loading..."</div> }>
                    {move || {
                        let meta = meta.clone();
                        content.get().map(move |c| match c {
                            Some(PreviewContent::Html(html)) => view! {
                                <div class=md_css::markdown inner_html=html />
                            }
                            .into_any(),
                            Some(PreviewContent::Text(text)) => view! {
                                <pre class=css::previewText>{text}</pre>
                            }
                            .into_any(),
                            Some(PreviewContent::Error(err)) => view! {
                                <div class=css::previewError>
                                    <span class=css::lockIcon><Icon icon=ic::WARNING /></span>
                                    <p class=css::hint>"Failed to load preview"</p>
                                    <p class=css::errorDetail>{err}</p>
                                </div>
                            }
                            .into_any(),
                            Some(PreviewContent::TooLarge) => view! {
                                <div class=css::noPreview>
                                    <p class=css::hint>"File is too large to preview"</p>
                                    <p class=css::meta>{meta.clone()}</p>
                                </div>
                            }
                            .into_any(),
                            None => view! {
                                <div class=css::noPreview>
                                    <p class=css::hint>"Preview not available"</p>
                                    <p class=css::meta>{meta.clone()}</p>
                                </div>
                            }
                            .into_any(),
                        })
                    }}
                </Suspense>
            </div>
        }
        .into_any(),
    }
}

/// Footer actions: download and open in a new tab. Files only.
#[component]
fn ActionBar(raw_url: Signal<Option<String>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let file_selected = Signal::derive(move || {
        state
            .selected
            .with(|sel| sel.as_ref().is_some_and(|item| !item.kind.is_dir()))
    });

    view! {
        <Show when=move || file_selected.get()>
            <div class=css::actions>
                {move || {
                    let name = state
                        .selected
                        .with(|sel| sel.as_ref().map(|i| i.name.clone()))
                        .unwrap_or_default();
                    raw_url.get().map(|url| view! {
                        <a
                            class=css::actionLink
                            href=url
                            download=name
                            title="Download file"
                        >
                            <Icon icon=ic::DOWNLOAD />
                            "Download"
                        </a>
                    })
                }}
                {move || {
                    state
                        .selected
                        .with(|sel| sel.as_ref().map(|i| i.source_url.clone()))
                        .filter(|url| !url.is_empty())
                        .map(|url| view! {
                            <a
                                class=css::actionLink
                                href=url
                                target="_blank"
                                rel="noopener noreferrer"
                                title="Open in new tab"
                            >
                                <Icon icon=ic::EXTERNAL_LINK />
                                "Open"
                            </a>
                        })
                }}
            </div>
        </Show>
    }
}
