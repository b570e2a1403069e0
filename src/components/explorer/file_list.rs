//! File list component for explorer view.
//!
//! Displays the current listing in table form with sortable column headers.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::hidden;
use crate::models::{FileSystemItem, PreviewKind, SortField, SortOrder};
use crate::utils::format::format_size;

stylance::import_crate_style!(css, "src/components/explorer/file_list.module.css");

/// Icon for a filesystem entry based on its kind and extension.
pub(super) fn entry_icon(item: &FileSystemItem) -> IconData {
    if item.kind.is_dir() {
        ic::FOLDER
    } else {
        match PreviewKind::from_name(&item.name) {
            PreviewKind::Markdown | PreviewKind::Text => ic::FILE_TEXT,
            PreviewKind::Image => ic::FILE_IMAGE,
            PreviewKind::Pdf => ic::FILE_PDF,
            PreviewKind::Code => ic::FILE_CODE,
            PreviewKind::Unknown => ic::FILE,
        }
    }
}

/// Type column label: "Folder" for directories, the uppercased extension
/// (or "File") otherwise.
pub(super) fn kind_label(item: &FileSystemItem) -> String {
    if item.kind.is_dir() {
        "Folder".to_string()
    } else {
        match item.extension() {
            Some(ext) => ext.to_ascii_uppercase(),
            None => "File".to_string(),
        }
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    view! {
        <div class=css::list role="grid" aria-label="File list">
            <div class=css::listHeader role="row">
                <span class=css::headerIcon></span>
                <ColumnHeader field=SortField::Name class=css::headerName />
                <ColumnHeader field=SortField::Size class=css::headerSize />
                <ColumnHeader field=SortField::Kind class=css::headerKind />
            </div>
            <For
                each=move || state.entries.get()
                key=|entry| entry.path.clone()
                children=move |entry| {
                    view! { <FileListItem entry=entry /> }
                }
            />
        </div>
    }
}

/// Sortable column header. Clicking sorts by the column; clicking again
/// flips the direction.
#[component]
fn ColumnHeader(field: SortField, class: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let is_active = Signal::derive(move || state.sort_field.get() == field);

    view! {
        <button
            class=format!("{} {}", class, css::headerButton)
            on:click=move |_| state.sort_by(field)
            title=format!("Sort by {}", field.label().to_ascii_lowercase())
        >
            {field.label()}
            <span class=css::headerSortIcon>
                {move || {
                    if !is_active.get() {
                        ().into_any()
                    } else if state.sort_order.get() == SortOrder::Asc {
                        view! { <Icon icon=ic::CHEVRON_UP /> }.into_any()
                    } else {
                        view! { <Icon icon=ic::CHEVRON_DOWN /> }.into_any()
                    }
                }}
            </span>
        </button>
    }
}

#[component]
fn FileListItem(entry: FileSystemItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let is_dir = entry.kind.is_dir();
    let is_hidden = hidden::is_hidden(&entry.name, &entry.path);
    let icon = entry_icon(&entry);
    let size = format_size(entry.size);
    let kind = kind_label(&entry);
    let inaccessible = !entry.is_accessible;
    let access_title = entry.access_error.clone().unwrap_or_default();

    let item_path = entry.path.clone();
    let is_selected = Signal::derive(move || {
        state
            .selected
            .with(|s| s.as_ref().is_some_and(|sel| sel.path == item_path))
    });

    // Single click selects; the preview panel follows the selection.
    let entry_for_select = entry.clone();
    let handle_click = move |_: leptos::ev::MouseEvent| {
        state.selected.set(Some(entry_for_select.clone()));
    };

    // Double click enters directories. Files stay selected.
    let entry_path_for_nav = entry.path.clone();
    let handle_dblclick = move |_: leptos::ev::MouseEvent| {
        if is_dir {
            state.navigate_to(&entry_path_for_nav);
        }
    };

    let name_class = if is_dir {
        format!("{} {}", css::name, css::nameDir)
    } else if is_hidden {
        format!("{} {}", css::name, css::nameHidden)
    } else {
        css::name.to_string()
    };

    let item_class = move || {
        if is_selected.get() {
            format!("{} {}", css::listItem, css::selected)
        } else {
            css::listItem.to_string()
        }
    };

    let aria_label = if is_dir {
        format!("Folder: {}", entry.name)
    } else {
        format!("File: {}", entry.name)
    };

    view! {
        <div
            class=item_class
            on:click=handle_click
            on:dblclick=handle_dblclick
            role="row"
            tabindex="0"
            aria-label=aria_label
            aria-selected=move || is_selected.get()
        >
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>

            <span class=name_class>
                {entry.name.clone()}
                {inaccessible.then(|| view! {
                    <span class=css::lockIcon title=access_title.clone()>
                        <Icon icon=ic::LOCK />
                    </span>
                })}
            </span>

            <span class=css::size>{size}</span>
            <span class=css::kind>{kind}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn item(name: &str, kind: EntryKind) -> FileSystemItem {
        FileSystemItem {
            name: name.to_string(),
            path: name.to_string(),
            kind,
            size: None,
            revision: "r".to_string(),
            source_url: String::new(),
            download_url: None,
            is_accessible: true,
            access_error: None,
        }
    }

    #[test]
    fn directories_label_as_folders() {
        assert_eq!(kind_label(&item("docs", EntryKind::Directory)), "Folder");
    }

    #[test]
    fn files_label_with_their_extension() {
        assert_eq!(kind_label(&item("main.rs", EntryKind::File)), "RS");
        assert_eq!(kind_label(&item("Makefile", EntryKind::File)), "File");
    }

    #[test]
    fn icons_follow_the_preview_kind() {
        assert_eq!(entry_icon(&item("docs", EntryKind::Directory)), ic::FOLDER);
        assert_eq!(entry_icon(&item("a.png", EntryKind::File)), ic::FILE_IMAGE);
        assert_eq!(entry_icon(&item("a.rs", EntryKind::File)), ic::FILE_CODE);
        assert_eq!(entry_icon(&item("a.bin", EntryKind::File)), ic::FILE);
    }
}
