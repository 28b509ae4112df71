//! File list component for explorer view.
//!
//! Displays the entries of the current folder in grid or list form.
//! Folders come first, pages are appended at the end as they arrive.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::{Entry, ViewMode};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;
use crate::models::{ContextMenu, FileType};

stylance::import_crate_style!(css, "src/components/explorer/file_list.module.css");

/// Get icon for file/folder based on type
fn get_icon(entry: &Entry) -> IconData {
    if entry.is_folder {
        return ic::FOLDER;
    }
    match FileType::from_name(&entry.name) {
        FileType::Text => ic::FILE_TEXT,
        FileType::Pdf => ic::FILE_PDF,
        FileType::Image => ic::FILE_IMAGE,
        FileType::Video => ic::FILE_VIDEO,
        FileType::Audio => ic::FILE_AUDIO,
        FileType::Archive => ic::FILE_ARCHIVE,
        FileType::Code => ic::FILE_CODE,
        FileType::Unknown => ic::FILE,
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let view_mode = ctx.explorer.view_mode;

    let container_class = move || match view_mode.get() {
        ViewMode::Grid => css::grid,
        ViewMode::List => css::list,
    };

    view! {
        <div class=container_class role="grid" aria-label="File list">
            // Column header (list view only)
            <Show when=move || view_mode.get() == ViewMode::List>
                <div class=css::listHeader role="row">
                    <span class=css::headerIcon></span>
                    <span class=css::headerName>"Name"</span>
                    <span class=css::headerSize>"Size"</span>
                </div>
            </Show>
            <For
                each=move || ctx.explorer.entries.get()
                key=|entry| entry.id.clone()
                children=move |entry| {
                    view! { <FileListItem entry=entry /> }
                }
            />
        </div>
    }
}

#[component]
fn FileListItem(entry: Entry) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let icon = get_icon(&entry);
    let size = entry.display_size().unwrap_or_default();
    let is_folder = entry.is_folder;

    let id = entry.id.clone();
    let is_selected =
        Signal::derive(move || ctx.explorer.selection.with(|selection| selection.contains(&id)));

    // Ctrl/Cmd click toggles selection; plain click only focuses
    let id_for_click = entry.id.clone();
    let handle_click = move |ev: leptos::ev::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() {
            actions::toggle_selection(ctx, id_for_click.clone());
        }
    };

    let entry_for_open = entry.clone();
    let handle_dblclick = move |_: leptos::ev::MouseEvent| {
        actions::open_entry(ctx, entry_for_open.clone());
    };

    let entry_for_keys = entry.clone();
    let handle_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            actions::open_entry(ctx, entry_for_keys.clone());
        }
    };

    let entry_for_menu = entry.clone();
    let handle_contextmenu = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        ctx.explorer.context_menu.set(Some(ContextMenu {
            x: ev.client_x(),
            y: ev.client_y(),
            entry: entry_for_menu.clone(),
        }));
    };

    let name_class = if is_folder {
        format!("{} {}", css::name, css::nameDir)
    } else if entry.is_hidden() {
        format!("{} {}", css::name, css::nameHidden)
    } else {
        css::name.to_string()
    };

    let item_class = move || {
        if is_selected.get() {
            format!("{} {}", css::item, css::selected)
        } else {
            css::item.to_string()
        }
    };

    let aria_label = if is_folder {
        format!("Folder: {}", entry.name)
    } else {
        format!("File: {}", entry.name)
    };

    view! {
        <div
            class=item_class
            on:click=handle_click
            on:dblclick=handle_dblclick
            on:keydown=handle_keydown
            on:contextmenu=handle_contextmenu
            role="row"
            tabindex="0"
            title=entry.name.clone()
            aria-label=aria_label
            aria-selected=move || is_selected.get()
        >
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <span class=name_class>{entry.name.clone()}</span>
            <span class=css::size>{size}</span>
        </div>
    }
}
