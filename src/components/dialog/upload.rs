//! Upload dialog: file picker, drop zone and per-file progress.

use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::format::{format_percent, format_size};

use super::{Modal, css};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;
use crate::models::{UploadItem, UploadStatus};

fn collect_files(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn UploadDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let uploads = ctx.explorer.uploads;
    let dragging = RwSignal::new(false);

    let busy = Signal::derive(move || {
        uploads.with(|items| {
            items
                .iter()
                .any(|item| matches!(item.status, UploadStatus::Waiting | UploadStatus::Uploading(_)))
        })
    });

    let on_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let files = collect_files(input.files());
        input.set_value("");
        actions::upload(ctx, files);
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        if busy.get_untracked() {
            return;
        }
        let files = collect_files(ev.data_transfer().and_then(|dt| dt.files()));
        actions::upload(ctx, files);
    };

    let zone_class = move || {
        if dragging.get() {
            format!("{} {}", css::dropZone, css::dropZoneActive)
        } else {
            css::dropZone.to_string()
        }
    };

    view! {
        <Modal title="Upload files">
            <label
                class=zone_class
                on:dragover=move |ev: leptos::ev::DragEvent| {
                    ev.prevent_default();
                    dragging.set(true);
                }
                on:dragleave=move |_| dragging.set(false)
                on:drop=on_drop
            >
                <span class=css::dropIcon><Icon icon=ic::UPLOAD /></span>
                <span>"Drop files here or click to choose"</span>
                <input
                    class=css::fileInput
                    type="file"
                    multiple=true
                    disabled=move || busy.get()
                    on:change=on_change
                />
            </label>

            <ul class=css::uploadList>
                <For
                    each=move || uploads.get().into_iter().enumerate()
                    key=|(index, item)| (*index, item.status.clone())
                    children=|(_, item)| view! { <UploadRow item=item /> }
                />
            </ul>
        </Modal>
    }
}

#[component]
fn UploadRow(item: UploadItem) -> impl IntoView {
    let percent = item.percent();
    let (label, status_class) = match &item.status {
        UploadStatus::Waiting => ("Waiting".to_string(), css::statusWaiting),
        UploadStatus::Uploading(p) => (format_percent(*p), css::statusActive),
        UploadStatus::Done => ("Done".to_string(), css::statusDone),
        UploadStatus::Failed(message) => (message.clone(), css::statusFailed),
    };

    view! {
        <li class=css::uploadItem>
            <div class=css::uploadMeta>
                <span class=css::uploadName>{item.name}</span>
                <span class=css::uploadSize>{format_size(item.size)}</span>
                <span class=status_class>{label}</span>
            </div>
            <div class=css::progress>
                <div class=css::progressBar style=format!("width: {}%;", percent)></div>
            </div>
        </li>
    }
}
