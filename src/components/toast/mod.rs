//! Toast stack in the bottom-right corner.
//!
//! Toasts are pushed by the presenter and removed after a timeout or on click.

use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::NoticeLevel;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Toast;

stylance::import_crate_style!(css, "src/components/toast/toast.module.css");

fn level_style(level: NoticeLevel) -> (icondata::Icon, &'static str) {
    match level {
        NoticeLevel::Success => (ic::SUCCESS, css::success),
        NoticeLevel::Error => (ic::FAILURE, css::error),
        NoticeLevel::Warning => (ic::WARNING, css::warning),
        NoticeLevel::Info => (ic::INFO, css::info),
    }
}

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class=css::stack aria-live="polite">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=|toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let (icon, level_class) = level_style(toast.level);
    let id = toast.id;

    view! {
        <div
            class=format!("{} {}", css::toast, level_class)
            role="status"
            on:click=move |_| ctx.toasts.update(|t| t.retain(|toast| toast.id != id))
        >
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::message>{toast.message}</span>
        </div>
    }
}
