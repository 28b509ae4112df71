//! Main explorer component.
//!
//! Switches the content area between the states the presenter publishes and
//! turns scrolling near the bottom into "load more" requests.

use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::ScrollMetrics;

use super::pathbar::PathBar;
use super::{ContextMenuView, FileList, Header};
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;
use crate::models::ContentState;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let content_ref = NodeRef::<leptos::html::Div>::new();

    let on_scroll = move |_: leptos::ev::Event| {
        if let Some(el) = content_ref.get() {
            let metrics = ScrollMetrics {
                scroll_height: el.scroll_height() as f64,
                scroll_top: el.scroll_top() as f64,
                client_height: el.client_height() as f64,
            };
            actions::load_more(ctx, metrics);
        }
    };

    // Clicking anywhere closes an open context menu
    let on_click = move |_: leptos::ev::MouseEvent| {
        if ctx.explorer.context_menu.with_untracked(Option::is_some) {
            ctx.explorer.context_menu.set(None);
        }
    };

    view! {
        <div class=css::explorer on:click=on_click>
            <Header />

            <div class=css::body node_ref=content_ref on:scroll=on_scroll>
                {move || match ctx.explorer.content.get() {
                    ContentState::Loading => view! {
                        <div class=css::placeholder>
                            <span class=css::spinner></span>
                            "Loading..."
                        </div>
                    }.into_any(),
                    ContentState::Empty => view! {
                        <div class=css::placeholder>
                            <span class=css::placeholderIcon><Icon icon=ic::FOLDER /></span>
                            {move || if ctx.explorer.search.with(|s| s.trim().is_empty()) {
                                "This folder is empty"
                            } else {
                                "No matching files"
                            }}
                        </div>
                    }.into_any(),
                    ContentState::Error(message) => view! {
                        <div class=css::placeholder>
                            <span class=css::placeholderIcon><Icon icon=ic::FAILURE /></span>
                            <p class=css::message>{message}</p>
                            <button class=css::placeholderButton on:click=move |_| actions::refresh(ctx)>
                                <Icon icon=ic::REFRESH />
                                "Retry"
                            </button>
                        </div>
                    }.into_any(),
                    ContentState::DepthDenied(denial) => view! {
                        <div class=css::placeholder>
                            <span class=css::placeholderIcon><Icon icon=ic::WARNING /></span>
                            <p class=css::message>{denial.message.clone()}</p>
                            <p class=css::hint>{denial.target.to_string()}</p>
                            <button class=css::placeholderButton on:click=move |_| actions::go_up(ctx)>
                                <Icon icon=ic::ARROW_UP />
                                "Back"
                            </button>
                        </div>
                    }.into_any(),
                    ContentState::Listing => view! {
                        <FileList />
                        <Show when=move || ctx.explorer.loading_more.get()>
                            <div class=css::loadingMore>
                                <span class=css::spinner></span>
                                "Loading more..."
                            </div>
                        </Show>
                    }.into_any(),
                }}
            </div>

            // Path bar (bottom, Finder style)
            <PathBar />

            <ContextMenuView />
        </div>
    }
}
