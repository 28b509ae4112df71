//! Explorer header component.
//!
//! Navigation buttons, current folder title, search and action buttons.

use leptos::prelude::*;
use leptos_icons::Icon;
use netdisk_core::{ViewMode, VirtualPath};

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;
use crate::models::Dialog;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// Explorer header with navigation and actions.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let is_root = Signal::derive(move || ctx.explorer.current_path.with(VirtualPath::is_root));

    let current_name = Memo::new(move |_| {
        ctx.explorer
            .current_path
            .with(|path| path.name().unwrap_or("/").to_string())
    });

    view! {
        <header class=css::header>
            <NavButtons is_root=is_root />

            // Current location title (center)
            <div class=css::title>
                <span class=css::titleIcon>
                    {move || if is_root.get() {
                        view! { <Icon icon=ic::HOME /> }.into_any()
                    } else {
                        view! { <Icon icon=ic::FOLDER /> }.into_any()
                    }}
                </span>
                <span class=css::titleLabel>{move || current_name.get()}</span>
            </div>

            <SearchBox />
            <ActionButtons />
        </header>
    }
}

/// Navigation buttons (up, home, refresh).
#[component]
fn NavButtons(is_root: Signal<bool>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class=css::navButtons>
            <button
                class=move || nav_button_class(is_root.get())
                on:click=move |_| actions::go_up(ctx)
                disabled=move || is_root.get()
                title="Go to parent folder"
            >
                <Icon icon=ic::ARROW_UP />
            </button>
            <button
                class=move || nav_button_class(is_root.get())
                on:click=move |_| actions::navigate(ctx, VirtualPath::root())
                disabled=move || is_root.get()
                title="Go to root"
            >
                <Icon icon=ic::HOME />
            </button>
            <button
                class=css::navButton
                on:click=move |_| actions::refresh(ctx)
                title="Refresh"
            >
                <Icon icon=ic::REFRESH />
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

/// Search field scoped to the current folder.
#[component]
fn SearchBox() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let search = ctx.explorer.search;

    let on_input = move |ev: leptos::ev::Event| {
        let keyword = event_target_value(&ev);
        search.set(keyword.clone());
        actions::search(ctx, keyword);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" && !search.with_untracked(String::is_empty) {
            search.set(String::new());
            actions::search(ctx, String::new());
        }
    };

    view! {
        <label class=css::search>
            <span class=css::searchIcon><Icon icon=ic::SEARCH /></span>
            <input
                class=css::searchInput
                type="search"
                placeholder="Search this folder"
                prop:value=move || search.get()
                on:input=on_input
                on:keydown=on_keydown
            />
        </label>
    }
}

/// Action buttons (view toggle, new folder, upload, login/logout).
#[component]
fn ActionButtons() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let view_mode = ctx.explorer.view_mode;
    let logged_in = Signal::derive(move || ctx.user.with(Option::is_some));

    view! {
        <div class=css::actionButtons>
            <button
                class=css::actionButton
                on:click=move |_| ctx.explorer.toggle_view_mode()
                title=move || match view_mode.get() {
                    ViewMode::Grid => "List view",
                    ViewMode::List => "Grid view",
                }
            >
                {move || match view_mode.get() {
                    ViewMode::Grid => view! { <Icon icon=ic::LIST /> }.into_any(),
                    ViewMode::List => view! { <Icon icon=ic::GRID /> }.into_any(),
                }}
            </button>

            <button
                class=css::actionButton
                on:click=move |_| ctx.explorer.open_dialog(Dialog::NewFolder)
                title="New folder"
            >
                <Icon icon=ic::FOLDER_PLUS />
            </button>

            <button
                class=css::actionButton
                on:click=move |_| ctx.explorer.open_dialog(Dialog::Upload)
                title="Upload files"
            >
                <Icon icon=ic::UPLOAD />
            </button>

            {move || if logged_in.get() {
                view! {
                    <button
                        class=css::actionButton
                        on:click=move |_| actions::logout(ctx)
                        title="Log out"
                    >
                        <Icon icon=ic::LOGOUT />
                    </button>
                }.into_any()
            } else {
                view! {
                    <button
                        class=css::actionButton
                        on:click=move |_| ctx.explorer.open_dialog(Dialog::Login)
                        title="Log in"
                    >
                        <Icon icon=ic::LOGIN />
                    </button>
                }.into_any()
            }}
        </div>
    }
}
