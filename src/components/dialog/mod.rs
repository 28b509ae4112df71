//! Modal dialogs: new folder, upload queue and login.
//!
//! At most one dialog is open at a time, selected by `ExplorerState::dialog`.

mod login;
mod new_folder;
mod upload;

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Dialog;

use login::LoginDialog;
use new_folder::NewFolderDialog;
use upload::UploadDialog;

stylance::import_crate_style!(css, "src/components/dialog/dialog.module.css");

/// Renders whichever dialog is open.
#[component]
pub fn Dialogs() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    move || match ctx.explorer.dialog.get() {
        Dialog::None => None,
        Dialog::NewFolder => Some(view! { <NewFolderDialog /> }.into_any()),
        Dialog::Upload => Some(view! { <UploadDialog /> }.into_any()),
        Dialog::Login => Some(view! { <LoginDialog /> }.into_any()),
    }
}

/// Backdrop and frame shared by all dialogs.
#[component]
fn Modal(title: &'static str, children: Children) -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ctx.explorer.close_dialog();
        }
    };

    view! {
        <div class=css::backdrop on:click=move |_| ctx.explorer.close_dialog()>
            <div
                class=css::modal
                role="dialog"
                aria-label=title
                on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <header class=css::modalHeader>
                    <h2 class=css::modalTitle>{title}</h2>
                    <button
                        class=css::closeButton
                        on:click=move |_| ctx.explorer.close_dialog()
                        title="Close"
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </header>
                <div class=css::modalBody>{children()}</div>
            </div>
        </div>
    }
}
