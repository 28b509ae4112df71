use leptos::prelude::*;

use super::{Modal, css};
use crate::app::AppContext;
use crate::core::actions;
use crate::utils::dom;

#[component]
pub fn NewFolderDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let name = RwSignal::new(String::new());

    Effect::new(move || {
        dom::focus_element("#new-folder-name");
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        actions::create_folder(ctx, name.get_untracked());
    };

    view! {
        <Modal title="New folder">
            <form class=css::form on:submit=on_submit>
                <input
                    id="new-folder-name"
                    class=css::input
                    type="text"
                    placeholder="Folder name"
                    autocomplete="off"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <div class=css::actions>
                    <button
                        type="button"
                        class=css::secondaryButton
                        on:click=move |_| ctx.explorer.close_dialog()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class=css::primaryButton
                        disabled=move || name.with(|n| n.trim().is_empty())
                    >
                        "Create"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
