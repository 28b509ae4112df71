use leptos::prelude::*;

use super::{Modal, css};
use crate::app::AppContext;
use crate::core::actions;
use crate::utils::dom;

#[component]
pub fn LoginDialog() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        dom::focus_element("#login-username");
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        actions::login(
            ctx,
            username.get_untracked(),
            password.get_untracked(),
            error,
        );
    };

    let incomplete = move || username.with(|u| u.trim().is_empty()) || password.with(String::is_empty);

    view! {
        <Modal title="Log in">
            <form class=css::form on:submit=on_submit>
                <input
                    id="login-username"
                    class=css::input
                    type="text"
                    placeholder="Username"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    class=css::input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! {
                    <p class=css::error>{message}</p>
                })}
                <div class=css::actions>
                    <button
                        type="button"
                        class=css::secondaryButton
                        on:click=move |_| ctx.explorer.close_dialog()
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class=css::primaryButton disabled=incomplete>
                        "Log in"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
