//! Main shell component.
//!
//! Page layout: status bar on top, explorer filling the rest, with dialogs
//! and toasts layered above.

use leptos::prelude::*;

use crate::components::dialog::Dialogs;
use crate::components::explorer::Explorer;
use crate::components::status::Status;
use crate::components::toast::Toasts;

stylance::import_crate_style!(css, "src/components/shell.module.css");

#[component]
pub fn Shell() -> impl IntoView {
    view! {
        <div class=css::shell>
            <Status />
            <main class=css::main>
                <Explorer />
            </main>
            <Dialogs />
            <Toasts />
        </div>
    }
}
