//! Status bar component.
//!
//! Displays the site title, the logged-in user, the current location and
//! the number of selected entries.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

/// Status bar component.
///
/// ## Responsive behavior
///
/// | Breakpoint | Display |
/// |------------|---------|
/// | Desktop (> 768px) | Full labels: `User: alice \| Location: /docs \| 2 selected` |
/// | Mobile (< 768px) | Values only: `alice · /docs` |
#[component]
pub fn Status() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let display_path = Signal::derive(move || ctx.explorer.current_path.with(|p| p.to_string()));
    let user_name = Signal::derive(move || {
        ctx.user.with(|user| match user {
            Some(user) if user.is_admin() => format!("{} (admin)", user.username),
            Some(user) if user.is_guest() => format!("{} (guest)", user.username),
            Some(user) => user.username.clone(),
            None => "guest".to_string(),
        })
    });
    let selected = Signal::derive(move || ctx.explorer.selection.with(|s| s.len()));

    view! {
        <header class=css::bar>
            <span class=css::brand>{move || ctx.site_title.get()}</span>

            <div class=css::section>
                // User
                <span class=css::label>
                    <span class=css::labelText>"User:"</span>
                    <span class=css::labelIcon><Icon icon=ic::USER /></span>
                    <span class=css::value>{user_name}</span>
                </span>

                // Location
                <span class=css::labelCyan>
                    <span class=css::labelText>"Location:"</span>
                    <span class=css::labelIcon><Icon icon=ic::LOCATION /></span>
                    <span class=css::value>{display_path}</span>
                </span>

                // Selection
                <Show when=move || { selected.get() > 0 }>
                    <span class=css::labelPurple>
                        <span class=css::value>{move || format!("{} selected", selected.get())}</span>
                    </span>
                </Show>
            </div>
        </header>
    }
}
