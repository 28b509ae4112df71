//! Right-click menu of a single entry.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::actions;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn ContextMenuView() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    move || {
        ctx.explorer.context_menu.get().map(|menu| {
            let style = format!("left: {}px; top: {}px;", menu.x, menu.y);
            let is_folder = menu.entry.is_folder;
            let open_entry = menu.entry.clone();
            let download_entry = menu.entry.clone();
            let share_entry = menu.entry.clone();
            let delete_entry = menu.entry;

            view! {
                <div
                    class=css::contextMenu
                    style=style
                    role="menu"
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                >
                    {is_folder.then(|| view! {
                        <button
                            class=css::dropdownItem
                            on:click=move |_| {
                                ctx.explorer.context_menu.set(None);
                                actions::open_entry(ctx, open_entry.clone());
                            }
                        >
                            <span class=css::dropdownIcon><Icon icon=ic::FOLDER /></span>
                            "Open"
                        </button>
                    })}
                    {(!is_folder).then(|| view! {
                        <button
                            class=css::dropdownItem
                            on:click=move |_| actions::download(ctx, download_entry.clone())
                        >
                            <span class=css::dropdownIcon><Icon icon=ic::DOWNLOAD /></span>
                            "Download"
                        </button>
                    })}
                    <button
                        class=css::dropdownItem
                        on:click=move |_| actions::share(ctx, share_entry.clone())
                    >
                        <span class=css::dropdownIcon><Icon icon=ic::SHARE /></span>
                        "Share"
                    </button>
                    <div class=css::dropdownDivider></div>
                    <button
                        class=format!("{} {}", css::dropdownItem, css::danger)
                        on:click=move |_| actions::delete_entry(ctx, delete_entry.clone())
                    >
                        <span class=css::dropdownIcon><Icon icon=ic::TRASH /></span>
                        "Delete"
                    </button>
                </div>
            }
        })
    }
}
