mod app;
mod components;
mod config;
mod core;
mod models;
mod utils;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    utils::logging::init();

    match document().get_element_by_id("app") {
        Some(root) => mount_to(root.unchecked_into::<web_sys::HtmlElement>(), App).forget(),
        None => {
            tracing::warn!("#app element missing, mounting to body");
            mount_to_body(App);
        }
    }
}
