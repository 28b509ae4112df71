//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Focus an element by CSS selector.
///
/// Returns `true` if the element was found and focused successfully.
pub fn focus_element(selector: &str) -> bool {
    if let Some(window) = window()
        && let Some(document) = window.document()
        && let Some(element) = document.query_selector(selector).ok().flatten()
        && let Ok(html_element) = element.dyn_into::<web_sys::HtmlElement>()
    {
        html_element.focus().is_ok()
    } else {
        false
    }
}

/// Set the document title.
pub fn set_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// Open `url` in a new tab (downloads are served with an attachment header).
pub fn open_url(url: &str) -> bool {
    window()
        .and_then(|w| w.open_with_url_and_target(url, "_blank").ok())
        .flatten()
        .is_some()
}

/// Reload the whole page.
pub fn reload_page() {
    if let Some(window) = window() {
        let _ = window.location().reload();
    }
}

/// Ask the user to confirm a destructive action.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Copy `text` to the system clipboard.
pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await.is_ok()
}
