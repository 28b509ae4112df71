//! Persisted client state in localStorage.
//!
//! Only small values live here: the login token, the grid/list preference
//! and the log filter. Listings are never persisted.

use netdisk_core::ViewMode;

use super::dom;
use crate::config::{LOG_LEVEL_KEY, TOKEN_KEY, VIEW_MODE_KEY};
use crate::core::error::StorageError;

fn get(key: &str) -> Option<String> {
    dom::local_storage()?.get_item(key).ok()?
}

fn set(key: &str, value: &str) -> Result<(), StorageError> {
    let storage = dom::local_storage().ok_or(StorageError::StorageUnavailable)?;
    storage
        .set_item(key, value)
        .map_err(|_| StorageError::SaveFailed)
}

fn remove(key: &str) {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.remove_item(key);
    }
}

// =============================================================================
// Token
// =============================================================================

pub fn token() -> Option<String> {
    get(TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn save_token(token: &str) -> Result<(), StorageError> {
    set(TOKEN_KEY, token)
}

pub fn clear_token() {
    remove(TOKEN_KEY);
}

// =============================================================================
// Preferences
// =============================================================================

pub fn view_mode() -> ViewMode {
    ViewMode::from_stored(get(VIEW_MODE_KEY).as_deref())
}

pub fn save_view_mode(mode: ViewMode) -> Result<(), StorageError> {
    set(VIEW_MODE_KEY, mode.as_str())
}

/// Tracing filter directive, if the user set one.
pub fn log_level() -> Option<String> {
    get(LOG_LEVEL_KEY)
}
