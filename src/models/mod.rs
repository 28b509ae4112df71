//! Data models and types for the application.
//!
//! Contains UI-side types for:
//! - [`FileType`] - Extension-based file classification
//! - [`ContentState`], [`ContextMenu`], [`Dialog`] - Explorer view state
//! - [`UploadItem`], [`Toast`] - Transient feedback
//!
//! Listings, paths and entries come from `netdisk_core`.

mod explorer;
mod filesystem;

pub use explorer::{ContentState, ContextMenu, Dialog, Toast, UploadItem, UploadStatus};
pub use filesystem::FileType;
