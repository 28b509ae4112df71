//! UI components built with Leptos.
//!
//! - [`Shell`] - Page layout (status bar, explorer, overlays)
//! - [`explorer`] - File browser UI
//! - [`dialog`] - New folder, upload and login dialogs
//! - [`toast`] - Transient notifications
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`status`] - Status bar showing user and location info

pub mod dialog;
pub mod explorer;
pub mod icons;
mod shell;
pub mod status;
pub mod toast;

pub use shell::Shell;
