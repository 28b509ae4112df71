//! Utility modules for web, DOM and storage operations.
//!
//! Provides:
//! - [`fetch`] - JSON requests with timeout and XHR uploads with progress
//! - [`dom`] - window, clipboard and dialog helpers
//! - [`storage`] - persisted token, view mode and log filter
//! - [`logging`] - `tracing` subscriber writing to the browser console

pub mod dom;
pub mod fetch;
pub mod logging;
pub mod storage;
