//! Browser-side glue around the browsing engine.
//!
//! - [`api`] - HTTP [`FileService`](netdisk_core::FileService) for the drive API
//! - [`presenter`] - signal-backed [`Presenter`](netdisk_core::Presenter)
//! - [`actions`] - event handlers' async entry points
//! - [`error`] - transport errors

pub mod actions;
pub mod api;
pub mod error;
pub mod presenter;
