//! Directory browsing engine for the netdisk web client.
//!
//! This crate holds everything that has real state-machine behavior and no
//! dependency on the browser:
//! - [`VirtualPath`] path normalization, parent/child and breadcrumbs
//! - [`ResultCache`] per-path first-page cache
//! - [`PaginationController`] infinite-scroll paging with a reentrancy guard
//! - [`check_descend`] depth-limit enforcement
//! - [`BrowserSession`] orchestration of the above against a [`FileService`]
//!   and a [`Presenter`]
//!
//! The web crate supplies the HTTP [`FileService`] and a Leptos [`Presenter`].

pub mod cache;
pub mod config;
pub mod depth;
pub mod error;
pub mod format;
pub mod models;
pub mod pagination;
pub mod path;
pub mod selection;
pub mod service;
pub mod session;
pub mod upload;
pub mod wire;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use cache::ResultCache;
pub use config::BrowserConfig;
pub use depth::{DenialSource, DepthCheck, DepthDenial, DepthIndicator, check_descend};
pub use error::{BrowseError, InvalidNameError, ServiceError, ServiceErrorKind};
pub use models::{Crumb, DirectoryListing, Entry, EntryId, ViewMode};
pub use pagination::{FetchRequest, PaginationController, PaginationState, ScrollMetrics};
pub use path::VirtualPath;
pub use selection::SelectionSet;
pub use service::{FileService, Notice, NoticeLevel, Presenter, UploadPayload};
pub use session::{BrowserSession, ScrollOutcome, SessionState};
pub use upload::{UploadEvent, UploadOutcome, UploadReport, upload_all};
