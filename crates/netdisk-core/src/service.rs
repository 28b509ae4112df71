//! Boundaries of the engine.
//!
//! [`FileService`] is the remote drive (HTTP in the browser, in-memory in
//! tests). [`Presenter`] is whatever draws the result; the session calls it
//! right after every state change.
//!
//! Both are single-threaded: futures are not `Send` and the presenter is
//! driven from the UI thread.

use async_trait::async_trait;

use crate::depth::{DepthDenial, DepthIndicator};
use crate::error::ServiceError;
use crate::models::{Crumb, DirectoryListing};
use crate::path::VirtualPath;

/// Something that can be uploaded.
pub trait UploadPayload {
    fn file_name(&self) -> String;
    fn byte_len(&self) -> u64;
}

/// The remote drive API.
#[async_trait(?Send)]
pub trait FileService {
    /// File handle type accepted by [`upload`](Self::upload).
    type Payload: UploadPayload;

    /// Fetch one page of `path`. Pages are 1-based.
    async fn list_files(
        &self,
        path: &VirtualPath,
        page: u32,
        page_size: u32,
    ) -> Result<DirectoryListing, ServiceError>;

    async fn create_folder(&self, parent: &VirtualPath, name: &str) -> Result<(), ServiceError>;

    async fn delete_entry(&self, path: &VirtualPath) -> Result<(), ServiceError>;

    /// Name search below `scope`. Results are never paged nor cached.
    async fn search(
        &self,
        keyword: &str,
        scope: &VirtualPath,
    ) -> Result<DirectoryListing, ServiceError>;

    /// Upload one file into `dir`, reporting progress in percent.
    async fn upload(
        &self,
        dir: &VirtualPath,
        payload: &Self::Payload,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<(), ServiceError>;

    /// Temporary download link for a file.
    async fn download_url(&self, path: &VirtualPath) -> Result<String, ServiceError>;

    /// Public share link for a file or folder.
    async fn share(&self, path: &VirtualPath) -> Result<String, ServiceError>;
}

// =============================================================================
// Presentation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Transient, dismissible notification (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Rendering callbacks invoked by the session.
///
/// Each content change produces exactly one of `render_loading`,
/// `render_listing`, `render_empty_state`, `render_error_state` or
/// `render_depth_denied`. Fresh listings are accompanied by
/// `update_breadcrumb` and `render_depth_indicator`.
pub trait Presenter {
    fn render_loading(&mut self);

    /// `append` is true when `listing` holds only the newly received page.
    fn render_listing(&mut self, listing: &DirectoryListing, append: bool);

    fn render_depth_indicator(&mut self, indicator: DepthIndicator);

    fn render_error_state(&mut self, message: &str);

    fn render_empty_state(&mut self);

    fn render_depth_denied(&mut self, denial: &DepthDenial);

    fn update_breadcrumb(&mut self, crumbs: &[Crumb]);

    fn notify(&mut self, notice: Notice);
}
