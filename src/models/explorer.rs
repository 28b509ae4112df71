//! Explorer-related data types for the file browser UI.

use netdisk_core::{DepthDenial, Entry, NoticeLevel};

/// What the content area shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ContentState {
    /// Spinner (initial state)
    #[default]
    Loading,
    /// Entries are on screen
    Listing,
    /// The folder (or search) has no entries
    Empty,
    /// Listing failed; message shown with a retry button
    Error(String),
    /// The server refused the folder; shown with a back button
    DepthDenied(DepthDenial),
}

/// Right-click menu anchored at viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
    pub x: i32,
    pub y: i32,
    pub entry: Entry,
}

/// Modal dialog currently open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    None,
    NewFolder,
    Upload,
    Login,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UploadStatus {
    Waiting,
    Uploading(u8),
    Done,
    Failed(String),
}

/// One row of the upload panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadItem {
    pub name: String,
    pub size: u64,
    pub status: UploadStatus,
}

impl UploadItem {
    pub fn percent(&self) -> u8 {
        match self.status {
            UploadStatus::Waiting => 0,
            UploadStatus::Uploading(p) => p,
            UploadStatus::Done => 100,
            UploadStatus::Failed(_) => 0,
        }
    }
}

/// A toast on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}
