//! Domain types shared by the engine and the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::format_size;
use crate::path::VirtualPath;

// =============================================================================
// Entries
// =============================================================================

/// Remote identifier of a file or folder.
///
/// The drive API uses numeric ids, other backends use strings; both are kept
/// as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single file or folder inside a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    /// Single path segment, never empty, never contains `/`.
    pub name: String,
    pub is_folder: bool,
    /// Size in bytes (None for folders or unknown)
    pub size: Option<u64>,
    /// Server-side human readable size, preferred over `size` for display
    pub size_formatted: Option<String>,
}

impl Entry {
    pub fn folder(id: u64, name: &str) -> Self {
        Self {
            id: EntryId::from(id),
            name: name.to_string(),
            is_folder: true,
            size: None,
            size_formatted: None,
        }
    }

    pub fn file(id: u64, name: &str, size: Option<u64>) -> Self {
        Self {
            id: EntryId::from(id),
            name: name.to_string(),
            is_folder: false,
            size,
            size_formatted: None,
        }
    }

    /// Size label for the UI. Folders have none.
    pub fn display_size(&self) -> Option<String> {
        if self.is_folder {
            return None;
        }
        self.size_formatted
            .clone()
            .or_else(|| self.size.map(format_size))
    }

    /// Hidden entries start with a dot.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

// =============================================================================
// Listings
// =============================================================================

/// One page (or the merged pages) of a folder's contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub folders: Vec<Entry>,
    pub files: Vec<Entry>,
    /// Total entries in the folder across all pages, when the server says so
    pub total: Option<usize>,
    pub current_depth: usize,
    /// 0 means unlimited
    pub max_depth: usize,
}

impl DirectoryListing {
    /// Entries carried by this listing (not the folder total).
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Folder total, falling back to the entries at hand.
    pub fn total_items(&self) -> usize {
        self.total.unwrap_or_else(|| self.len())
    }

    /// Folders in listing order, then files in listing order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.folders.iter().chain(self.files.iter())
    }

    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries().find(|e| e.name == name)
    }

    /// Append the entries of a following page.
    ///
    /// Folders stay ahead of files; within each group the order of arrival is
    /// kept. Depth information and the total follow the newer page.
    pub fn append_page(&mut self, page: DirectoryListing) {
        self.folders.extend(page.folders);
        self.files.extend(page.files);
        if page.total.is_some() {
            self.total = page.total;
        }
        self.current_depth = page.current_depth;
        self.max_depth = page.max_depth;
    }
}

/// Breadcrumb element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub name: String,
    pub path: VirtualPath,
}

// =============================================================================
// View Mode
// =============================================================================

/// Listing presentation chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    /// Parse a persisted value; anything unknown falls back to grid.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("list") => Self::List,
            _ => Self::Grid,
        }
    }
}
