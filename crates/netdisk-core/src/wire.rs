//! Drive API payloads.
//!
//! Every response is wrapped in `{ code, message, data }` where `code` mirrors
//! the HTTP status (200 = success). The DTOs here accept the variations the
//! backend actually sends (`folder` / `folders`, numeric or string ids, null
//! messages) and convert into core types.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceErrorKind};
use crate::models::{DirectoryListing, Entry, EntryId};

/// Success code inside the envelope.
pub const CODE_OK: i64 = 200;

/// Which kind of endpoint produced a response; decides how a 403 is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Folder listing: every 403 is a depth or path restriction.
    Listing,
    General,
}

/// Map a failure code and message onto a [`ServiceError`].
pub fn service_error(code: i64, message: impl Into<String>, scope: ErrorScope) -> ServiceError {
    let message = message.into();
    let kind = match code {
        401 => ServiceErrorKind::Unauthorized,
        403 if scope == ErrorScope::Listing || mentions_depth(&message) => {
            ServiceErrorKind::DepthForbidden
        }
        404 => ServiceErrorKind::NotFound,
        _ => ServiceErrorKind::Other,
    };
    ServiceError::new(kind, message)
}

fn mentions_depth(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("depth") || message.contains("深度")
}

// =============================================================================
// Envelope
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub message: Option<String>,
    pub data: Option<T>,
    /// Older endpoints flag success here instead of in `code`.
    #[serde(default)]
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK || self.success
    }

    /// Unwrap into the (possibly absent) payload.
    pub fn into_result(self, scope: ErrorScope) -> Result<Option<T>, ServiceError> {
        if self.is_ok() {
            return Ok(self.data);
        }
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("request failed ({})", self.code));
        Err(service_error(self.code, message, scope))
    }

    /// Like [`into_result`](Self::into_result) but the payload is required.
    pub fn into_data(self, scope: ErrorScope) -> Result<T, ServiceError> {
        self.into_result(scope)?
            .ok_or_else(|| ServiceError::other("response carried no data"))
    }
}

// =============================================================================
// Listings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for EntryId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(id) => EntryId::from(id),
            RawId::Text(id) => EntryId::new(id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub id: Option<RawId>,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub size_formatted: Option<String>,
}

impl RawEntry {
    fn into_entry(self, is_folder: bool) -> Entry {
        let id = match self.id {
            Some(id) => id.into(),
            None => EntryId::new(self.name.clone()),
        };
        Entry {
            id,
            name: self.name,
            is_folder,
            size: if is_folder { None } else { self.size },
            size_formatted: self.size_formatted.filter(|s| !s.is_empty()),
        }
    }
}

/// `data` of `/api/list` and `/api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default, alias = "folder")]
    pub folders: Vec<RawEntry>,
    #[serde(default, alias = "file")]
    pub files: Vec<RawEntry>,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub current_depth: usize,
    #[serde(default)]
    pub max_depth: usize,
}

impl From<ListingData> for DirectoryListing {
    fn from(data: ListingData) -> Self {
        DirectoryListing {
            folders: data
                .folders
                .into_iter()
                .map(|e| e.into_entry(true))
                .collect(),
            files: data
                .files
                .into_iter()
                .map(|e| e.into_entry(false))
                .collect(),
            total: data.total,
            current_depth: data.current_depth,
            max_depth: data.max_depth,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderRequest<'a> {
    #[serde(rename = "parentPath")]
    pub parent_path: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathRequest<'a> {
    pub path: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// =============================================================================
// Other payloads
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadData {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareData {
    pub share_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn is_guest(&self) -> bool {
        self.user_type.as_deref() == Some("guest")
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin") || self.user_type.as_deref() == Some("admin")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteSection {
    #[serde(default)]
    pub title: Option<String>,
}

/// `data` of `/api/config`; only the parts the client shows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
}
