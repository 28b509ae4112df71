//! Error types for the browsing engine.
//!
//! - [`InvalidNameError`] - malformed folder/file names
//! - [`ServiceError`] - failures reported by the remote drive API
//! - [`BrowseError`] - everything a [`BrowserSession`](crate::BrowserSession)
//!   operation can end in

use thiserror::Error;

use crate::depth::DepthDenial;

/// A name that cannot be used as a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must not contain '/': {0}")]
    ContainsSlash(String),
    #[error("reserved name: {0}")]
    Reserved(String),
}

/// Category of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The server refused the path because it exceeds the user's depth limit.
    DepthForbidden,
    NotFound,
    /// Missing or expired login.
    Unauthorized,
    Other,
}

/// Failure reported by the remote drive API or the transport in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn depth_forbidden(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::DepthForbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Unauthorized, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Other, message)
    }

    pub fn is_depth_forbidden(&self) -> bool {
        self.kind == ServiceErrorKind::DepthForbidden
    }
}

/// Result of a session operation that did not produce a listing.
///
/// None of these are fatal: the session stays usable and the next
/// navigation starts a new cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowseError {
    #[error("{0}")]
    DepthDenied(DepthDenial),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),
    /// The response arrived after the user navigated elsewhere.
    #[error("response discarded after navigation")]
    Stale,
    /// The operation needs a loaded listing.
    #[error("no listing loaded")]
    NotLoaded,
}

impl BrowseError {
    /// Whether the error should be shown to the user at all.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Stale | Self::NotLoaded)
    }
}
