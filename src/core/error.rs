//! Custom error types for the web layer.
//!
//! - [`FetchError`] - transport failures of drive API requests
//! - [`StorageError`] - localStorage writes
//!
//! Both end up as [`ServiceError`] or a toast; nothing here is fatal.

use std::fmt;

use netdisk_core::ServiceError;
use netdisk_core::wire::{ErrorScope, service_error};

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (CORS, offline, aborted upload)
    NetworkError(String),
    /// Non-2xx status without a readable envelope
    HttpError(u16),
    /// Failed to read response body
    ResponseReadFailed,
    /// JSON parsing error
    JsonParseError(String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status) => write!(f, "HTTP error: {}", status),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::JsonParseError(msg) => write!(f, "Invalid response: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Convert into the engine's error, reading HTTP statuses like envelope codes.
    pub fn into_service_error(self, scope: ErrorScope) -> ServiceError {
        match self {
            Self::HttpError(status) => service_error(i64::from(status), self.to_string(), scope),
            other => ServiceError::other(other.to_string()),
        }
    }
}

impl From<FetchError> for ServiceError {
    fn from(err: FetchError) -> Self {
        err.into_service_error(ErrorScope::General)
    }
}

/// localStorage errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// localStorage not available.
    StorageUnavailable,
    /// Failed to save to localStorage.
    SaveFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable => write!(f, "localStorage not available"),
            Self::SaveFailed => write!(f, "failed to save to localStorage"),
        }
    }
}

impl std::error::Error for StorageError {}
