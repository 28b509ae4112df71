//! Maximum navigation depth enforcement.
//!
//! The server owns the limit (it reports `max_depth` with every listing and
//! rejects too-deep paths on its own); the local check only saves a round
//! trip when the user descends past it.

use std::fmt;

use crate::models::DirectoryListing;
use crate::path::VirtualPath;

/// Message shown when the local pre-check blocks a descend.
pub const LOCAL_DENIAL_MESSAGE: &str = "Maximum folder depth reached";

/// Outcome of [`check_descend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCheck {
    Allowed,
    Denied { depth: usize, max_depth: usize },
}

impl DepthCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Check whether entering `target` stays within `max_depth`.
///
/// `max_depth == 0` means unlimited.
pub fn check_descend(target: &VirtualPath, max_depth: usize) -> DepthCheck {
    if max_depth == 0 {
        return DepthCheck::Allowed;
    }

    let depth = target.depth();
    if depth > max_depth {
        DepthCheck::Denied { depth, max_depth }
    } else {
        DepthCheck::Allowed
    }
}

/// Where a depth denial came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialSource {
    /// Blocked by [`check_descend`] before any request.
    Local,
    /// The listing service answered with its depth error.
    Server,
}

/// A blocked navigation, carried to the presenter and to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthDenial {
    pub target: VirtualPath,
    pub source: DenialSource,
    pub message: String,
}

impl DepthDenial {
    pub fn local(target: VirtualPath) -> Self {
        Self {
            target,
            source: DenialSource::Local,
            message: LOCAL_DENIAL_MESSAGE.to_string(),
        }
    }

    pub fn server(target: VirtualPath, message: impl Into<String>) -> Self {
        Self {
            target,
            source: DenialSource::Server,
            message: message.into(),
        }
    }
}

impl fmt::Display for DepthDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.target)
    }
}

/// Depth badge data for the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthIndicator {
    pub current: usize,
    pub max: usize,
}

impl DepthIndicator {
    pub fn from_listing(listing: &DirectoryListing) -> Self {
        Self {
            current: listing.current_depth,
            max: listing.max_depth,
        }
    }

    /// Hidden when the user has no limit.
    pub fn is_visible(&self) -> bool {
        self.max > 0
    }

    /// The user cannot go any deeper from here.
    pub fn at_limit(&self) -> bool {
        self.is_visible() && self.current >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_gate() {
        assert_eq!(
            check_descend(&VirtualPath::parse("/a/b/c"), 2),
            DepthCheck::Denied {
                depth: 3,
                max_depth: 2
            }
        );
        assert!(check_descend(&VirtualPath::parse("/a/b"), 2).is_allowed());
        assert!(check_descend(&VirtualPath::root(), 2).is_allowed());
    }

    #[test]
    fn test_unlimited_always_allows() {
        let deep = VirtualPath::parse("/1/2/3/4/5/6/7/8/9/10");
        assert!(check_descend(&deep, 0).is_allowed());
    }

    #[test]
    fn test_indicator() {
        let hidden = DepthIndicator { current: 3, max: 0 };
        assert!(!hidden.is_visible());
        assert!(!hidden.at_limit());

        let below = DepthIndicator { current: 1, max: 2 };
        assert!(below.is_visible());
        assert!(!below.at_limit());

        let at = DepthIndicator { current: 2, max: 2 };
        assert!(at.at_limit());
    }

    #[test]
    fn test_denial_display() {
        let denial = DepthDenial::server(VirtualPath::parse("/a/b/c"), "too deep");
        assert_eq!(denial.to_string(), "too deep (/a/b/c)");
        assert_eq!(
            DepthDenial::local(VirtualPath::root()).source,
            DenialSource::Local
        );
    }
}
