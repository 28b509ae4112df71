//! Normalized remote directory paths.

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidNameError;
use crate::models::Crumb;

/// Label of the synthetic first breadcrumb element.
pub const ROOT_CRUMB_NAME: &str = "root";

/// A normalized, absolute, slash-delimited path on the remote drive.
///
/// # Path Convention
///
/// - Root: `"/"`
/// - Folder in root: `"/docs"`
/// - Nested folder: `"/docs/2024"`
/// - Never a trailing slash (except root), never an empty segment
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// The drive root, `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalize any slash-delimited string into a path.
    ///
    /// Repeated slashes collapse, `.` segments are dropped and `..` pops one
    /// segment (never above root). A missing leading slash is tolerated.
    pub fn parse(raw: &str) -> Self {
        let mut parts: Vec<&str> = Vec::new();
        for part in raw.split('/').filter(|s| !s.is_empty()) {
            match part {
                ".." => {
                    parts.pop();
                }
                "." => {}
                _ => parts.push(part),
            }
        }

        if parts.is_empty() {
            Self::root()
        } else {
            Self(format!("/{}", parts.join("/")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments below root. `/a/b` has depth 2.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Last segment, `None` for root.
    pub fn name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// The containing folder. Root is its own parent.
    pub fn parent(&self) -> Self {
        match self.0.rsplit_once('/') {
            Some(("", _)) | None => Self::root(),
            Some((parent, _)) => Self(parent.to_string()),
        }
    }

    /// Path of `name` inside this folder.
    ///
    /// `name` must be a single segment: not blank, without `/`, and not
    /// `.` or `..`. It is used as given; names coming from a listing may
    /// carry surrounding spaces.
    pub fn child(&self, name: &str) -> Result<Self, InvalidNameError> {
        check_segment(name)?;
        if self.is_root() {
            Ok(Self(format!("/{}", name)))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// Whether `self` lies strictly below `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &VirtualPath) -> bool {
        if self == ancestor {
            return false;
        }
        if ancestor.is_root() {
            return true;
        }
        self.0
            .strip_prefix(ancestor.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Breadcrumb trail: a synthetic root element, then one element per
    /// segment carrying its cumulative path.
    pub fn breadcrumb(&self) -> Vec<Crumb> {
        let mut crumbs = vec![Crumb {
            name: ROOT_CRUMB_NAME.to_string(),
            path: Self::root(),
        }];

        let mut current = String::new();
        for segment in self.segments() {
            current.push('/');
            current.push_str(segment);
            crumbs.push(Crumb {
                name: segment.to_string(),
                path: Self(current.clone()),
            });
        }

        crumbs
    }
}

fn check_segment(name: &str) -> Result<(), InvalidNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InvalidNameError::Empty);
    }
    if name.contains('/') {
        return Err(InvalidNameError::ContainsSlash(name.to_string()));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(InvalidNameError::Reserved(trimmed.to_string()));
    }
    Ok(())
}

/// Check a name typed by the user and return it trimmed.
pub fn validate_name(name: &str) -> Result<&str, InvalidNameError> {
    let trimmed = name.trim();
    check_segment(trimmed)?;
    Ok(trimmed)
}

impl Default for VirtualPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VirtualPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
