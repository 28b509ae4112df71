//! In-memory drive and recording presenter for tests.
//!
//! [`MockFileService`] pages, searches and enforces the depth limit the way
//! the drive API does, and records every call it receives.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;

use crate::depth::{DepthDenial, DepthIndicator, LOCAL_DENIAL_MESSAGE};
use crate::error::ServiceError;
use crate::models::{Crumb, DirectoryListing, Entry};
use crate::path::VirtualPath;
use crate::service::{FileService, Notice, Presenter, UploadPayload};

// =============================================================================
// Payload
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFile {
    pub name: String,
    pub size: u64,
}

impl MockFile {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl UploadPayload for MockFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn byte_len(&self) -> u64 {
        self.size
    }
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    List {
        path: VirtualPath,
        page: u32,
        page_size: u32,
    },
    CreateFolder {
        parent: VirtualPath,
        name: String,
    },
    Delete {
        path: VirtualPath,
    },
    Search {
        keyword: String,
        scope: VirtualPath,
    },
    Upload {
        dir: VirtualPath,
        name: String,
    },
    DownloadUrl {
        path: VirtualPath,
    },
    Share {
        path: VirtualPath,
    },
}

/// Folder tree held in memory. Children keep insertion order.
#[derive(Debug)]
pub struct MockFileService {
    tree: RefCell<BTreeMap<VirtualPath, Vec<Entry>>>,
    calls: RefCell<Vec<MockCall>>,
    max_depth: Cell<usize>,
    list_failures: RefCell<HashMap<VirtualPath, ServiceError>>,
    upload_failures: RefCell<HashSet<String>>,
    next_id: Cell<u64>,
}

impl Default for MockFileService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileService {
    pub fn new() -> Self {
        let mut tree = BTreeMap::new();
        tree.insert(VirtualPath::root(), Vec::new());
        Self {
            tree: RefCell::new(tree),
            calls: RefCell::new(Vec::new()),
            max_depth: Cell::new(0),
            list_failures: RefCell::new(HashMap::new()),
            upload_failures: RefCell::new(HashSet::new()),
            next_id: Cell::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Create `path` and any missing ancestors.
    pub fn add_folder(&self, path: &VirtualPath) {
        if path.is_root() || self.tree.borrow().contains_key(path) {
            return;
        }
        let parent = path.parent();
        self.add_folder(&parent);

        let name = path.name().unwrap_or_default().to_string();
        let entry = Entry::folder(self.next_id(), &name);
        let mut tree = self.tree.borrow_mut();
        tree.entry(parent).or_default().push(entry);
        tree.insert(path.clone(), Vec::new());
    }

    pub fn add_file(&self, dir: &VirtualPath, name: &str, size: Option<u64>) {
        self.add_folder(dir);
        let entry = Entry::file(self.next_id(), name, size);
        self.tree
            .borrow_mut()
            .entry(dir.clone())
            .or_default()
            .push(entry);
    }

    /// Add `count` files named `file-000.txt`, `file-001.txt`, ...
    pub fn add_files(&self, dir: &VirtualPath, count: usize) {
        self.add_folder(dir);
        for i in 0..count {
            self.add_file(dir, &format!("file-{:03}.txt", i), Some(1024 * i as u64));
        }
    }

    pub fn set_max_depth(&self, max_depth: usize) {
        self.max_depth.set(max_depth);
    }

    /// Make every listing of `path` fail with `err`.
    pub fn fail_listing(&self, path: &VirtualPath, err: ServiceError) {
        self.list_failures.borrow_mut().insert(path.clone(), err);
    }

    /// Reject uploads of files called `name`.
    pub fn fail_upload(&self, name: &str) {
        self.upload_failures.borrow_mut().insert(name.to_string());
    }

    pub fn clear_failures(&self) {
        self.list_failures.borrow_mut().clear();
        self.upload_failures.borrow_mut().clear();
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, MockCall::List { .. }))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Children with folders first, as the drive API orders them.
    fn sorted_children(&self, path: &VirtualPath) -> Option<Vec<Entry>> {
        let tree = self.tree.borrow();
        let children = tree.get(path)?;
        let (mut folders, files): (Vec<_>, Vec<_>) =
            children.iter().cloned().partition(|e| e.is_folder);
        folders.extend(files);
        Some(folders)
    }

    fn to_listing(&self, entries: Vec<Entry>, total: usize, depth: usize) -> DirectoryListing {
        let (folders, files) = entries.into_iter().partition(|e| e.is_folder);
        DirectoryListing {
            folders,
            files,
            total: Some(total),
            current_depth: depth,
            max_depth: self.max_depth.get(),
        }
    }

    fn exists(&self, path: &VirtualPath) -> bool {
        if path.is_root() {
            return true;
        }
        let tree = self.tree.borrow();
        let Some(name) = path.name() else {
            return false;
        };
        tree.get(&path.parent())
            .is_some_and(|children| children.iter().any(|e| e.name == name))
    }
}

#[async_trait(?Send)]
impl FileService for MockFileService {
    type Payload = MockFile;

    async fn list_files(
        &self,
        path: &VirtualPath,
        page: u32,
        page_size: u32,
    ) -> Result<DirectoryListing, ServiceError> {
        self.record(MockCall::List {
            path: path.clone(),
            page,
            page_size,
        });

        if let Some(err) = self.list_failures.borrow().get(path) {
            return Err(err.clone());
        }
        let max_depth = self.max_depth.get();
        if max_depth > 0 && path.depth() > max_depth {
            return Err(ServiceError::depth_forbidden(LOCAL_DENIAL_MESSAGE));
        }

        let children = self
            .sorted_children(path)
            .ok_or_else(|| ServiceError::not_found(format!("Folder not found: {}", path)))?;
        let total = children.len();
        let start = (page.max(1) as usize - 1) * page_size as usize;
        let page_entries = children
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Ok(self.to_listing(page_entries, total, path.depth()))
    }

    async fn create_folder(&self, parent: &VirtualPath, name: &str) -> Result<(), ServiceError> {
        self.record(MockCall::CreateFolder {
            parent: parent.clone(),
            name: name.to_string(),
        });

        let path = parent
            .child(name)
            .map_err(|err| ServiceError::other(err.to_string()))?;
        if self.exists(&path) {
            return Err(ServiceError::other(format!("{} already exists", name)));
        }
        self.add_folder(&path);
        Ok(())
    }

    async fn delete_entry(&self, path: &VirtualPath) -> Result<(), ServiceError> {
        self.record(MockCall::Delete { path: path.clone() });

        if path.is_root() || !self.exists(path) {
            return Err(ServiceError::not_found(format!("Not found: {}", path)));
        }
        let name = path.name().unwrap_or_default().to_string();
        let mut tree = self.tree.borrow_mut();
        if let Some(children) = tree.get_mut(&path.parent()) {
            children.retain(|e| e.name != name);
        }
        tree.retain(|key, _| key != path && !key.is_descendant_of(path));
        Ok(())
    }

    async fn search(
        &self,
        keyword: &str,
        scope: &VirtualPath,
    ) -> Result<DirectoryListing, ServiceError> {
        self.record(MockCall::Search {
            keyword: keyword.to_string(),
            scope: scope.clone(),
        });

        let needle = keyword.to_lowercase();
        let matches: Vec<_> = self
            .sorted_children(scope)
            .unwrap_or_default()
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect();
        // The search endpoint reports no depth information.
        let total = matches.len();
        let (folders, files) = matches.into_iter().partition(|e| e.is_folder);
        Ok(DirectoryListing {
            folders,
            files,
            total: Some(total),
            current_depth: 0,
            max_depth: 0,
        })
    }

    async fn upload(
        &self,
        dir: &VirtualPath,
        payload: &MockFile,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<(), ServiceError> {
        self.record(MockCall::Upload {
            dir: dir.clone(),
            name: payload.name.clone(),
        });

        on_progress(0);
        if self.upload_failures.borrow().contains(&payload.name) {
            on_progress(30);
            return Err(ServiceError::other(format!(
                "upload rejected: {}",
                payload.name
            )));
        }
        on_progress(50);
        on_progress(50);
        on_progress(100);
        self.add_file(dir, &payload.name, Some(payload.size));
        Ok(())
    }

    async fn download_url(&self, path: &VirtualPath) -> Result<String, ServiceError> {
        self.record(MockCall::DownloadUrl { path: path.clone() });
        if !self.exists(path) {
            return Err(ServiceError::not_found(format!("Not found: {}", path)));
        }
        Ok(format!("https://download.invalid{}", path))
    }

    async fn share(&self, path: &VirtualPath) -> Result<String, ServiceError> {
        self.record(MockCall::Share { path: path.clone() });
        if !self.exists(path) {
            return Err(ServiceError::not_found(format!("Not found: {}", path)));
        }
        Ok(format!("https://share.invalid{}", path))
    }
}

// =============================================================================
// Presenter
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Loading,
    Listing { names: Vec<String>, append: bool },
    DepthIndicator(DepthIndicator),
    Error(String),
    Empty,
    DepthDenied(DepthDenial),
    Breadcrumb(Vec<Crumb>),
    Notice(Notice),
}

impl PresenterEvent {
    /// Whether this event replaces or extends the content area.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            Self::Loading
                | Self::Listing { .. }
                | Self::Error(_)
                | Self::Empty
                | Self::DepthDenied(_)
        )
    }
}

/// Presenter that remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn content_renders(&self) -> usize {
        self.events.iter().filter(|e| e.is_content()).count()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Notice(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_breadcrumb(&self) -> Option<&[Crumb]> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Breadcrumb(crumbs) => Some(crumbs.as_slice()),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render_loading(&mut self) {
        self.events.push(PresenterEvent::Loading);
    }

    fn render_listing(&mut self, listing: &DirectoryListing, append: bool) {
        let names = listing.entries().map(|e| e.name.clone()).collect();
        self.events.push(PresenterEvent::Listing { names, append });
    }

    fn render_depth_indicator(&mut self, indicator: DepthIndicator) {
        self.events.push(PresenterEvent::DepthIndicator(indicator));
    }

    fn render_error_state(&mut self, message: &str) {
        self.events.push(PresenterEvent::Error(message.to_string()));
    }

    fn render_empty_state(&mut self) {
        self.events.push(PresenterEvent::Empty);
    }

    fn render_depth_denied(&mut self, denial: &DepthDenial) {
        self.events.push(PresenterEvent::DepthDenied(denial.clone()));
    }

    fn update_breadcrumb(&mut self, crumbs: &[Crumb]) {
        self.events.push(PresenterEvent::Breadcrumb(crumbs.to_vec()));
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push(PresenterEvent::Notice(notice));
    }
}
