//! The browsing session: one per application start.
//!
//! [`BrowserSession`] owns the cache, the pagination state and the current
//! folder, and drives a [`FileService`] and a [`Presenter`].
//!
//! ## Concurrency
//!
//! Everything runs on one thread. Methods take `&self` and keep state in a
//! `RefCell` that is never borrowed across an `.await`, so a navigation can
//! start while a "load more" is still in flight (both are usually spawned
//! from UI events on an `Rc<BrowserSession>`). Every request remembers the
//! folder and load epoch it was issued for; a response that no longer
//! matches when it resolves is dropped without touching state or the
//! presenter.

use std::cell::{Ref, RefCell};

use tracing::{debug, info, warn};

use crate::cache::ResultCache;
use crate::config::BrowserConfig;
use crate::depth::{DepthCheck, DepthDenial, DepthIndicator, check_descend};
use crate::error::{BrowseError, ServiceError};
use crate::models::{Crumb, DirectoryListing, EntryId};
use crate::pagination::{FetchRequest, PaginationController, PaginationState, ScrollMetrics};
use crate::path::{VirtualPath, validate_name};
use crate::selection::SelectionSet;
use crate::service::{FileService, Notice, Presenter};
use crate::upload::{UploadEvent, UploadReport, upload_all};

/// Lifecycle of the folder on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    DepthDenied,
    Failed,
}

/// Result of [`BrowserSession::scroll_more`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    Appended { received: usize },
    /// Nothing to do: all loaded, a page already in flight, or no listing.
    NoOp,
    /// The page arrived after the user left the folder.
    Discarded,
}

#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    current_path: VirtualPath,
    cache: ResultCache,
    pagination: PaginationController,
    /// What is on screen: merged pages, or search results
    listing: Option<DirectoryListing>,
    /// Limit last reported by the server, 0 = unlimited
    max_depth: usize,
    selection: SelectionSet,
    /// Bumped by every fresh load or search; older responses are stale
    epoch: u64,
}

pub struct BrowserSession<S, P> {
    service: S,
    presenter: RefCell<P>,
    inner: RefCell<SessionInner>,
    config: BrowserConfig,
}

impl<S: FileService, P: Presenter> BrowserSession<S, P> {
    pub fn new(service: S, presenter: P, config: BrowserConfig) -> Self {
        let inner = SessionInner {
            state: SessionState::Idle,
            current_path: VirtualPath::root(),
            cache: ResultCache::new(),
            pagination: PaginationController::new(&config),
            listing: None,
            max_depth: 0,
            selection: SelectionSet::new(),
            epoch: 0,
        };

        Self {
            service,
            presenter: RefCell::new(presenter),
            inner: RefCell::new(inner),
            config,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn presenter(&self) -> Ref<'_, P> {
        self.presenter.borrow()
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state
    }

    pub fn current_path(&self) -> VirtualPath {
        self.inner.borrow().current_path.clone()
    }

    /// Entries on screen (all pages loaded so far, or search results).
    pub fn listing(&self) -> Option<DirectoryListing> {
        self.inner.borrow().listing.clone()
    }

    pub fn breadcrumb(&self) -> Vec<Crumb> {
        self.inner.borrow().current_path.breadcrumb()
    }

    pub fn depth_indicator(&self) -> DepthIndicator {
        let inner = self.inner.borrow();
        inner
            .listing
            .as_ref()
            .map(DepthIndicator::from_listing)
            .unwrap_or_default()
    }

    pub fn max_depth(&self) -> usize {
        self.inner.borrow().max_depth
    }

    pub fn pagination_state(&self) -> Option<PaginationState> {
        let inner = self.inner.borrow();
        inner.pagination.state(&inner.current_path).cloned()
    }

    pub fn is_loading_more(&self) -> bool {
        self.inner.borrow().pagination.is_loading_more()
    }

    pub fn is_cached(&self, path: &VirtualPath) -> bool {
        self.inner.borrow().cache.contains(path)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> SelectionSet {
        self.inner.borrow().selection.clone()
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle_selection(&self, id: &EntryId) -> bool {
        self.inner.borrow_mut().selection.toggle(id)
    }

    pub fn clear_selection(&self) {
        self.inner.borrow_mut().selection.clear();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Initial load. The local depth check is skipped: the server decides
    /// whether the starting folder is reachable.
    pub async fn start(&self, path: VirtualPath) -> Result<DirectoryListing, BrowseError> {
        self.load(path, false).await
    }

    /// Go to `path`, from the cache when possible.
    pub async fn navigate(&self, path: VirtualPath) -> Result<DirectoryListing, BrowseError> {
        self.load(path, true).await
    }

    /// Enter the sub-folder `name` of the current folder.
    pub async fn open_folder(&self, name: &str) -> Result<DirectoryListing, BrowseError> {
        let target = self.current_path().child(name)?;
        self.navigate(target).await
    }

    /// Go to the parent folder. Ascending is never depth-checked.
    pub async fn navigate_up(&self) -> Result<DirectoryListing, BrowseError> {
        let target = self.current_path().parent();
        self.load(target, false).await
    }

    /// Show the current folder again (cached first page if available).
    pub async fn reload(&self) -> Result<DirectoryListing, BrowseError> {
        let target = self.current_path();
        self.load(target, false).await
    }

    /// Drop every cached listing and fetch the current folder again.
    pub async fn invalidate_and_reload(&self) -> Result<DirectoryListing, BrowseError> {
        self.inner.borrow_mut().cache.invalidate_all();
        self.reload().await
    }

    async fn load(
        &self,
        target: VirtualPath,
        check_depth: bool,
    ) -> Result<DirectoryListing, BrowseError> {
        let (request, epoch) = {
            let mut inner = self.inner.borrow_mut();

            if check_depth
                && target.is_descendant_of(&inner.current_path)
                && let DepthCheck::Denied { depth, max_depth } =
                    check_descend(&target, inner.max_depth)
            {
                info!(path = %target, depth, max_depth, "descend blocked by depth limit");
                inner.state = SessionState::DepthDenied;
                drop(inner);

                let denial = DepthDenial::local(target);
                self.presenter.borrow_mut().render_depth_denied(&denial);
                return Err(BrowseError::DepthDenied(denial));
            }

            inner.current_path = target.clone();
            inner.epoch += 1;

            if let Some(cached) = inner.cache.get(&target).cloned() {
                debug!(path = %target, "listing cache hit");
                inner.pagination.seed(&target, &cached);
                inner.apply_fresh(cached.clone());
                drop(inner);

                self.present_fresh(&target, &cached);
                return Ok(cached);
            }

            debug!(path = %target, "listing cache miss");
            inner.state = SessionState::Loading;
            inner.listing = None;
            (inner.pagination.start_fresh(&target), inner.epoch)
        };

        self.presenter.borrow_mut().render_loading();
        let result = self
            .service
            .list_files(&request.path, request.page, request.page_size)
            .await;
        self.finish_load(request, epoch, result)
    }

    fn finish_load(
        &self,
        request: FetchRequest,
        epoch: u64,
        result: Result<DirectoryListing, ServiceError>,
    ) -> Result<DirectoryListing, BrowseError> {
        let mut inner = self.inner.borrow_mut();
        if inner.epoch != epoch
            || inner.current_path != request.path
            || !inner.pagination.is_awaiting(&request)
        {
            debug!(path = %request.path, "dropping stale listing response");
            return Err(BrowseError::Stale);
        }

        let path = request.path.clone();
        match result {
            Ok(listing) => {
                info!(path = %path, entries = listing.len(), total = listing.total_items(), "listing loaded");
                inner.pagination.on_page_result(&request, &listing);
                inner.cache.put(path.clone(), listing.clone());
                inner.apply_fresh(listing.clone());
                drop(inner);

                self.present_fresh(&path, &listing);
                Ok(listing)
            }
            Err(err) if err.is_depth_forbidden() => {
                info!(path = %path, "server refused path depth");
                inner.pagination.discard();
                inner.state = SessionState::DepthDenied;
                drop(inner);

                let denial = DepthDenial::server(path, err.message);
                self.presenter.borrow_mut().render_depth_denied(&denial);
                Err(BrowseError::DepthDenied(denial))
            }
            Err(err) => {
                warn!(path = %path, error = %err, "listing failed");
                inner.pagination.discard();
                inner.state = SessionState::Failed;
                drop(inner);

                let mut presenter = self.presenter.borrow_mut();
                presenter.render_error_state(&err.message);
                presenter.notify(Notice::error(err.message.clone()));
                Err(err.into())
            }
        }
    }

    fn present_fresh(&self, path: &VirtualPath, listing: &DirectoryListing) {
        let mut presenter = self.presenter.borrow_mut();
        if listing.is_empty() {
            presenter.render_empty_state();
        } else {
            presenter.render_listing(listing, false);
        }
        presenter.update_breadcrumb(&path.breadcrumb());
        presenter.render_depth_indicator(DepthIndicator::from_listing(listing));
    }

    // =========================================================================
    // Infinite scroll
    // =========================================================================

    /// Fetch and append the next page of the current folder.
    pub async fn scroll_more(&self) -> Result<ScrollOutcome, BrowseError> {
        let request = {
            let mut inner = self.inner.borrow_mut();
            if !inner.can_page() {
                return Ok(ScrollOutcome::NoOp);
            }
            let path = inner.current_path.clone();
            match inner.pagination.request_next_page(&path) {
                Some(request) => request,
                None => return Ok(ScrollOutcome::NoOp),
            }
        };

        debug!(path = %request.path, page = request.page, "loading next page");
        let result = self
            .service
            .list_files(&request.path, request.page, request.page_size)
            .await;

        let mut inner = self.inner.borrow_mut();
        if inner.current_path != request.path || !inner.pagination.is_awaiting(&request) {
            debug!(path = %request.path, page = request.page, "dropping stale page");
            return Ok(ScrollOutcome::Discarded);
        }

        match result {
            Ok(page) => {
                let received = inner.pagination.on_page_result(&request, &page);
                inner.state = SessionState::Loaded;
                if let Some(listing) = inner.listing.as_mut() {
                    listing.append_page(page.clone());
                }
                drop(inner);

                self.presenter.borrow_mut().render_listing(&page, true);
                Ok(ScrollOutcome::Appended { received })
            }
            Err(err) => {
                warn!(path = %request.path, page = request.page, error = %err, "page load failed");
                inner.pagination.on_page_failed(&request);
                drop(inner);

                self.presenter
                    .borrow_mut()
                    .notify(Notice::error(err.message.clone()));
                Err(err.into())
            }
        }
    }

    /// Scroll handler: loads the next page when the viewport is near the end.
    pub async fn maybe_scroll_more(
        &self,
        metrics: ScrollMetrics,
    ) -> Result<ScrollOutcome, BrowseError> {
        let wanted = {
            let inner = self.inner.borrow();
            inner.can_page()
                && inner
                    .pagination
                    .should_load_more(&inner.current_path, &metrics)
        };
        if !wanted {
            return Ok(ScrollOutcome::NoOp);
        }
        self.scroll_more().await
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search the current folder by name.
    ///
    /// An empty keyword restores the folder listing. Results replace the
    /// listing on screen but are neither cached nor paged.
    pub async fn search(&self, keyword: &str) -> Result<DirectoryListing, BrowseError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.reload().await;
        }

        let (scope, epoch) = {
            let mut inner = self.inner.borrow_mut();
            inner.epoch += 1;
            (inner.current_path.clone(), inner.epoch)
        };

        debug!(keyword, scope = %scope, "searching");
        let result = self.service.search(keyword, &scope).await;

        let mut inner = self.inner.borrow_mut();
        if inner.epoch != epoch || inner.current_path != scope {
            debug!(keyword, "dropping stale search results");
            return Err(BrowseError::Stale);
        }

        match result {
            Ok(results) => {
                inner.pagination.discard();
                inner.apply_results(results.clone());
                drop(inner);

                let mut presenter = self.presenter.borrow_mut();
                if results.is_empty() {
                    presenter.render_empty_state();
                } else {
                    presenter.render_listing(&results, false);
                }
                Ok(results)
            }
            Err(err) => {
                warn!(keyword, error = %err, "search failed");
                drop(inner);
                self.presenter
                    .borrow_mut()
                    .notify(Notice::error(err.message.clone()));
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create `name` inside the current folder, then reload.
    pub async fn create_folder(&self, name: &str) -> Result<(), BrowseError> {
        let parent = self.current_path();
        let name = validate_name(name)?;

        match self.service.create_folder(&parent, name).await {
            Ok(()) => {
                info!(parent = %parent, name, "folder created");
                self.notify(Notice::success(format!("Folder \"{}\" created", name)));
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.report_failure("create folder", err)),
        }
    }

    /// Delete the entry `name` of the current folder, then reload.
    pub async fn delete_entry(&self, name: &str) -> Result<(), BrowseError> {
        let target = self.current_path().child(name)?;

        match self.service.delete_entry(&target).await {
            Ok(()) => {
                info!(path = %target, "entry deleted");
                self.notify(Notice::success(format!("Deleted {}", name)));
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.report_failure("delete", err)),
        }
    }

    /// Upload `files` one after another into the current folder.
    ///
    /// The cache is invalidated once the queue is done; the caller schedules
    /// the [`reload`](Self::reload) (after `reload_delay_ms`).
    pub async fn upload_files(
        &self,
        files: &[S::Payload],
        on_event: impl FnMut(usize, UploadEvent),
    ) -> UploadReport {
        let dir = self.current_path();
        let report = upload_all(&self.service, &dir, files, on_event).await;
        info!(
            dir = %dir,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "upload queue finished"
        );
        self.inner.borrow_mut().cache.invalidate_all();
        report
    }

    // =========================================================================
    // Links
    // =========================================================================

    pub async fn download_url(&self, name: &str) -> Result<String, BrowseError> {
        let target = self.current_path().child(name)?;
        self.service
            .download_url(&target)
            .await
            .map_err(|err| self.report_failure("download", err))
    }

    pub async fn share(&self, name: &str) -> Result<String, BrowseError> {
        let target = self.current_path().child(name)?;
        self.service
            .share(&target)
            .await
            .map_err(|err| self.report_failure("share", err))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub fn notify(&self, notice: Notice) {
        self.presenter.borrow_mut().notify(notice);
    }

    async fn reload_after_mutation(&self) {
        // Failures are already rendered by the reload itself.
        if let Err(err) = self.invalidate_and_reload().await
            && !err.is_silent()
        {
            debug!(error = %err, "reload after mutation did not produce a listing");
        }
    }

    fn report_failure(&self, action: &str, err: ServiceError) -> BrowseError {
        warn!(action, error = %err, "operation failed");
        self.notify(Notice::error(err.message.clone()));
        err.into()
    }
}

impl SessionInner {
    /// Put a fresh (non-appended) folder listing on screen.
    fn apply_fresh(&mut self, listing: DirectoryListing) {
        self.max_depth = listing.max_depth;
        self.apply_results(listing);
    }

    /// Put search results on screen. They carry no depth information, so
    /// the folder's limit stays in force.
    fn apply_results(&mut self, listing: DirectoryListing) {
        self.state = SessionState::Loaded;
        self.listing = Some(listing);
        self.selection.clear();
    }

    /// Whether the listing on screen may grow by another page. A descend
    /// refused locally leaves the current folder displayed and pageable.
    fn can_page(&self) -> bool {
        let showing_current = self.listing.is_some()
            && self.pagination.active_path() == Some(&self.current_path);
        match self.state {
            SessionState::Loaded => true,
            SessionState::DepthDenied => showing_current,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::depth::DenialSource;
    use crate::error::ServiceErrorKind;
    use crate::mock::{MockCall, MockFile, MockFileService, PresenterEvent, RecordingPresenter};

    type Session = BrowserSession<MockFileService, RecordingPresenter>;

    fn session_with(service: MockFileService, page_size: u32) -> Session {
        BrowserSession::new(
            service,
            RecordingPresenter::default(),
            BrowserConfig {
                page_size,
                ..Default::default()
            },
        )
    }

    fn p(s: &str) -> VirtualPath {
        VirtualPath::parse(s)
    }

    #[tokio::test]
    async fn test_cache_hit_skips_service() {
        let service = MockFileService::new();
        service.add_file(&p("/docs"), "a.txt", Some(12));
        let session = session_with(service, 50);

        let first = session.navigate(p("/docs")).await.unwrap();
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.is_cached(&p("/docs")));
        assert_eq!(session.service().list_calls(), 1);

        let second = session.navigate(p("/docs")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(session.service().list_calls(), 1);
    }

    #[tokio::test]
    async fn test_local_depth_denial_keeps_path() {
        let service = MockFileService::new();
        service.add_folder(&p("/a/b/c"));
        service.set_max_depth(2);
        let session = session_with(service, 50);

        session.start(p("/a/b")).await.unwrap();
        assert_eq!(session.max_depth(), 2);
        let calls = session.service().list_calls();

        let err = session.open_folder("c").await.unwrap_err();
        match err {
            BrowseError::DepthDenied(denial) => assert_eq!(denial.source, DenialSource::Local),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.state(), SessionState::DepthDenied);
        assert_eq!(session.current_path(), p("/a/b"));
        assert_eq!(session.service().list_calls(), calls);
    }

    #[tokio::test]
    async fn test_search_keeps_depth_limit() {
        let service = MockFileService::new();
        service.add_folder(&p("/a/b/c"));
        service.set_max_depth(2);
        let session = session_with(service, 50);
        session.start(p("/a/b")).await.unwrap();

        let results = session.search("c").await.unwrap();
        assert_eq!(results.max_depth, 0);
        assert_eq!(session.max_depth(), 2);

        let calls = session.service().list_calls();
        let err = session.open_folder("c").await.unwrap_err();
        match err {
            BrowseError::DepthDenied(denial) => assert_eq!(denial.source, DenialSource::Local),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(session.current_path(), p("/a/b"));
        assert_eq!(session.service().list_calls(), calls);
    }

    #[tokio::test]
    async fn test_scroll_continues_after_local_denial() {
        let service = MockFileService::new();
        service.add_folder(&p("/a/b/c"));
        service.add_files(&p("/a/b"), 30);
        service.set_max_depth(2);
        let session = session_with(service, 10);
        session.start(p("/a/b")).await.unwrap();
        assert_eq!(session.listing().unwrap().len(), 10);

        session.open_folder("c").await.unwrap_err();
        assert_eq!(session.state(), SessionState::DepthDenied);

        assert_eq!(
            session.scroll_more().await.unwrap(),
            ScrollOutcome::Appended { received: 10 }
        );
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.current_path(), p("/a/b"));
        assert_eq!(session.listing().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_no_scroll_after_server_denial() {
        let service = MockFileService::new();
        service.add_files(&p("/a/b/c"), 30);
        service.set_max_depth(2);
        let session = session_with(service, 10);

        session.start(p("/a/b/c")).await.unwrap_err();
        assert_eq!(session.state(), SessionState::DepthDenied);
        assert_eq!(session.scroll_more().await.unwrap(), ScrollOutcome::NoOp);
    }

    #[tokio::test]
    async fn test_ascend_is_never_depth_checked() {
        let service = MockFileService::new();
        service.add_folder(&p("/a/b/c"));
        let session = session_with(service, 50);

        session.start(p("/a/b/c")).await.unwrap();
        session.navigate_up().await.unwrap();
        assert_eq!(session.current_path(), p("/a/b"));
        session.navigate(p("/")).await.unwrap();
        assert_eq!(session.current_path(), VirtualPath::root());
    }

    #[tokio::test]
    async fn test_server_depth_denial() {
        let service = MockFileService::new();
        service.add_folder(&p("/a/b/c"));
        service.set_max_depth(1);
        let session = session_with(service, 50);

        let err = session.start(p("/a/b")).await.unwrap_err();
        assert!(matches!(
            err,
            BrowseError::DepthDenied(DepthDenial {
                source: DenialSource::Server,
                ..
            })
        ));
        assert_eq!(session.state(), SessionState::DepthDenied);
        assert!(!session.is_cached(&p("/a/b")));
    }

    #[tokio::test]
    async fn test_failure_renders_error_state() {
        let service = MockFileService::new();
        service.add_folder(&p("/docs"));
        service.fail_listing(&p("/docs"), ServiceError::other("backend down"));
        let session = session_with(service, 50);

        let err = session.navigate(p("/docs")).await.unwrap_err();
        assert_eq!(err.to_string(), "backend down");
        assert_eq!(session.state(), SessionState::Failed);

        let presenter = session.presenter();
        assert!(
            presenter
                .events
                .contains(&PresenterEvent::Error("backend down".to_string()))
        );
        assert!(presenter.notices().iter().any(|n| n.message == "backend down"));
    }

    #[tokio::test]
    async fn test_empty_folder_renders_empty_state() {
        let service = MockFileService::new();
        service.add_folder(&p("/empty"));
        let session = session_with(service, 50);

        let listing = session.navigate(p("/empty")).await.unwrap();
        assert!(listing.is_empty());
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.presenter().events.contains(&PresenterEvent::Empty));
    }

    #[tokio::test]
    async fn test_one_content_render_per_fresh_load() {
        let service = MockFileService::new();
        service.add_files(&p("/docs"), 3);
        let session = session_with(service, 50);

        session.navigate(p("/docs")).await.unwrap();
        session.navigate(p("/docs")).await.unwrap();

        // loading + listing for the miss, listing for the hit
        assert_eq!(session.presenter().content_renders(), 3);
    }

    #[tokio::test]
    async fn test_selection_reset_on_fresh_render_only() {
        let service = MockFileService::new();
        service.add_files(&p("/docs"), 15);
        let session = session_with(service, 10);

        session.navigate(p("/docs")).await.unwrap();
        let id = session.listing().unwrap().files[0].id.clone();
        assert!(session.toggle_selection(&id));

        session.scroll_more().await.unwrap();
        assert!(session.selection().contains(&id));

        session.reload().await.unwrap();
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn test_scroll_more_requires_loaded_state() {
        let session = session_with(MockFileService::new(), 10);
        assert_eq!(session.scroll_more().await.unwrap(), ScrollOutcome::NoOp);
    }

    #[tokio::test]
    async fn test_scroll_page_failure_allows_retry() {
        let service = MockFileService::new();
        service.add_files(&p("/docs"), 15);
        let session = session_with(service, 10);
        session.navigate(p("/docs")).await.unwrap();

        session
            .service()
            .fail_listing(&p("/docs"), ServiceError::other("timeout"));
        assert!(session.scroll_more().await.is_err());
        assert!(!session.is_loading_more());
        assert_eq!(session.state(), SessionState::Loaded);

        session.service().clear_failures();
        assert_eq!(
            session.scroll_more().await.unwrap(),
            ScrollOutcome::Appended { received: 5 }
        );
        assert_eq!(session.listing().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_scroll_does_not_touch_cache() {
        let service = MockFileService::new();
        service.add_files(&p("/docs"), 15);
        let session = session_with(service, 10);

        session.navigate(p("/docs")).await.unwrap();
        session.scroll_more().await.unwrap();
        assert_eq!(session.listing().unwrap().len(), 15);

        let cached = session.navigate(p("/docs")).await.unwrap();
        assert_eq!(cached.len(), 10);
        assert_eq!(session.pagination_state().unwrap().loaded_count, 10);
    }

    #[tokio::test]
    async fn test_maybe_scroll_more_respects_threshold() {
        let service = MockFileService::new();
        service.add_files(&p("/docs"), 15);
        let session = session_with(service, 10);
        session.navigate(p("/docs")).await.unwrap();

        let far = ScrollMetrics {
            scroll_height: 2000.0,
            scroll_top: 0.0,
            client_height: 500.0,
        };
        assert_eq!(
            session.maybe_scroll_more(far).await.unwrap(),
            ScrollOutcome::NoOp
        );

        let near = ScrollMetrics {
            scroll_top: 1450.0,
            ..far
        };
        assert_eq!(
            session.maybe_scroll_more(near).await.unwrap(),
            ScrollOutcome::Appended { received: 5 }
        );
    }

    #[tokio::test]
    async fn test_search_bypasses_cache_and_paging() {
        let service = MockFileService::new();
        let docs = p("/docs");
        service.add_file(&docs, "report.pdf", Some(100));
        service.add_file(&docs, "notes.txt", Some(100));
        service.add_file(&docs, "Report-2.pdf", Some(100));
        let session = session_with(service, 50);
        session.navigate(docs.clone()).await.unwrap();

        let results = session.search("  report ").await.unwrap();
        let names: Vec<_> = results.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["report.pdf", "Report-2.pdf"]);
        assert!(session.pagination_state().is_none());
        assert_eq!(session.scroll_more().await.unwrap(), ScrollOutcome::NoOp);
        assert_eq!(session.listing().unwrap().len(), 2);

        // cached first page still holds the full folder
        let restored = session.search("").await.unwrap();
        assert_eq!(restored.len(), 3);
        assert!(session.service().calls().contains(&MockCall::Search {
            keyword: "report".to_string(),
            scope: docs,
        }));
    }

    #[tokio::test]
    async fn test_create_folder_reloads_from_service() {
        let service = MockFileService::new();
        service.add_folder(&p("/docs"));
        let session = session_with(service, 50);
        session.navigate(p("/docs")).await.unwrap();
        let before = session.service().list_calls();

        session.create_folder("reports").await.unwrap();
        assert_eq!(session.service().list_calls(), before + 1);
        assert!(session.listing().unwrap().find("reports").is_some());
        assert!(
            session
                .presenter()
                .notices()
                .iter()
                .any(|n| n.message.contains("reports"))
        );
    }

    #[tokio::test]
    async fn test_create_folder_rejects_invalid_name() {
        let session = session_with(MockFileService::new(), 50);
        session.start(VirtualPath::root()).await.unwrap();

        let err = session.create_folder("a/b").await.unwrap_err();
        assert!(matches!(err, BrowseError::InvalidName(_)));
        assert!(
            !session
                .service()
                .calls()
                .iter()
                .any(|c| matches!(c, MockCall::CreateFolder { .. }))
        );
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_listing() {
        let service = MockFileService::new();
        service.add_file(&p("/docs"), "a.txt", None);
        let session = session_with(service, 50);
        session.navigate(p("/docs")).await.unwrap();

        let err = session.delete_entry("missing.txt").await.unwrap_err();
        assert!(matches!(
            err,
            BrowseError::Service(ServiceError {
                kind: ServiceErrorKind::NotFound,
                ..
            })
        ));
        assert_eq!(session.state(), SessionState::Loaded);
        assert!(session.is_cached(&p("/docs")));

        session.delete_entry("a.txt").await.unwrap();
        assert!(session.listing().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_links() {
        let service = MockFileService::new();
        service.add_file(&p("/docs"), "a.txt", None);
        let session = session_with(service, 50);
        session.navigate(p("/docs")).await.unwrap();

        assert!(session.download_url("a.txt").await.unwrap().ends_with("/docs/a.txt"));
        assert!(session.share("a.txt").await.unwrap().ends_with("/docs/a.txt"));
    }

    #[tokio::test]
    async fn test_listed_names_are_used_verbatim() {
        let service = MockFileService::new();
        service.add_file(&p("/docs"), " padded.txt ", None);
        let session = session_with(service, 50);
        session.navigate(p("/docs")).await.unwrap();

        let url = session.share(" padded.txt ").await.unwrap();
        assert!(url.ends_with("/docs/ padded.txt "));

        session.delete_entry(" padded.txt ").await.unwrap();
        let target = p("/docs").child(" padded.txt ").unwrap();
        assert!(session.service().calls().contains(&MockCall::Delete { path: target }));
        assert!(session.listing().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_invalidates_cache() {
        let service = MockFileService::new();
        service.add_folder(&p("/docs"));
        let session = session_with(service, 50);
        session.navigate(p("/docs")).await.unwrap();

        let files = vec![MockFile::new("a.txt", 10), MockFile::new("b.txt", 20)];
        let report = session.upload_files(&files, |_, _| {}).await;
        assert_eq!(report.succeeded(), 2);
        assert!(!session.is_cached(&p("/docs")));

        let listing = session.reload().await.unwrap();
        assert_eq!(listing.len(), 2);
    }

    // -------------------------------------------------------------------------
    // Stale responses
    // -------------------------------------------------------------------------

    /// Holds back one page of one folder until released.
    struct GatedService {
        inner: MockFileService,
        gated: (VirtualPath, u32),
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl FileService for GatedService {
        type Payload = MockFile;

        async fn list_files(
            &self,
            path: &VirtualPath,
            page: u32,
            page_size: u32,
        ) -> Result<DirectoryListing, ServiceError> {
            if (path, page) == (&self.gated.0, self.gated.1) {
                let gate = self.gate.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            }
            self.inner.list_files(path, page, page_size).await
        }

        async fn create_folder(&self, parent: &VirtualPath, name: &str) -> Result<(), ServiceError> {
            self.inner.create_folder(parent, name).await
        }

        async fn delete_entry(&self, path: &VirtualPath) -> Result<(), ServiceError> {
            self.inner.delete_entry(path).await
        }

        async fn search(
            &self,
            keyword: &str,
            scope: &VirtualPath,
        ) -> Result<DirectoryListing, ServiceError> {
            self.inner.search(keyword, scope).await
        }

        async fn upload(
            &self,
            dir: &VirtualPath,
            payload: &MockFile,
            on_progress: &mut dyn FnMut(u8),
        ) -> Result<(), ServiceError> {
            self.inner.upload(dir, payload, on_progress).await
        }

        async fn download_url(&self, path: &VirtualPath) -> Result<String, ServiceError> {
            self.inner.download_url(path).await
        }

        async fn share(&self, path: &VirtualPath) -> Result<String, ServiceError> {
            self.inner.share(path).await
        }
    }

    fn gated_session(
        inner: MockFileService,
        gated: (VirtualPath, u32),
    ) -> (BrowserSession<GatedService, RecordingPresenter>, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let service = GatedService {
            inner,
            gated,
            gate: RefCell::new(Some(rx)),
        };
        let session = BrowserSession::new(
            service,
            RecordingPresenter::default(),
            BrowserConfig {
                page_size: 10,
                ..Default::default()
            },
        );
        (session, tx)
    }

    #[tokio::test]
    async fn test_stale_page_after_navigation_is_discarded() {
        let mock = MockFileService::new();
        mock.add_files(&p("/docs"), 25);
        mock.add_files(&p("/music"), 3);
        let (session, release) = gated_session(mock, (p("/docs"), 2));

        session.navigate(p("/docs")).await.unwrap();
        let renders_before = session.presenter().events.len();

        let (scrolled, navigated) = tokio::join!(session.scroll_more(), async {
            let listing = session.navigate(p("/music")).await;
            let _ = release.send(());
            listing
        });

        assert_eq!(scrolled.unwrap(), ScrollOutcome::Discarded);
        assert_eq!(navigated.unwrap().len(), 3);
        assert_eq!(session.current_path(), p("/music"));
        assert_eq!(session.listing().unwrap().len(), 3);
        assert!(
            !session.presenter().events[renders_before..]
                .iter()
                .any(|e| matches!(e, PresenterEvent::Listing { append: true, .. }))
        );
    }

    #[tokio::test]
    async fn test_superseded_fresh_load_is_discarded() {
        let mock = MockFileService::new();
        mock.add_files(&p("/slow"), 4);
        mock.add_files(&p("/fast"), 2);
        let (session, release) = gated_session(mock, (p("/slow"), 1));

        let (slow, fast) = tokio::join!(session.navigate(p("/slow")), async {
            let listing = session.navigate(p("/fast")).await;
            let _ = release.send(());
            listing
        });

        assert_eq!(slow.unwrap_err(), BrowseError::Stale);
        assert_eq!(fast.unwrap().len(), 2);
        assert_eq!(session.current_path(), p("/fast"));
        assert!(!session.is_cached(&p("/slow")));
    }

    #[tokio::test]
    async fn test_second_scroll_while_in_flight_is_noop() {
        let mock = MockFileService::new();
        mock.add_files(&p("/docs"), 25);
        let (session, release) = gated_session(mock, (p("/docs"), 2));
        session.navigate(p("/docs")).await.unwrap();

        let (first, second) = tokio::join!(session.scroll_more(), async {
            let outcome = session.scroll_more().await;
            assert_eq!(session.pagination_state().unwrap().page, 1);
            let _ = release.send(());
            outcome
        });

        assert_eq!(first.unwrap(), ScrollOutcome::Appended { received: 10 });
        assert_eq!(second.unwrap(), ScrollOutcome::NoOp);
        assert_eq!(session.pagination_state().unwrap().page, 2);
    }
}
