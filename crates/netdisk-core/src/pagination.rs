//! Incremental (infinite-scroll) paging of the active folder.
//!
//! Only the folder on screen has a [`PaginationState`]; navigating elsewhere
//! replaces it. The `is_loading_more` flag is the only mutual exclusion in
//! the engine: while it is set, further "load more" requests for the folder
//! are no-ops, so at most one page fetch per folder is in flight.

use crate::config::BrowserConfig;
use crate::models::DirectoryListing;
use crate::path::VirtualPath;

/// A page fetch to hand to the listing service.
///
/// The request remembers the folder and load generation it was issued for,
/// which is what lets a late response be recognized as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub path: VirtualPath,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    /// `false` for a fresh load that replaces the listing
    pub append: bool,
    generation: u64,
}

/// Paging bookkeeping for the active folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Last page received (1-based)
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub loaded_count: usize,
    pub is_loading_more: bool,
}

impl PaginationState {
    fn fresh(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total_items: 0,
            loaded_count: 0,
            is_loading_more: false,
        }
    }

    pub fn has_more(&self) -> bool {
        self.total_items > self.loaded_count
    }
}

/// Scroll position of the listing viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

#[derive(Debug)]
pub struct PaginationController {
    page_size: u32,
    scroll_threshold_px: f64,
    active: Option<(VirtualPath, PaginationState)>,
    generation: u64,
}

impl PaginationController {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            page_size: config.effective_page_size(),
            scroll_threshold_px: config.scroll_threshold_px,
            active: None,
            generation: 0,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Begin a fresh load of `path`: page 1, nothing loaded.
    pub fn start_fresh(&mut self, path: &VirtualPath) -> FetchRequest {
        self.generation += 1;
        self.active = Some((path.clone(), PaginationState::fresh(self.page_size)));
        FetchRequest {
            path: path.clone(),
            page: 1,
            page_size: self.page_size,
            append: false,
            generation: self.generation,
        }
    }

    /// Adopt an already available first page (a cache hit) without fetching.
    pub fn seed(&mut self, path: &VirtualPath, first_page: &DirectoryListing) {
        self.generation += 1;
        let loaded = first_page.len();
        self.active = Some((
            path.clone(),
            PaginationState {
                page: 1,
                page_size: self.page_size,
                total_items: first_page.total_items().max(loaded),
                loaded_count: loaded,
                is_loading_more: false,
            },
        ));
    }

    /// Issue the next page for `path`, or `None` when a page is already in
    /// flight, everything is loaded, or `path` is not the active folder.
    pub fn request_next_page(&mut self, path: &VirtualPath) -> Option<FetchRequest> {
        let generation = self.generation;
        let page_size = self.page_size;
        let state = self.state_mut(path)?;
        if state.is_loading_more || !state.has_more() {
            return None;
        }

        state.is_loading_more = true;
        Some(FetchRequest {
            path: path.clone(),
            page: state.page + 1,
            page_size,
            append: true,
            generation,
        })
    }

    /// Whether a response to `request` still belongs to the active state.
    pub fn is_awaiting(&self, request: &FetchRequest) -> bool {
        if request.generation != self.generation {
            return false;
        }
        match &self.active {
            Some((path, state)) if *path == request.path => {
                !request.append || (state.is_loading_more && request.page == state.page + 1)
            }
            _ => false,
        }
    }

    /// Record a received page. Returns the number of entries it carried.
    ///
    /// Responses that [`is_awaiting`](Self::is_awaiting) rejects are ignored.
    pub fn on_page_result(&mut self, request: &FetchRequest, listing: &DirectoryListing) -> usize {
        if !self.is_awaiting(request) {
            return 0;
        }
        let Some(state) = self.state_mut(&request.path) else {
            return 0;
        };

        let received = listing.len();
        if request.append {
            state.loaded_count += received;
        } else {
            state.loaded_count = received;
        }
        state.total_items = listing.total_items().max(state.loaded_count);
        state.page = request.page;
        state.is_loading_more = false;
        received
    }

    /// Release the in-flight flag after a failed page fetch.
    pub fn on_page_failed(&mut self, request: &FetchRequest) {
        if request.append
            && self.is_awaiting(request)
            && let Some(state) = self.state_mut(&request.path)
        {
            state.is_loading_more = false;
        }
    }

    /// Forget the active folder (navigation away, search results on screen).
    pub fn discard(&mut self) {
        self.generation += 1;
        self.active = None;
    }

    pub fn state(&self, path: &VirtualPath) -> Option<&PaginationState> {
        match &self.active {
            Some((active, state)) if active == path => Some(state),
            _ => None,
        }
    }

    pub fn active_path(&self) -> Option<&VirtualPath> {
        self.active.as_ref().map(|(path, _)| path)
    }

    pub fn is_loading_more(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|(_, state)| state.is_loading_more)
    }

    /// Scroll trigger: close to the bottom, nothing in flight, more to load.
    pub fn should_load_more(&self, path: &VirtualPath, metrics: &ScrollMetrics) -> bool {
        let Some(state) = self.state(path) else {
            return false;
        };
        metrics.distance_to_bottom() < self.scroll_threshold_px
            && !state.is_loading_more
            && state.has_more()
    }

    fn state_mut(&mut self, path: &VirtualPath) -> Option<&mut PaginationState> {
        match &mut self.active {
            Some((active, state)) if active == path => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;

    fn controller(page_size: u32) -> PaginationController {
        PaginationController::new(&BrowserConfig {
            page_size,
            ..Default::default()
        })
    }

    fn page(start: usize, count: usize, total: usize) -> DirectoryListing {
        DirectoryListing {
            files: (start..start + count)
                .map(|i| Entry::file(i as u64, &format!("f{i}"), None))
                .collect(),
            total: Some(total),
            ..Default::default()
        }
    }

    #[test]
    fn test_start_fresh_resets() {
        let mut pager = controller(50);
        let docs = VirtualPath::parse("/docs");

        let first = pager.start_fresh(&docs);
        assert_eq!((first.page, first.append, first.page_size), (1, false, 50));
        pager.on_page_result(&first, &page(0, 50, 120));
        assert_eq!(pager.state(&docs).unwrap().loaded_count, 50);

        pager.start_fresh(&docs);
        let state = pager.state(&docs).unwrap();
        assert_eq!((state.page, state.loaded_count), (1, 0));
        assert!(!state.is_loading_more);
    }

    #[test]
    fn test_loaded_count_is_sum_of_pages() {
        let mut pager = controller(50);
        let docs = VirtualPath::parse("/docs");

        let first = pager.start_fresh(&docs);
        let mut received = pager.on_page_result(&first, &page(0, 50, 120));
        for (start, count) in [(50, 50), (100, 20)] {
            let next = pager.request_next_page(&docs).expect("more pages remain");
            received += pager.on_page_result(&next, &page(start, count, 120));
            let state = pager.state(&docs).unwrap();
            assert_eq!(state.loaded_count, received);
            assert!(state.loaded_count <= state.total_items);
        }

        let state = pager.state(&docs).unwrap();
        assert_eq!((state.page, state.loaded_count, state.total_items), (3, 120, 120));
        assert!(pager.request_next_page(&docs).is_none());
    }

    #[test]
    fn test_reentrancy_guard() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 30));

        let second = pager.request_next_page(&docs).unwrap();
        assert_eq!(second.page, 2);
        assert!(pager.is_loading_more());

        assert!(pager.request_next_page(&docs).is_none());
        assert_eq!(pager.state(&docs).unwrap().page, 1);

        pager.on_page_result(&second, &page(10, 10, 30));
        assert_eq!(pager.request_next_page(&docs).unwrap().page, 3);
    }

    #[test]
    fn test_failed_page_releases_guard() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 30));

        let second = pager.request_next_page(&docs).unwrap();
        pager.on_page_failed(&second);
        let retry = pager.request_next_page(&docs).unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn test_other_path_is_noop() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 30));

        assert!(pager.request_next_page(&VirtualPath::parse("/music")).is_none());
    }

    #[test]
    fn test_stale_append_after_fresh_load_is_ignored() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 30));
        let second = pager.request_next_page(&docs).unwrap();

        let reload = pager.start_fresh(&docs);
        assert!(!pager.is_awaiting(&second));
        assert_eq!(pager.on_page_result(&second, &page(10, 10, 30)), 0);

        pager.on_page_result(&reload, &page(0, 10, 30));
        assert_eq!(pager.state(&docs).unwrap().loaded_count, 10);
    }

    #[test]
    fn test_superseded_fresh_load_is_not_awaited() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let music = VirtualPath::parse("/music");

        let to_docs = pager.start_fresh(&docs);
        pager.start_fresh(&music);
        let back_to_docs = pager.start_fresh(&docs);

        assert!(!pager.is_awaiting(&to_docs));
        assert!(pager.is_awaiting(&back_to_docs));
    }

    #[test]
    fn test_seed_from_cached_page() {
        let mut pager = controller(50);
        let docs = VirtualPath::parse("/docs");
        pager.seed(&docs, &page(0, 50, 75));

        let state = pager.state(&docs).unwrap();
        assert_eq!((state.page, state.loaded_count, state.total_items), (1, 50, 75));
        assert_eq!(pager.request_next_page(&docs).unwrap().page, 2);
    }

    #[test]
    fn test_under_reported_total_is_raised() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 4));

        let state = pager.state(&docs).unwrap();
        assert_eq!((state.loaded_count, state.total_items), (10, 10));
    }

    #[test]
    fn test_empty_folder() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &DirectoryListing::default());

        let state = pager.state(&docs).unwrap();
        assert_eq!(state.total_items, 0);
        assert!(!state.has_more());
        assert!(pager.request_next_page(&docs).is_none());
    }

    #[test]
    fn test_scroll_trigger() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.on_page_result(&first, &page(0, 10, 30));

        let near_bottom = ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 850.0,
            client_height: 100.0,
        };
        let far_away = ScrollMetrics {
            scroll_top: 100.0,
            ..near_bottom
        };
        assert_eq!(near_bottom.distance_to_bottom(), 50.0);
        assert!(pager.should_load_more(&docs, &near_bottom));
        assert!(!pager.should_load_more(&docs, &far_away));

        pager.request_next_page(&docs);
        assert!(!pager.should_load_more(&docs, &near_bottom));
    }

    #[test]
    fn test_discard() {
        let mut pager = controller(10);
        let docs = VirtualPath::parse("/docs");
        let first = pager.start_fresh(&docs);
        pager.discard();

        assert!(pager.active_path().is_none());
        assert!(!pager.is_awaiting(&first));
    }
}
