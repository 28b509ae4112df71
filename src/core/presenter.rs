//! Leptos-side [`Presenter`]: every engine callback becomes a signal write.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use netdisk_core::{
    Crumb, DenialSource, DepthDenial, DepthIndicator, DirectoryListing, Notice, NoticeLevel,
    Presenter, SelectionSet,
};
use wasm_bindgen_futures::spawn_local;

use crate::app::ExplorerState;
use crate::config::TOAST_DURATION_MS;
use crate::models::{ContentState, Toast};

pub struct SignalPresenter {
    explorer: ExplorerState,
    toasts: RwSignal<Vec<Toast>>,
    next_toast_id: u64,
}

impl SignalPresenter {
    pub fn new(explorer: ExplorerState, toasts: RwSignal<Vec<Toast>>) -> Self {
        Self {
            explorer,
            toasts,
            next_toast_id: 0,
        }
    }

    fn clear_entries(&self) {
        self.explorer.entries.set(Vec::new());
        self.explorer.selection.set(SelectionSet::new());
    }

    /// Show a toast and schedule its removal.
    fn push_toast(&mut self, level: NoticeLevel, message: String) {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        let toasts = self.toasts;
        toasts.update(|t| t.push(Toast { id, level, message }));

        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            toasts.update(|t| t.retain(|toast| toast.id != id));
        });
    }
}

impl Presenter for SignalPresenter {
    fn render_loading(&mut self) {
        self.clear_entries();
        self.explorer.content.set(ContentState::Loading);
    }

    fn render_listing(&mut self, listing: &DirectoryListing, append: bool) {
        if append {
            self.explorer
                .entries
                .update(|entries| entries.extend(listing.entries().cloned()));
            return;
        }

        self.explorer
            .entries
            .set(listing.entries().cloned().collect());
        self.explorer.selection.set(SelectionSet::new());
        self.explorer.content.set(ContentState::Listing);
    }

    fn render_depth_indicator(&mut self, indicator: DepthIndicator) {
        self.explorer.depth.set(indicator);
    }

    fn render_error_state(&mut self, message: &str) {
        self.clear_entries();
        self.explorer
            .content
            .set(ContentState::Error(message.to_string()));
    }

    fn render_empty_state(&mut self) {
        self.clear_entries();
        self.explorer.content.set(ContentState::Empty);
    }

    fn render_depth_denied(&mut self, denial: &DepthDenial) {
        match denial.source {
            // The current folder stays on screen.
            DenialSource::Local => {
                self.push_toast(NoticeLevel::Warning, denial.message.clone());
            }
            DenialSource::Server => {
                self.clear_entries();
                self.explorer
                    .content
                    .set(ContentState::DepthDenied(denial.clone()));
                self.push_toast(NoticeLevel::Error, denial.message.clone());
            }
        }
    }

    fn update_breadcrumb(&mut self, crumbs: &[Crumb]) {
        if let Some(last) = crumbs.last() {
            self.explorer.current_path.set(last.path.clone());
        }
        self.explorer.breadcrumb.set(crumbs.to_vec());
    }

    fn notify(&mut self, notice: Notice) {
        self.push_toast(notice.level, notice.message);
    }
}
