//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] definition, the
//! explorer view state and application-level setup.

use std::rc::Rc;

use leptos::prelude::*;
use netdisk_core::wire::User;
use netdisk_core::{
    BrowserConfig, BrowserSession, Crumb, DepthIndicator, Entry, SelectionSet, ViewMode,
    VirtualPath,
};

use crate::components::Shell;
use crate::config::APP_NAME;
use crate::core::actions;
use crate::core::api::HttpFileService;
use crate::core::presenter::SignalPresenter;
use crate::models::{ContentState, ContextMenu, Dialog, Toast, UploadItem};
use crate::utils::storage;

/// The browsing session used by the whole app.
pub type Session = BrowserSession<HttpFileService, SignalPresenter>;

// ============================================================================
// ExplorerState
// ============================================================================

/// Explorer view state managed with Leptos signals.
///
/// The listing part (`content`, `entries`, `breadcrumb`, `depth`,
/// `current_path`) is written only by [`SignalPresenter`]; the rest is UI
/// state owned by components.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy.
#[derive(Clone, Copy)]
pub struct ExplorerState {
    pub content: RwSignal<ContentState>,
    /// Entries on screen: folders first, then files, pages appended.
    pub entries: RwSignal<Vec<Entry>>,
    pub breadcrumb: RwSignal<Vec<Crumb>>,
    pub depth: RwSignal<DepthIndicator>,
    pub current_path: RwSignal<VirtualPath>,
    pub selection: RwSignal<SelectionSet>,
    pub view_mode: RwSignal<ViewMode>,
    /// A "load more" request is in flight.
    pub loading_more: RwSignal<bool>,
    pub search: RwSignal<String>,
    /// Bumped on every keystroke; only the last debounced search runs.
    pub search_seq: StoredValue<u64>,
    pub context_menu: RwSignal<Option<ContextMenu>>,
    pub dialog: RwSignal<Dialog>,
    pub uploads: RwSignal<Vec<UploadItem>>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            content: RwSignal::new(ContentState::Loading),
            entries: RwSignal::new(Vec::new()),
            breadcrumb: RwSignal::new(VirtualPath::root().breadcrumb()),
            depth: RwSignal::new(DepthIndicator::default()),
            current_path: RwSignal::new(VirtualPath::root()),
            selection: RwSignal::new(SelectionSet::new()),
            view_mode: RwSignal::new(storage::view_mode()),
            loading_more: RwSignal::new(false),
            search: RwSignal::new(String::new()),
            search_seq: StoredValue::new(0),
            context_menu: RwSignal::new(None),
            dialog: RwSignal::new(Dialog::None),
            uploads: RwSignal::new(Vec::new()),
        }
    }

    /// Switch between grid and list, persisting the choice.
    pub fn toggle_view_mode(&self) {
        let next = match self.view_mode.get_untracked() {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
        self.view_mode.set(next);
        if let Err(err) = storage::save_view_mode(next) {
            tracing::warn!(error = %err, "view mode not persisted");
        }
    }

    pub fn open_dialog(&self, dialog: Dialog) {
        self.context_menu.set(None);
        self.dialog.set(dialog);
    }

    pub fn close_dialog(&self) {
        self.dialog.set(Dialog::None);
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// with `use_context::<AppContext>()`.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub explorer: ExplorerState,
    pub toasts: RwSignal<Vec<Toast>>,
    /// Logged-in user, `None` for guests.
    pub user: RwSignal<Option<User>>,
    pub site_title: RwSignal<String>,
    session: StoredValue<Rc<Session>, LocalStorage>,
}

impl AppContext {
    pub fn new() -> Self {
        let explorer = ExplorerState::new();
        let toasts = RwSignal::new(Vec::new());
        let presenter = SignalPresenter::new(explorer, toasts);
        let session = BrowserSession::new(HttpFileService, presenter, BrowserConfig::default());

        Self {
            explorer,
            toasts,
            user: RwSignal::new(None),
            site_title: RwSignal::new(APP_NAME.to_string()),
            session: StoredValue::new_local(Rc::new(session)),
        }
    }

    /// Shared handle to the session, for use inside `spawn_local`.
    pub fn session(&self) -> Rc<Session> {
        self.session.get_value()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Starts the first load (site config, auth check, root listing)
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);
    actions::bootstrap(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #f5f7fb;
                    color: #1f2937;
                    font-family: system-ui, sans-serif;
                ">
                    <h1 style="color: #dc2626; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="margin-bottom: 2rem; color: #6b7280;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| crate::utils::dom::reload_page()
                        style="
                            background: #2563eb;
                            color: white;
                            border: none;
                            padding: 0.75rem 2rem;
                            border-radius: 6px;
                            cursor: pointer;
                        "
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Shell />
        </ErrorBoundary>
    }
}
