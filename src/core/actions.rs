//! User actions.
//!
//! Each function is called from an event handler, spawns the async work on
//! the UI thread and leaves rendering to the session's presenter. Only side
//! effects the engine does not know about (login dialog, clipboard, upload
//! panel, delayed reload) are handled here.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use netdisk_core::{
    BrowseError, Entry, EntryId, Notice, ScrollMetrics, ServiceErrorKind, UploadEvent,
    VirtualPath,
};
use tracing::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::core::api::{self, BrowserFile};
use crate::models::{Dialog, UploadItem, UploadStatus};
use crate::utils::{dom, storage};

/// React to errors the presenter cannot show on its own.
fn handle_error(ctx: AppContext, err: &BrowseError) {
    match err {
        BrowseError::Service(service) if service.kind == ServiceErrorKind::Unauthorized => {
            info!("session expired, asking for login");
            storage::clear_token();
            ctx.user.set(None);
            ctx.explorer.open_dialog(Dialog::Login);
        }
        BrowseError::InvalidName(invalid) => {
            ctx.session().notify(Notice::error(invalid.to_string()));
        }
        other => debug!(error = %other, "action ended without a listing"),
    }
}

// =============================================================================
// Startup
// =============================================================================

/// Site title, auth check, then the root listing.
pub fn bootstrap(ctx: AppContext) {
    spawn_local(async move {
        match api::site_config().await {
            Ok(config) => {
                if let Some(title) = config.site.title.filter(|t| !t.is_empty()) {
                    dom::set_title(&title);
                    ctx.site_title.set(title);
                }
            }
            Err(err) => debug!(error = %err, "site config unavailable"),
        }

        if storage::token().is_some() {
            match api::check_auth().await {
                Ok(user) => {
                    info!(user = %user.username, "restored login");
                    ctx.user.set(Some(user));
                }
                Err(err) => {
                    debug!(error = %err, "stored token rejected");
                    storage::clear_token();
                }
            }
        }

        let session = ctx.session();
        if let Err(err) = session.start(VirtualPath::root()).await {
            handle_error(ctx, &err);
        }
    });
}

// =============================================================================
// Navigation
// =============================================================================

pub fn navigate(ctx: AppContext, path: VirtualPath) {
    ctx.explorer.search.set(String::new());
    spawn_local(async move {
        if let Err(err) = ctx.session().navigate(path).await {
            handle_error(ctx, &err);
        }
    });
}

pub fn go_up(ctx: AppContext) {
    ctx.explorer.search.set(String::new());
    spawn_local(async move {
        if let Err(err) = ctx.session().navigate_up().await {
            handle_error(ctx, &err);
        }
    });
}

/// Refetch the current folder, bypassing the cache.
pub fn refresh(ctx: AppContext) {
    spawn_local(async move {
        if let Err(err) = ctx.session().invalidate_and_reload().await {
            handle_error(ctx, &err);
        }
    });
}

/// Double click: enter folders, download files.
pub fn open_entry(ctx: AppContext, entry: Entry) {
    if !entry.is_folder {
        download(ctx, entry);
        return;
    }

    ctx.explorer.search.set(String::new());
    spawn_local(async move {
        if let Err(err) = ctx.session().open_folder(&entry.name).await {
            handle_error(ctx, &err);
        }
    });
}

/// Scroll handler of the file area.
pub fn load_more(ctx: AppContext, metrics: ScrollMetrics) {
    let session = ctx.session();
    if session.is_loading_more() {
        return;
    }

    spawn_local(async move {
        ctx.explorer.loading_more.set(true);
        let outcome = session.maybe_scroll_more(metrics).await;
        ctx.explorer.loading_more.set(session.is_loading_more());
        match outcome {
            Ok(outcome) => debug!(?outcome, "scroll handled"),
            Err(err) => handle_error(ctx, &err),
        }
    });
}

pub fn toggle_selection(ctx: AppContext, id: EntryId) {
    let session = ctx.session();
    session.toggle_selection(&id);
    ctx.explorer.selection.set(session.selection());
}

// =============================================================================
// Search
// =============================================================================

/// Debounced search; an empty keyword restores the folder.
pub fn search(ctx: AppContext, keyword: String) {
    let seq = ctx.explorer.search_seq.get_value() + 1;
    ctx.explorer.search_seq.set_value(seq);

    spawn_local(async move {
        TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
        if ctx.explorer.search_seq.get_value() != seq {
            return;
        }
        if let Err(err) = ctx.session().search(&keyword).await {
            handle_error(ctx, &err);
        }
    });
}

// =============================================================================
// Mutations
// =============================================================================

pub fn create_folder(ctx: AppContext, name: String) {
    spawn_local(async move {
        match ctx.session().create_folder(&name).await {
            Ok(()) => ctx.explorer.close_dialog(),
            Err(err) => handle_error(ctx, &err),
        }
    });
}

pub fn delete_entry(ctx: AppContext, entry: Entry) {
    ctx.explorer.context_menu.set(None);
    let kind = if entry.is_folder { "folder" } else { "file" };
    if !dom::confirm(&format!("Delete {} \"{}\"?", kind, entry.name)) {
        return;
    }

    spawn_local(async move {
        if let Err(err) = ctx.session().delete_entry(&entry.name).await {
            handle_error(ctx, &err);
        }
    });
}

/// Upload `files` into the current folder, then reload after a short delay.
pub fn upload(ctx: AppContext, files: Vec<web_sys::File>) {
    if files.is_empty() {
        return;
    }

    let items = files
        .iter()
        .map(|file| UploadItem {
            name: file.name(),
            size: file.size() as u64,
            status: UploadStatus::Waiting,
        })
        .collect();
    ctx.explorer.uploads.set(items);

    let files: Vec<BrowserFile> = files.into_iter().map(BrowserFile).collect();
    spawn_local(async move {
        let session = ctx.session();
        let report = session
            .upload_files(&files, |index, event| {
                let status = match event {
                    UploadEvent::Started { .. } => UploadStatus::Uploading(0),
                    UploadEvent::Progress { percent } => UploadStatus::Uploading(percent),
                    UploadEvent::Finished => UploadStatus::Done,
                    UploadEvent::Failed { message } => {
                        session.notify(Notice::error(format!(
                            "{}: {}",
                            files[index].0.name(),
                            message
                        )));
                        UploadStatus::Failed(message)
                    }
                };
                ctx.explorer.uploads.update(|items| {
                    if let Some(item) = items.get_mut(index) {
                        item.status = status;
                    }
                });
            })
            .await;

        if report.succeeded() > 0 {
            session.notify(Notice::success(format!(
                "Uploaded {} file(s)",
                report.succeeded()
            )));
        }

        TimeoutFuture::new(session.config().reload_delay_ms).await;
        if report.failed() == 0 {
            ctx.explorer.uploads.set(Vec::new());
            ctx.explorer.close_dialog();
        }
        if let Err(err) = session.reload().await {
            handle_error(ctx, &err);
        }
    });
}

// =============================================================================
// Links
// =============================================================================

pub fn download(ctx: AppContext, entry: Entry) {
    ctx.explorer.context_menu.set(None);
    if entry.is_folder {
        return;
    }

    spawn_local(async move {
        let session = ctx.session();
        match session.download_url(&entry.name).await {
            Ok(url) => {
                if !dom::open_url(&url) {
                    warn!(name = %entry.name, "download window blocked");
                    session.notify(Notice::error("Download blocked by the browser"));
                }
            }
            Err(err) => handle_error(ctx, &err),
        }
    });
}

/// Create a share link and copy it to the clipboard.
pub fn share(ctx: AppContext, entry: Entry) {
    ctx.explorer.context_menu.set(None);
    spawn_local(async move {
        let session = ctx.session();
        match session.share(&entry.name).await {
            Ok(url) => {
                if dom::copy_to_clipboard(&url).await {
                    session.notify(Notice::success("Share link copied to clipboard"));
                } else {
                    session.notify(Notice::info(format!("Share link: {}", url)));
                }
            }
            Err(err) => handle_error(ctx, &err),
        }
    });
}

// =============================================================================
// Authentication
// =============================================================================

/// `error` receives the message shown inside the login dialog.
pub fn login(
    ctx: AppContext,
    username: String,
    password: String,
    error: RwSignal<Option<String>>,
) {
    spawn_local(async move {
        match api::login(&username, &password).await {
            Ok(data) => {
                if let Err(err) = storage::save_token(&data.token) {
                    warn!(error = %err, "token not persisted");
                }
                info!(user = %data.user.username, "logged in");
                ctx.user.set(Some(data.user));
                error.set(None);
                ctx.explorer.close_dialog();

                let session = ctx.session();
                session.notify(Notice::success("Logged in"));
                if let Err(err) = session.invalidate_and_reload().await {
                    handle_error(ctx, &err);
                }
            }
            Err(err) => error.set(Some(err.message)),
        }
    });
}

pub fn logout(ctx: AppContext) {
    spawn_local(async move {
        if let Err(err) = api::logout().await {
            debug!(error = %err, "logout request failed");
        }
        storage::clear_token();
        ctx.user.set(None);

        let session = ctx.session();
        session.notify(Notice::info("Logged out"));
        if let Err(err) = session.invalidate_and_reload().await {
            handle_error(ctx, &err);
        }
    });
}
