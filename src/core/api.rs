//! HTTP client for the drive API.
//!
//! [`HttpFileService`] implements the engine's [`FileService`] on top of the
//! `/api` endpoints; login, auth check and site config are plain functions.

use async_trait::async_trait;
use netdisk_core::wire::{
    CreateFolderRequest, DownloadData, Envelope, ErrorScope, ListingData, LoginData,
    LoginRequest, PathRequest, ShareData, SiteConfig, User,
};
use netdisk_core::{DirectoryListing, FileService, ServiceError, UploadPayload, VirtualPath};
use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::FormData;

use crate::config::API_BASE;
use crate::core::error::FetchError;
use crate::utils::fetch::{delete_json, get_json, post_json, upload_form, with_query};

fn endpoint(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

fn to_body<B: Serialize>(body: &B) -> Result<String, ServiceError> {
    serde_json::to_string(body).map_err(|e| ServiceError::other(e.to_string()))
}

/// Unwrap a transport result and its envelope.
fn settle<T>(
    result: Result<Envelope<T>, FetchError>,
    scope: ErrorScope,
) -> Result<Option<T>, ServiceError> {
    result
        .map_err(|err| err.into_service_error(scope))?
        .into_result(scope)
}

fn settle_data<T>(
    result: Result<Envelope<T>, FetchError>,
    scope: ErrorScope,
) -> Result<T, ServiceError> {
    settle(result, scope)?.ok_or_else(|| ServiceError::other("response carried no data"))
}

async fn get<T: DeserializeOwned>(url: &str, scope: ErrorScope) -> Result<T, ServiceError> {
    settle_data(get_json::<Envelope<T>>(url).await, scope)
}

/// A file picked by the user, ready to upload.
#[derive(Clone, Debug)]
pub struct BrowserFile(pub web_sys::File);

impl UploadPayload for BrowserFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn byte_len(&self) -> u64 {
        self.0.size() as u64
    }
}

/// Drive API over `fetch`/`XMLHttpRequest`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFileService;

#[async_trait(?Send)]
impl FileService for HttpFileService {
    type Payload = BrowserFile;

    async fn list_files(
        &self,
        path: &VirtualPath,
        page: u32,
        page_size: u32,
    ) -> Result<DirectoryListing, ServiceError> {
        let url = with_query(
            &endpoint("/list"),
            &[
                ("path", path.as_str()),
                ("page", page.to_string().as_str()),
                ("page_size", page_size.to_string().as_str()),
            ],
        );
        let data: ListingData = get(&url, ErrorScope::Listing).await?;
        Ok(data.into())
    }

    async fn create_folder(&self, parent: &VirtualPath, name: &str) -> Result<(), ServiceError> {
        let body = to_body(&CreateFolderRequest {
            parent_path: parent.as_str(),
            name,
        })?;
        let result = post_json::<Envelope<serde_json::Value>>(&endpoint("/folder"), body).await;
        settle(result, ErrorScope::General).map(|_| ())
    }

    async fn delete_entry(&self, path: &VirtualPath) -> Result<(), ServiceError> {
        let url = with_query(&endpoint("/files"), &[("path", path.as_str())]);
        let result = delete_json::<Envelope<serde_json::Value>>(&url).await;
        settle(result, ErrorScope::General).map(|_| ())
    }

    async fn search(
        &self,
        keyword: &str,
        scope: &VirtualPath,
    ) -> Result<DirectoryListing, ServiceError> {
        let url = with_query(
            &endpoint("/search"),
            &[("keyword", keyword), ("path", scope.as_str())],
        );
        let data: ListingData = get(&url, ErrorScope::General).await?;
        Ok(data.into())
    }

    async fn upload(
        &self,
        dir: &VirtualPath,
        payload: &BrowserFile,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<(), ServiceError> {
        let form = FormData::new().map_err(|_| ServiceError::other("cannot build upload form"))?;
        form.append_with_blob_and_filename("file", &payload.0, &payload.0.name())
            .and_then(|_| form.append_with_str("path", dir.as_str()))
            .map_err(|_| ServiceError::other("cannot build upload form"))?;

        let result =
            upload_form::<Envelope<serde_json::Value>>(&endpoint("/upload"), &form, on_progress)
                .await;
        settle(result, ErrorScope::General).map(|_| ())
    }

    async fn download_url(&self, path: &VirtualPath) -> Result<String, ServiceError> {
        let url = with_query(&endpoint("/download"), &[("path", path.as_str())]);
        let data: DownloadData = get(&url, ErrorScope::General).await?;
        Ok(data.url)
    }

    async fn share(&self, path: &VirtualPath) -> Result<String, ServiceError> {
        let body = to_body(&PathRequest {
            path: path.as_str(),
        })?;
        let result = post_json::<Envelope<ShareData>>(&endpoint("/share"), body).await;
        settle_data(result, ErrorScope::General).map(|data| data.share_url)
    }
}

// =============================================================================
// Session & Site
// =============================================================================

/// Exchange credentials for a token.
pub async fn login(username: &str, password: &str) -> Result<LoginData, ServiceError> {
    let body = to_body(&LoginRequest { username, password })?;
    let result = post_json::<Envelope<LoginData>>(&endpoint("/auth/login"), body).await;
    settle_data(result, ErrorScope::General)
}

/// Who the stored token belongs to.
pub async fn check_auth() -> Result<User, ServiceError> {
    get(&endpoint("/auth/check"), ErrorScope::General).await
}

pub async fn logout() -> Result<(), ServiceError> {
    let result = post_json::<Envelope<serde_json::Value>>(&endpoint("/auth/logout"), "{}".into())
        .await;
    settle(result, ErrorScope::General).map(|_| ())
}

pub async fn site_config() -> Result<SiteConfig, ServiceError> {
    get(&endpoint("/config"), ErrorScope::General).await
}
