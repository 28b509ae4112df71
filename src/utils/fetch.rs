//! Network utilities with timeout support.
//!
//! JSON requests go through the Fetch API raced against a timeout; uploads
//! use `XMLHttpRequest` because Fetch reports no upload progress. Both attach
//! the stored login token as a bearer header.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, ProgressEvent, Request, RequestInit, RequestMode, Response, XmlHttpRequest};

use crate::config::{FETCH_TIMEOUT_MS, UPLOAD_POLL_MS};
use crate::core::error::FetchError;
use crate::utils::storage;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout.
///
/// # Returns
/// * `RaceResult::Completed` if promise resolves before timeout
/// * `RaceResult::TimedOut` if timeout occurs first
/// * `RaceResult::Error` if promise rejects
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Create timeout promise that resolves to undefined
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// URL Helpers
// =============================================================================

/// Build `base?k1=v1&k2=v2` with URI-encoded values.
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| {
            let value: String = js_sys::encode_uri_component(value).into();
            format!("{}={}", key, value)
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

fn auth_header() -> Option<String> {
    storage::token().map(|token| format!("Bearer {}", token))
}

// =============================================================================
// JSON Requests
// =============================================================================

/// Send a request and parse the JSON response body.
///
/// Error statuses are still parsed when the body is JSON (the drive API
/// answers 401/403 with an envelope); otherwise they become
/// [`FetchError::HttpError`].
pub async fn request_json<T: DeserializeOwned>(
    method: &str,
    url: &str,
    body: Option<String>,
) -> Result<T, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    let _ = headers.set("Accept", "application/json");
    if let Some(auth) = auth_header() {
        let _ = headers.set("Authorization", &auth);
    }

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::SameOrigin);
    if let Some(body) = body {
        let _ = headers.set("Content-Type", "application/json");
        opts.set_body(&JsValue::from_str(&body));
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result
                .dyn_into()
                .map_err(|_| FetchError::ResponseReadFailed)?;

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?
                .as_string()
                .ok_or(FetchError::ResponseReadFailed)?;

            parse_body(resp.status(), &text)
        }
    }
}

fn parse_body<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, FetchError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) if !(200..300).contains(&status) => Err(FetchError::HttpError(status)),
        Err(e) => Err(FetchError::JsonParseError(e.to_string())),
    }
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    request_json("GET", url, None).await
}

pub async fn post_json<T: DeserializeOwned>(url: &str, body: String) -> Result<T, FetchError> {
    request_json("POST", url, Some(body)).await
}

pub async fn delete_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    request_json("DELETE", url, None).await
}

// =============================================================================
// Uploads
// =============================================================================

#[derive(Default)]
struct XhrState {
    percent: Option<u8>,
    finished: Option<Result<(), FetchError>>,
}

/// POST a multipart form, reporting upload progress in percent.
///
/// The transfer runs in the browser; this future polls its state every
/// `UPLOAD_POLL_MS` and forwards progress changes to `on_progress`.
pub async fn upload_form<T: DeserializeOwned>(
    url: &str,
    form: &FormData,
    on_progress: &mut dyn FnMut(u8),
) -> Result<T, FetchError> {
    let xhr = XmlHttpRequest::new().map_err(|_| FetchError::RequestCreationFailed)?;
    xhr.open_with_async("POST", url, true)
        .map_err(|_| FetchError::RequestCreationFailed)?;
    if let Some(auth) = auth_header() {
        let _ = xhr.set_request_header("Authorization", &auth);
    }

    let state = Rc::new(RefCell::new(XhrState::default()));

    let progress_cb = {
        let state = state.clone();
        Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            if event.length_computable() && event.total() > 0.0 {
                let percent = (event.loaded() / event.total() * 100.0).round();
                state.borrow_mut().percent = Some(percent.clamp(0.0, 100.0) as u8);
            }
        })
    };
    let load_cb = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            state.borrow_mut().finished = Some(Ok(()));
        })
    };
    let error_cb = {
        let state = state.clone();
        Closure::<dyn FnMut()>::new(move || {
            state.borrow_mut().finished =
                Some(Err(FetchError::NetworkError("upload interrupted".to_string())));
        })
    };

    let upload = xhr.upload().map_err(|_| FetchError::RequestCreationFailed)?;
    upload.set_onprogress(Some(progress_cb.as_ref().unchecked_ref()));
    xhr.set_onload(Some(load_cb.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(error_cb.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(error_cb.as_ref().unchecked_ref()));

    xhr.send_with_opt_form_data(Some(form))
        .map_err(|_| FetchError::NetworkError("upload could not start".to_string()))?;

    let mut reported = None;
    let outcome = loop {
        TimeoutFuture::new(UPLOAD_POLL_MS).await;
        let (percent, finished) = {
            let mut state = state.borrow_mut();
            (state.percent, state.finished.take())
        };
        if percent != reported
            && let Some(percent) = percent
        {
            on_progress(percent);
            reported = Some(percent);
        }
        if let Some(finished) = finished {
            break finished;
        }
    };

    upload.set_onprogress(None);
    xhr.set_onload(None);
    xhr.set_onerror(None);
    xhr.set_onabort(None);
    outcome?;

    let status = xhr.status().unwrap_or(0);
    let text = xhr.response_text().ok().flatten().unwrap_or_default();
    parse_body(status, &text)
}
