//! Network fetching utilities with timeout support.
//!
//! Thin wrappers over the browser Fetch API. Every request races a timeout
//! promise so a stalled network never wedges the UI.

use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;

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
/// Implements timeout behavior for any JavaScript Promise using
/// `Promise.race`. The timeout promise resolves to `undefined`, which is
/// how a timeout is told apart from a completed fetch.
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

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
// Fetch Functions
// =============================================================================

/// Fetch text from a URL, failing on non-2xx statuses.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    fetch_text_with_headers(url, &[]).await
}

/// Fetch text with extra request headers, failing on non-2xx statuses.
pub async fn fetch_text_with_headers(
    url: &str,
    headers: &[(&str, &str)],
) -> Result<String, FetchError> {
    let resp = send(url, "GET", headers).await?;
    if !resp.ok() {
        return Err(FetchError::Http(resp.status()));
    }
    read_text(&resp).await
}

/// Fetch and parse JSON from a URL.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let text = fetch_text(url).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))
}

/// Fetch and parse JSON with extra request headers.
pub async fn fetch_json_with_headers<T: DeserializeOwned>(
    url: &str,
    headers: &[(&str, &str)],
) -> Result<T, FetchError> {
    let text = fetch_text_with_headers(url, headers).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParse(e.to_string()))
}

/// Fetch a URL without the non-2xx short circuit.
///
/// Returns the status code together with the body so callers can inspect
/// error envelopes the server attaches to failures.
pub async fn fetch_response(
    url: &str,
    headers: &[(&str, &str)],
) -> Result<(u16, String), FetchError> {
    let resp = send(url, "GET", headers).await?;
    let status = resp.status();
    // Error bodies are diagnostics only; an unreadable one becomes empty.
    let body = read_text(&resp).await.unwrap_or_default();
    Ok((status, body))
}

/// Issue a HEAD request and report the response status.
pub async fn probe_status(url: &str) -> Result<u16, FetchError> {
    let resp = send(url, "HEAD", &[]).await?;
    Ok(resp.status())
}

/// Build and dispatch a request, racing it against `FETCH_TIMEOUT_MS`.
async fn send(url: &str, method: &str, headers: &[(&str, &str)]) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    if !headers.is_empty() {
        let header_map = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
        for (name, value) in headers {
            header_map
                .append(name, value)
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }
        opts.set_headers(header_map.as_ref());
    }

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::Network(msg)),
        RaceResult::Completed(result) => {
            result.dyn_into().map_err(|_| FetchError::InvalidContent)
        }
    }
}

async fn read_text(resp: &Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    text.as_string().ok_or(FetchError::InvalidContent)
}
