//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Storage, Url, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Offer a text blob as a browser download via a synthetic anchor click.
///
/// Returns `true` when the download was handed to the browser.
pub fn download_text(filename: &str, content: &str, mime: &str) -> bool {
    let Some(document) = window().and_then(|w| w.document()) else {
        return false;
    };

    let parts = Array::new();
    parts.push(&JsValue::from_str(content));
    let props = BlobPropertyBag::new();
    props.set_type(mime);
    let Ok(blob) = Blob::new_with_str_sequence_and_options(&parts, &props) else {
        return false;
    };
    let Ok(url) = Url::create_object_url_with_blob(&blob) else {
        return false;
    };

    let anchor = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok());
    let Some(anchor) = anchor else {
        let _ = Url::revoke_object_url(&url);
        return false;
    };

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    let _ = Url::revoke_object_url(&url);
    true
}
