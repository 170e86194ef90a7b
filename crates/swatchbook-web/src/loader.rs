#![forbid(unsafe_code)]

//! Theme document fetch.

use swatchbook_core::{Result, ShowcaseError, ThemeDocument};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Fetch and parse the theme document at `path` (relative to the page).
///
/// One attempt, no retry. Network errors, non-2xx statuses, and malformed
/// payloads all come back as errors for the caller to log.
pub(crate) async fn fetch_document(window: &Window, path: &str) -> Result<ThemeDocument> {
    let fail = |err: JsValue| ShowcaseError::fetch(path, js_error_message(&err));

    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(fail)?
        .dyn_into()
        .map_err(fail)?;
    if !response.ok() {
        return Err(ShowcaseError::fetch(
            path,
            format!("HTTP {} {}", response.status(), response.status_text()),
        ));
    }
    let body = JsFuture::from(response.text().map_err(fail)?)
        .await
        .map_err(fail)?
        .as_string()
        .ok_or_else(|| ShowcaseError::fetch(path, "response body is not text"))?;
    debug!(path, bytes = body.len(), "theme document fetched");
    ThemeDocument::from_json_str(&body)
}

/// Best-effort human-readable text for a thrown JS value.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}
