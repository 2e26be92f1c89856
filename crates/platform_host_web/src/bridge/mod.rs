//! Browser capability bridge for `platform_host_web` service adapters.
//!
//! Split by domain (images, HTTP, preloading) over the `interop` transport layer, which holds
//! the wasm bindings and the non-wasm fallback shim.

mod interop;

use platform_host::{CandidateFile, GameApiError, StoredImageRecord};
use serde_json::Value;

pub async fn images_add(record: &StoredImageRecord) -> Result<(), String> {
    interop::images_add(record).await
}

pub async fn upload_images(
    url: &str,
    session_id: &str,
    files: &[CandidateFile],
    timeout_ms: u32,
) -> Result<Value, GameApiError> {
    interop::upload_images(url, session_id, files, timeout_ms).await
}

pub async fn post_json(url: &str, payload: &Value, timeout_ms: u32) -> Result<Value, GameApiError> {
    interop::post_json(url, payload, timeout_ms).await
}

pub fn preload_image(url: &str) {
    interop::preload_image(url);
}
