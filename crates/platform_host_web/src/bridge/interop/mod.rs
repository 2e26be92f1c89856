//! Shared transport interop for browser bridge domains.
//!
//! Routes calls to the `wasm32` implementation or to the non-wasm fallback while keeping one
//! API for the bridge facade.

use platform_host::{CandidateFile, GameApiError, StoredImageRecord};
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn images_add(record: &StoredImageRecord) -> Result<(), String> {
    imp::images_add(record).await
}

pub async fn upload_images(
    url: &str,
    session_id: &str,
    files: &[CandidateFile],
    timeout_ms: u32,
) -> Result<Value, GameApiError> {
    imp::upload_images(url, session_id, files, timeout_ms).await
}

pub async fn post_json(url: &str, payload: &Value, timeout_ms: u32) -> Result<Value, GameApiError> {
    imp::post_json(url, payload, timeout_ms).await
}

pub fn preload_image(url: &str) {
    imp::preload_image(url);
}
