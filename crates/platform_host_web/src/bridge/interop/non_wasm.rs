use super::*;

fn unsupported() -> String {
    "Browser storage and network APIs are only available when compiled for wasm32".to_string()
}

pub async fn images_add(_record: &StoredImageRecord) -> Result<(), String> {
    Err(unsupported())
}

pub async fn upload_images(
    _url: &str,
    _session_id: &str,
    _files: &[CandidateFile],
    _timeout_ms: u32,
) -> Result<Value, GameApiError> {
    Err(GameApiError::network(unsupported()))
}

pub async fn post_json(
    _url: &str,
    _payload: &Value,
    _timeout_ms: u32,
) -> Result<Value, GameApiError> {
    Err(GameApiError::network(unsupported()))
}

pub fn preload_image(_url: &str) {}
