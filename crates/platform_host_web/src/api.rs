//! `fetch`-backed game backend implementation.

use platform_host::{
    CandidateFile, GameApi, GameApiEndpoints, GameApiError, GameApiFuture, GameStartRequest,
    UploadImagesResponse,
};
use serde_json::Value;

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Browser game backend using `fetch`, aborted after `timeout_ms`.
///
/// A timed-out request surfaces as [`GameApiError::Network`].
pub struct WebGameApi {
    endpoints: GameApiEndpoints,
    timeout_ms: u32,
}

impl WebGameApi {
    /// Creates a transport for `endpoints` with a per-request timeout. Zero disables the timeout.
    pub fn new(endpoints: GameApiEndpoints, timeout_ms: u32) -> Self {
        Self {
            endpoints,
            timeout_ms,
        }
    }
}

impl Default for WebGameApi {
    fn default() -> Self {
        Self::new(GameApiEndpoints::default(), DEFAULT_REQUEST_TIMEOUT_MS)
    }
}

impl GameApi for WebGameApi {
    fn upload_images<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
    ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>> {
        Box::pin(async move {
            let body = crate::bridge::upload_images(
                &self.endpoints.upload_images,
                session_id,
                files,
                self.timeout_ms,
            )
            .await?;
            decode_upload_response(body)
        })
    }

    fn start_game<'a>(
        &'a self,
        request: &'a GameStartRequest,
    ) -> GameApiFuture<'a, Result<Value, GameApiError>> {
        Box::pin(async move {
            let payload = serde_json::to_value(request).map_err(|err| GameApiError::Decode {
                message: err.to_string(),
            })?;
            crate::bridge::post_json(&self.endpoints.game_start, &payload, self.timeout_ms).await
        })
    }
}

fn decode_upload_response(body: Value) -> Result<UploadImagesResponse, GameApiError> {
    serde_json::from_value(body).map_err(|err| GameApiError::Decode {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[test]
    fn upload_body_without_images_is_a_decode_error() {
        let err = decode_upload_response(json!({"status": "ok"})).expect_err("missing images");
        assert!(matches!(err, GameApiError::Decode { .. }));

        let ok = decode_upload_response(json!({
            "images": [{"original": "https://a", "modified": "https://b"}]
        }))
        .expect("valid body");
        assert_eq!(ok.images[0].modified, "https://b");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn non_wasm_web_game_api_reports_network_faults() {
        let api = WebGameApi::default();
        let request = GameStartRequest {
            game_room_id: "room_1".to_string(),
            user_id: "s".to_string(),
            start_time: "1970-01-01T00:00:00.000Z".to_string(),
        };
        assert!(block_on(api.start_game(&request))
            .expect_err("no fetch off wasm")
            .is_network());
    }
}
