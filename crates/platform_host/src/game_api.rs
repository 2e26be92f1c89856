//! Game backend HTTP contracts: image upload and game-room creation.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{encode_data_url, CandidateFile, ImageRecord};

/// Default upload endpoint path.
pub const UPLOAD_IMAGES_PATH: &str = "/api/upload-images";
/// Default game-room creation endpoint path.
pub const GAME_START_PATH: &str = "/api/game-start";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Endpoint URLs used by [`GameApi`] transports.
pub struct GameApiEndpoints {
    /// Multipart image upload endpoint.
    pub upload_images: String,
    /// JSON game-room creation endpoint.
    pub game_start: String,
}

impl Default for GameApiEndpoints {
    fn default() -> Self {
        Self {
            upload_images: UPLOAD_IMAGES_PATH.to_string(),
            game_start: GAME_START_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Success body of the upload endpoint.
pub struct UploadImagesResponse {
    /// Server-issued records in upload order.
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON body sent to the game-room creation endpoint.
pub struct GameStartRequest {
    /// Room id minted by the client.
    pub game_room_id: String,
    /// Session id of the uploading user.
    pub user_id: String,
    /// RFC 3339 start time.
    pub start_time: String,
}

/// Failure reported by a [`GameApi`] call.
///
/// `Network` and `Status` are kept apart because callers react to them differently: a
/// transport fault may be tolerated where an explicit server rejection is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameApiError {
    /// The request never produced a response (offline, CORS, aborted by timeout).
    Network {
        /// Transport error text.
        message: String,
    },
    /// The server answered with a non-success HTTP status.
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// A success response carried a body that could not be decoded.
    Decode {
        /// Decoder error text.
        message: String,
    },
}

impl GameApiError {
    /// Builds a [`GameApiError::Network`] value.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns whether this is a transport fault rather than a server answer.
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl std::fmt::Display for GameApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { message } => write!(f, "network error: {message}"),
            Self::Status { status } => write!(f, "server responded with status {status}"),
            Self::Decode { message } => write!(f, "invalid response body: {message}"),
        }
    }
}

impl std::error::Error for GameApiError {}

/// Object-safe boxed future used by [`GameApi`] async methods.
pub type GameApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Game backend service.
pub trait GameApi {
    /// Uploads a batch of files with the session id as one multipart request.
    fn upload_images<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
    ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>>;

    /// Creates a game room. The success body is returned undecoded.
    fn start_game<'a>(
        &'a self,
        request: &'a GameStartRequest,
    ) -> GameApiFuture<'a, Result<Value, GameApiError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Game API for hosts without a backend; every call is a network fault.
pub struct NoopGameApi;

impl GameApi for NoopGameApi {
    fn upload_images<'a>(
        &'a self,
        _session_id: &'a str,
        _files: &'a [CandidateFile],
    ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>> {
        Box::pin(async { Err(GameApiError::network("game backend unavailable")) })
    }

    fn start_game<'a>(
        &'a self,
        _request: &'a GameStartRequest,
    ) -> GameApiFuture<'a, Result<Value, GameApiError>> {
        Box::pin(async { Err(GameApiError::network("game backend unavailable")) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One upload observed by [`MemoryGameApi`].
pub struct RecordedUpload {
    /// Session id sent with the batch.
    pub session_id: String,
    /// Names of the uploaded files in request order.
    pub file_names: Vec<String>,
}

#[derive(Debug, Default)]
struct MemoryGameApiState {
    upload_responses: VecDeque<Result<UploadImagesResponse, GameApiError>>,
    start_responses: VecDeque<Result<Value, GameApiError>>,
    uploads: Vec<RecordedUpload>,
    start_requests: Vec<GameStartRequest>,
}

#[derive(Debug, Clone, Default)]
/// In-memory game backend.
///
/// Scripted responses are returned first, in the order they were queued. Once the queue is
/// empty, uploads answer with one unmodified data-URI record per file and room creation answers
/// `{"ok": true}`. Every call is recorded.
pub struct MemoryGameApi {
    state: Rc<RefCell<MemoryGameApiState>>,
}

impl MemoryGameApi {
    /// Queues the result of the next unscripted upload.
    pub fn push_upload_response(&self, response: Result<UploadImagesResponse, GameApiError>) {
        self.state.borrow_mut().upload_responses.push_back(response);
    }

    /// Queues the result of the next unscripted room creation.
    pub fn push_start_response(&self, response: Result<Value, GameApiError>) {
        self.state.borrow_mut().start_responses.push_back(response);
    }

    /// Returns every upload received so far.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.borrow().uploads.clone()
    }

    /// Returns every room-creation request received so far.
    pub fn start_requests(&self) -> Vec<GameStartRequest> {
        self.state.borrow().start_requests.clone()
    }
}

impl GameApi for MemoryGameApi {
    fn upload_images<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
    ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>> {
        Box::pin(async move {
            let mut state = self.state.borrow_mut();
            state.uploads.push(RecordedUpload {
                session_id: session_id.to_string(),
                file_names: files.iter().map(|file| file.name.clone()).collect(),
            });
            state.upload_responses.pop_front().unwrap_or_else(|| {
                Ok(UploadImagesResponse {
                    images: files
                        .iter()
                        .map(|file| {
                            ImageRecord::unmodified(encode_data_url(&file.mime_type, &file.bytes))
                        })
                        .collect(),
                })
            })
        })
    }

    fn start_game<'a>(
        &'a self,
        request: &'a GameStartRequest,
    ) -> GameApiFuture<'a, Result<Value, GameApiError>> {
        Box::pin(async move {
            let mut state = self.state.borrow_mut();
            state.start_requests.push(request.clone());
            state
                .start_responses
                .pop_front()
                .unwrap_or_else(|| Ok(json!({ "ok": true })))
        })
    }
}
