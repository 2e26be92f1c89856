//! Typed host-domain contracts and shared models for the image upload screen.
//!
//! This crate is the API-first boundary for platform services. It exposes the image record
//! shapes, the keyed local image store, the staging slot, the game backend contract, and
//! preloading, each with in-memory adapters. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod files;
pub mod game_api;
pub mod host;
pub mod images;
pub mod storage;
pub mod time;

pub use files::{
    encode_data_url, CandidateFile, DataUrlImageDecoder, ImageDecodeFuture, ImageDecoder,
};
pub use game_api::{
    GameApi, GameApiEndpoints, GameApiError, GameApiFuture, GameStartRequest, MemoryGameApi,
    NoopGameApi, RecordedUpload, UploadImagesResponse, GAME_START_PATH, UPLOAD_IMAGES_PATH,
};
pub use host::{HostServices, HostStrategy};
pub use images::{
    ImagePreloader, ImageRecord, ImageStore, ImageStoreFuture, MemoryImagePreloader,
    MemoryImageStore, NoopImagePreloader, NoopImageStore, StoredImageRecord, IMAGE_DB_NAME,
    IMAGE_DB_VERSION, IMAGE_STORE_NAME,
};
pub use storage::staging::{
    load_staged_game_room_id, stage_game_room_id, MemoryStagingStore, NoopStagingStore,
    StagingStore, StagingStoreFuture, CURRENT_GAME_ROOM_ID_KEY,
};
pub use time::{iso8601_from_unix_ms, iso8601_now, next_monotonic_timestamp_ms, unix_time_ms_now};
