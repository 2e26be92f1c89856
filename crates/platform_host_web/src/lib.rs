//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for the image upload screen: the
//! IndexedDB image store, the `localStorage` staging slot, the `fetch` game backend, image
//! preloading, and picker file reading. Every browser call goes through `bridge`, which pairs
//! the wasm bindings with a non-wasm fallback so the crate builds and tests on native targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories.
pub mod adapters;
pub mod api;
mod bridge;
pub mod files;
pub mod preload;
pub mod storage;

pub use adapters::{
    build_host_services, game_api, host_strategy_name, image_store, selected_host_strategy,
    staging_store, GameApiAdapter, ImageStoreAdapter, StagingStoreAdapter,
};
pub use api::{WebGameApi, DEFAULT_REQUEST_TIMEOUT_MS};
pub use files::read_file_list;
pub use preload::WebImagePreloader;
pub use storage::indexed_db::WebImageStore;
pub use storage::local_staging::WebStagingStore;
