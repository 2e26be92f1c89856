//! IndexedDB-backed image store implementation.
//!
//! The `HiddenCatchDB` database and its `images` object store are created on first open; every
//! call runs in its own transaction.

use platform_host::{ImageStore, ImageStoreFuture, StoredImageRecord};

#[derive(Debug, Clone, Copy, Default)]
/// Browser image store backed by IndexedDB.
pub struct WebImageStore;

impl ImageStore for WebImageStore {
    fn add_image<'a>(
        &'a self,
        record: &'a StoredImageRecord,
    ) -> ImageStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::images_add(record).await })
    }
}
