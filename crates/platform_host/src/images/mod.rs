//! Image-domain contracts: staged image records, the keyed local image store, and preloading.

mod preload;
mod record;
mod store;

pub use preload::{ImagePreloader, MemoryImagePreloader, NoopImagePreloader};
pub use record::{
    ImageRecord, StoredImageRecord, IMAGE_DB_NAME, IMAGE_DB_VERSION, IMAGE_STORE_NAME,
};
pub use store::{ImageStore, ImageStoreFuture, MemoryImageStore, NoopImageStore};
