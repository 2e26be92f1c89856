//! Host service bundle handed to the upload screen.

use std::rc::Rc;

use crate::{
    DataUrlImageDecoder, GameApi, ImageDecoder, ImagePreloader, ImageStore, MemoryGameApi,
    MemoryImagePreloader, MemoryImageStore, MemoryStagingStore, StagingStore,
};

/// Host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed adapters (IndexedDB, `localStorage`, `fetch`).
    Browser,
    /// In-memory adapters for headless builds and tests.
    Stub,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

/// Runtime-selected host services injected into the upload screen.
///
/// All environment-specific selection happens before this bundle reaches the screen, so the
/// workflow never imports browser adapter types.
#[derive(Clone)]
pub struct HostServices {
    /// Keyed local image store.
    pub images: Rc<dyn ImageStore>,
    /// Durable staging slot for the next screen.
    pub staging: Rc<dyn StagingStore>,
    /// Game backend transport.
    pub game_api: Rc<dyn GameApi>,
    /// File-to-URI decoder used for previews and local records.
    pub decoder: Rc<dyn ImageDecoder>,
    /// Fire-and-forget image preloader.
    pub preloader: Rc<dyn ImagePreloader>,
    /// Strategy the bundle was built for.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle from in-memory adapters.
    pub fn in_memory() -> Self {
        Self {
            images: Rc::new(MemoryImageStore::default()),
            staging: Rc::new(MemoryStagingStore::default()),
            game_api: Rc::new(MemoryGameApi::default()),
            decoder: Rc::new(DataUrlImageDecoder),
            preloader: Rc::new(MemoryImagePreloader::default()),
            host_strategy: HostStrategy::Stub,
        }
    }
}
