use std::rc::Rc;

use platform_host::{
    CandidateFile, DataUrlImageDecoder, GameApi, GameApiEndpoints, GameApiError, GameApiFuture,
    GameStartRequest, HostServices, HostStrategy, ImagePreloader, ImageStore, ImageStoreFuture,
    NoopGameApi, NoopImagePreloader, NoopImageStore, NoopStagingStore, StagingStore,
    StagingStoreFuture, StoredImageRecord, UploadImagesResponse,
};
use serde_json::Value;

use crate::{WebGameApi, WebImagePreloader, WebImageStore, WebStagingStore};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete image store behind [`ImageStore`].
#[derive(Debug, Clone)]
pub enum ImageStoreAdapter {
    /// IndexedDB-backed store.
    Browser(WebImageStore),
    /// Store that keeps nothing, for stub builds.
    Stub(NoopImageStore),
}

impl ImageStore for ImageStoreAdapter {
    fn add_image<'a>(
        &'a self,
        record: &'a StoredImageRecord,
    ) -> ImageStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.add_image(record),
            Self::Stub(store) => store.add_image(record),
        }
    }
}

/// Adapter enum that erases the concrete staging store behind [`StagingStore`].
#[derive(Debug, Clone)]
pub enum StagingStoreAdapter {
    /// `localStorage`-backed store.
    Browser(WebStagingStore),
    /// Store that keeps nothing, for stub builds.
    Stub(NoopStagingStore),
}

impl StagingStore for StagingStoreAdapter {
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> StagingStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_value(key),
            Self::Stub(store) => store.load_value(key),
        }
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> StagingStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_value(key, value),
            Self::Stub(store) => store.save_value(key, value),
        }
    }
}

/// Adapter enum that erases the concrete game backend behind [`GameApi`].
#[derive(Debug, Clone)]
pub enum GameApiAdapter {
    /// `fetch`-backed transport.
    Browser(WebGameApi),
    /// Backend that reports every call as a network fault, for stub builds.
    Stub(NoopGameApi),
}

impl GameApi for GameApiAdapter {
    fn upload_images<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
    ) -> GameApiFuture<'a, Result<UploadImagesResponse, GameApiError>> {
        match self {
            Self::Browser(api) => api.upload_images(session_id, files),
            Self::Stub(api) => api.upload_images(session_id, files),
        }
    }

    fn start_game<'a>(
        &'a self,
        request: &'a GameStartRequest,
    ) -> GameApiFuture<'a, Result<Value, GameApiError>> {
        match self {
            Self::Browser(api) => api.start_game(request),
            Self::Stub(api) => api.start_game(request),
        }
    }
}

fn image_store_for(strategy: HostStrategy) -> ImageStoreAdapter {
    match strategy {
        HostStrategy::Browser => ImageStoreAdapter::Browser(WebImageStore),
        HostStrategy::Stub => ImageStoreAdapter::Stub(NoopImageStore),
    }
}

/// Builds the image store selected for the active build.
pub fn image_store() -> ImageStoreAdapter {
    image_store_for(selected_host_strategy())
}

fn staging_store_for(strategy: HostStrategy) -> StagingStoreAdapter {
    match strategy {
        HostStrategy::Browser => StagingStoreAdapter::Browser(WebStagingStore),
        HostStrategy::Stub => StagingStoreAdapter::Stub(NoopStagingStore),
    }
}

/// Builds the staging store selected for the active build.
pub fn staging_store() -> StagingStoreAdapter {
    staging_store_for(selected_host_strategy())
}

fn game_api_for(
    strategy: HostStrategy,
    endpoints: GameApiEndpoints,
    timeout_ms: u32,
) -> GameApiAdapter {
    match strategy {
        HostStrategy::Browser => GameApiAdapter::Browser(WebGameApi::new(endpoints, timeout_ms)),
        HostStrategy::Stub => GameApiAdapter::Stub(NoopGameApi),
    }
}

/// Builds the game backend selected for the active build.
pub fn game_api(endpoints: GameApiEndpoints, timeout_ms: u32) -> GameApiAdapter {
    game_api_for(selected_host_strategy(), endpoints, timeout_ms)
}

fn image_preloader_for(strategy: HostStrategy) -> Rc<dyn ImagePreloader> {
    match strategy {
        HostStrategy::Browser => Rc::new(WebImagePreloader),
        HostStrategy::Stub => Rc::new(NoopImagePreloader),
    }
}

/// Builds the full host-service bundle for the active build.
pub fn build_host_services(endpoints: GameApiEndpoints, timeout_ms: u32) -> HostServices {
    HostServices {
        images: Rc::new(image_store()),
        staging: Rc::new(staging_store()),
        game_api: Rc::new(game_api(endpoints, timeout_ms)),
        decoder: Rc::new(DataUrlImageDecoder),
        preloader: image_preloader_for(selected_host_strategy()),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn host_strategy_name_matches_selected_strategy() {
        assert_eq!(host_strategy_name(), selected_host_strategy().as_str());
    }

    #[test]
    fn built_services_report_selected_strategy() {
        let services = build_host_services(GameApiEndpoints::default(), 1_000);
        assert_eq!(services.host_strategy, selected_host_strategy());
    }

    #[cfg(not(feature = "host-stub"))]
    #[test]
    fn browser_strategy_uses_web_adapters() {
        assert!(matches!(image_store(), ImageStoreAdapter::Browser(_)));
        assert!(matches!(staging_store(), StagingStoreAdapter::Browser(_)));
        assert!(matches!(
            game_api(GameApiEndpoints::default(), 1_000),
            GameApiAdapter::Browser(_)
        ));
    }

    #[test]
    fn stub_strategy_uses_noop_adapters() {
        assert!(matches!(
            image_store_for(HostStrategy::Stub),
            ImageStoreAdapter::Stub(NoopImageStore)
        ));
        assert!(matches!(
            staging_store_for(HostStrategy::Stub),
            StagingStoreAdapter::Stub(NoopStagingStore)
        ));
        assert!(matches!(
            game_api_for(HostStrategy::Stub, GameApiEndpoints::default(), 1_000),
            GameApiAdapter::Stub(NoopGameApi)
        ));
    }

    #[test]
    fn stub_adapters_keep_nothing_and_have_no_backend() {
        let record = StoredImageRecord {
            id: "s_1_0_a".to_string(),
            original: "data:".to_string(),
            modified: "data:".to_string(),
            timestamp: "1970-01-01T00:00:00.000Z".to_string(),
        };
        let images = image_store_for(HostStrategy::Stub);
        block_on(images.add_image(&record)).expect("add");
        block_on(images.add_image(&record)).expect("duplicate add is accepted");

        let staging = staging_store_for(HostStrategy::Stub);
        block_on(staging.save_value("currentGameRoomId", "room_1")).expect("save");
        assert_eq!(
            block_on(staging.load_value("currentGameRoomId")).expect("load"),
            None
        );

        let api = game_api_for(HostStrategy::Stub, GameApiEndpoints::default(), 1_000);
        let files = vec![CandidateFile::new("a.png", "image/png", vec![1])];
        assert!(block_on(api.upload_images("s", &files))
            .expect_err("no backend")
            .is_network());
    }
}
