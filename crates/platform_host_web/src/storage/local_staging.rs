//! `localStorage`-backed staging store implementation.
//!
//! Values are stored as raw text rather than JSON so the game screen can read
//! `currentGameRoomId` with a plain `getItem`.

use platform_host::{StagingStore, StagingStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser staging store backed by `window.localStorage`.
pub struct WebStagingStore;

impl WebStagingStore {
    /// Reads the raw value stored under `key`.
    pub fn read(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Writes a raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when
    /// the origin quota is exhausted).
    pub fn write(self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, value)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }
}

impl StagingStore for WebStagingStore {
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> StagingStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.read(key)) })
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> StagingStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.write(key, value) })
    }
}
