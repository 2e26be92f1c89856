//! Durable staging slot contracts and adapters.
//!
//! The staging area is a flat string key-value space that survives page reloads. The upload
//! screen writes the active game room id here so the game screen can pick it up after a reload.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Staging key holding the id of the game room most recently created.
pub const CURRENT_GAME_ROOM_ID_KEY: &str = "currentGameRoomId";

/// Object-safe boxed future used by [`StagingStore`] async methods.
pub type StagingStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for small raw string values keyed by name.
pub trait StagingStore {
    /// Loads the raw value stored under `key`.
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> StagingStoreFuture<'a, Result<Option<String>, String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> StagingStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Staging store that remembers nothing, used by stub host builds.
pub struct NoopStagingStore;

impl StagingStore for NoopStagingStore {
    fn load_value<'a>(
        &'a self,
        _key: &'a str,
    ) -> StagingStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_value<'a>(
        &'a self,
        _key: &'a str,
        _value: &'a str,
    ) -> StagingStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory staging store keyed by string.
pub struct MemoryStagingStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStagingStore {
    /// Reads a value without going through the async contract.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl StagingStore for MemoryStagingStore {
    fn load_value<'a>(
        &'a self,
        key: &'a str,
    ) -> StagingStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.peek(key)) })
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> StagingStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        })
    }
}

/// Stages `room_id` under [`CURRENT_GAME_ROOM_ID_KEY`].
///
/// # Errors
///
/// Returns an error when the store write fails.
pub async fn stage_game_room_id<S: StagingStore + ?Sized>(
    store: &S,
    room_id: &str,
) -> Result<(), String> {
    store.save_value(CURRENT_GAME_ROOM_ID_KEY, room_id).await
}

/// Loads the staged game room id, if any.
///
/// # Errors
///
/// Returns an error when the store read fails.
pub async fn load_staged_game_room_id<S: StagingStore + ?Sized>(
    store: &S,
) -> Result<Option<String>, String> {
    store.load_value(CURRENT_GAME_ROOM_ID_KEY).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_staging_store_overwrites_values() {
        let store = MemoryStagingStore::default();
        let store_obj: &dyn StagingStore = &store;

        block_on(store_obj.save_value("slot", "room_1")).expect("save");
        block_on(store_obj.save_value("slot", "room_2")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.load_value("slot")).expect("load"),
            Some("room_2".to_string())
        );
        assert_eq!(block_on(store_obj.load_value("other")).expect("load"), None);
    }

    #[test]
    fn room_id_helpers_use_the_shared_key_and_store_raw_text() {
        let store = MemoryStagingStore::default();
        block_on(stage_game_room_id(&store, "room_42")).expect("stage");

        assert_eq!(
            store.peek(CURRENT_GAME_ROOM_ID_KEY),
            Some("room_42".to_string())
        );
        assert_eq!(
            block_on(load_staged_game_room_id(&store)).expect("load"),
            Some("room_42".to_string())
        );
    }

    #[test]
    fn noop_staging_store_is_empty_and_successful() {
        let store = NoopStagingStore;
        let store_obj: &dyn StagingStore = &store;
        block_on(store_obj.save_value("k", "v")).expect("save");
        assert_eq!(block_on(store_obj.load_value("k")).expect("load"), None);
    }
}
