//! Keyed local image store contracts and adapters.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use super::StoredImageRecord;

/// Object-safe boxed future used by [`ImageStore`] async methods.
pub type ImageStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Durable image store keyed by [`StoredImageRecord::id`].
///
/// Implementations create their backing store lazily on first use. Each call is an independent
/// transaction; there is no atomicity across records.
pub trait ImageStore {
    /// Inserts a new record. Fails when a record with the same id already exists.
    fn add_image<'a>(
        &'a self,
        record: &'a StoredImageRecord,
    ) -> ImageStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Image store that accepts and forgets every record, used by stub host builds.
pub struct NoopImageStore;

impl ImageStore for NoopImageStore {
    fn add_image<'a>(
        &'a self,
        _record: &'a StoredImageRecord,
    ) -> ImageStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory image store with IndexedDB `add` semantics (duplicate keys are rejected).
pub struct MemoryImageStore {
    inner: Rc<RefCell<BTreeMap<String, StoredImageRecord>>>,
}

impl MemoryImageStore {
    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns every stored record ordered by id.
    pub fn records(&self) -> Vec<StoredImageRecord> {
        self.inner.borrow().values().cloned().collect()
    }
}

impl ImageStore for MemoryImageStore {
    fn add_image<'a>(
        &'a self,
        record: &'a StoredImageRecord,
    ) -> ImageStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if inner.contains_key(&record.id) {
                return Err(format!("image record already exists: {}", record.id));
            }
            inner.insert(record.id.clone(), record.clone());
            Ok(())
        })
    }
}
