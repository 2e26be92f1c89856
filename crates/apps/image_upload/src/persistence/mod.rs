//! Persistence backends for accepted batches.
//!
//! The upload workflow only sees [`PersistenceBackend`]; [`PersistenceRouter`] picks the local
//! or remote implementation once, from the configured [`PersistenceMode`].

mod local;
mod remote;

use std::{future::Future, pin::Pin};

use platform_host::{CandidateFile, HostServices, ImageRecord};

pub use local::{image_record_key, LocalImagePersistence};
pub use remote::RemoteImagePersistence;

use crate::{config::PersistenceMode, error::UploadError};

/// Object-safe boxed future used by [`PersistenceBackend`].
pub type PersistFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Records produced for one accepted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedBatch {
    /// Staged records, in batch order for the files that succeeded.
    pub records: Vec<ImageRecord>,
    /// Files that could not be persisted and were skipped.
    pub failed: usize,
}

/// Destination for accepted batches.
pub trait PersistenceBackend {
    /// Mode implemented by this backend.
    fn mode(&self) -> PersistenceMode;

    /// Persists `files` for `session_id`.
    ///
    /// `previews` holds the data URI of each file, in file order. On success,
    /// `records.len() + failed == files.len()` for local persistence and
    /// `records.len() <= files.len()` for remote persistence.
    fn persist<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
        previews: &'a [String],
    ) -> PersistFuture<'a, Result<PersistedBatch, UploadError>>;
}

/// Backend chosen for the current build.
pub enum PersistenceRouter {
    /// Browser image store.
    Local(LocalImagePersistence),
    /// Game backend upload endpoint.
    Remote(RemoteImagePersistence),
}

impl PersistenceRouter {
    /// Selects the backend for `mode` from the injected host services.
    pub fn select(mode: PersistenceMode, services: &HostServices) -> Self {
        match mode {
            PersistenceMode::Local => {
                Self::Local(LocalImagePersistence::new(services.images.clone()))
            }
            PersistenceMode::Remote => {
                Self::Remote(RemoteImagePersistence::new(services.game_api.clone()))
            }
        }
    }
}

impl PersistenceBackend for PersistenceRouter {
    fn mode(&self) -> PersistenceMode {
        match self {
            Self::Local(backend) => backend.mode(),
            Self::Remote(backend) => backend.mode(),
        }
    }

    fn persist<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
        previews: &'a [String],
    ) -> PersistFuture<'a, Result<PersistedBatch, UploadError>> {
        match self {
            Self::Local(backend) => backend.persist(session_id, files, previews),
            Self::Remote(backend) => backend.persist(session_id, files, previews),
        }
    }
}
