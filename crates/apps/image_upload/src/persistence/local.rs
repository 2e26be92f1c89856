use std::rc::Rc;

use futures::future::join_all;
use leptos::logging;
use platform_host::{
    iso8601_now, unix_time_ms_now, CandidateFile, ImageRecord, ImageStore, StoredImageRecord,
    IMAGE_DB_NAME,
};
use uuid::Uuid;

use super::{PersistFuture, PersistedBatch, PersistenceBackend};
use crate::{config::PersistenceMode, error::UploadError};

/// Builds the key of one locally stored record.
///
/// `tie_breaker` keeps keys unique when two batches of the same session land in the same
/// millisecond.
pub fn image_record_key(
    session_id: &str,
    unix_ms: u64,
    index: usize,
    tie_breaker: &str,
) -> String {
    format!("{session_id}_{unix_ms}_{index}_{tie_breaker}")
}

/// Persists batches into the browser image store as data-URI records.
///
/// Records reuse the preview data URIs, so each file is encoded once per batch.
#[derive(Clone)]
pub struct LocalImagePersistence {
    store: Rc<dyn ImageStore>,
}

impl LocalImagePersistence {
    /// Creates a backend writing into `store`.
    pub fn new(store: Rc<dyn ImageStore>) -> Self {
        Self { store }
    }

    async fn persist_one(
        &self,
        session_id: &str,
        index: usize,
        uri: &str,
    ) -> Result<ImageRecord, String> {
        let tie_breaker = Uuid::new_v4().simple().to_string();
        let stored = StoredImageRecord {
            id: image_record_key(session_id, unix_time_ms_now(), index, &tie_breaker),
            original: uri.to_string(),
            modified: uri.to_string(),
            timestamp: iso8601_now(),
        };
        self.store.add_image(&stored).await?;
        Ok(stored.into_record())
    }
}

impl PersistenceBackend for LocalImagePersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::Local
    }

    fn persist<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
        previews: &'a [String],
    ) -> PersistFuture<'a, Result<PersistedBatch, UploadError>> {
        Box::pin(async move {
            if previews.len() != files.len() {
                return Err(UploadError::Failed {
                    message: format!(
                        "{} previews for {} files",
                        previews.len(),
                        files.len()
                    ),
                });
            }
            let results = join_all(
                previews
                    .iter()
                    .enumerate()
                    .map(|(index, uri)| self.persist_one(session_id, index, uri)),
            )
            .await;

            let mut batch = PersistedBatch::default();
            for (file, result) in files.iter().zip(results) {
                match result {
                    Ok(record) => batch.records.push(record),
                    Err(err) => {
                        logging::warn!("saving {} to {IMAGE_DB_NAME} failed: {err}", file.name);
                        batch.failed += 1;
                    }
                }
            }

            if batch.records.is_empty() && !files.is_empty() {
                return Err(UploadError::NothingStored {
                    failed: batch.failed,
                });
            }
            logging::log!(
                "stored {} image(s) in {IMAGE_DB_NAME} for session {session_id}",
                batch.records.len()
            );
            Ok(batch)
        })
    }
}
