use std::rc::Rc;

use leptos::logging;
use platform_host::{CandidateFile, GameApi, GameApiError};

use super::{PersistFuture, PersistedBatch, PersistenceBackend};
use crate::{config::PersistenceMode, error::UploadError};

/// Uploads batches to the game backend as one multipart request.
#[derive(Clone)]
pub struct RemoteImagePersistence {
    api: Rc<dyn GameApi>,
}

impl RemoteImagePersistence {
    /// Creates a backend posting through `api`.
    pub fn new(api: Rc<dyn GameApi>) -> Self {
        Self { api }
    }
}

impl PersistenceBackend for RemoteImagePersistence {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::Remote
    }

    fn persist<'a>(
        &'a self,
        session_id: &'a str,
        files: &'a [CandidateFile],
        _previews: &'a [String],
    ) -> PersistFuture<'a, Result<PersistedBatch, UploadError>> {
        Box::pin(async move {
            match self.api.upload_images(session_id, files).await {
                Ok(response) if response.images.len() > files.len() => {
                    logging::warn!(
                        "upload returned {} records for {} files",
                        response.images.len(),
                        files.len()
                    );
                    Err(UploadError::Failed {
                        message: format!(
                            "expected at most {} records, got {}",
                            files.len(),
                            response.images.len()
                        ),
                    })
                }
                Ok(response) => Ok(PersistedBatch {
                    records: response.images,
                    failed: 0,
                }),
                Err(GameApiError::Status { status }) => {
                    logging::warn!("image upload rejected with status {status}");
                    Err(UploadError::Rejected { status })
                }
                Err(err) => {
                    logging::error!("image upload failed: {err}");
                    Err(UploadError::Failed {
                        message: err.to_string(),
                    })
                }
            }
        })
    }
}
