//! Capacity and type checks applied to a freshly selected batch.

use platform_host::CandidateFile;

use crate::error::{UploadError, UploadNotice};

/// Declared MIME types accepted by the upload screen.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Returns whether `mime_type` is one of [`ALLOWED_IMAGE_TYPES`]. Matching is exact.
pub fn is_allowed_image_type(mime_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&mime_type)
}

/// Batch split into accepted and type-rejected files, both in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedBatch {
    /// Files with an allowed declared type.
    pub accepted: Vec<CandidateFile>,
    /// Files dropped for their declared type.
    pub rejected: Vec<CandidateFile>,
}

impl ValidatedBatch {
    /// Returns the notice shown when some files were dropped.
    pub fn rejection_notice(&self) -> Option<UploadNotice> {
        if self.rejected.is_empty() {
            return None;
        }
        Some(UploadNotice::UnsupportedTypes {
            rejected: self.rejected.iter().map(|file| file.name.clone()).collect(),
        })
    }
}

/// Validates a batch against the current accepted-set size.
///
/// Capacity is checked first and against the whole batch, before type filtering, so a batch
/// of six with one PDF is still refused at a limit of five.
///
/// # Errors
///
/// Returns [`UploadError::CapacityExceeded`] when `existing + batch.len()` exceeds
/// `max_images`. Nothing from the batch is accepted in that case.
pub fn validate_batch(
    existing: usize,
    batch: Vec<CandidateFile>,
    max_images: usize,
) -> Result<ValidatedBatch, UploadError> {
    if existing + batch.len() > max_images {
        return Err(UploadError::CapacityExceeded {
            max: max_images,
            existing,
            requested: batch.len(),
        });
    }

    let (accepted, rejected) = batch
        .into_iter()
        .partition(|file| is_allowed_image_type(&file.mime_type));
    Ok(ValidatedBatch { accepted, rejected })
}
