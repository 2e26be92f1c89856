//! Session state owned by the upload screen.

use platform_host::{CandidateFile, ImageRecord};

/// Accepted files, their previews, and the staged image records.
///
/// `previews` always has one entry per accepted file. `image_data` is `None` until the first
/// successful batch and never holds more records than there are accepted files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    /// Accepted file set in upload order.
    pub accepted: Vec<CandidateFile>,
    /// Preview URIs in the same order as `accepted`.
    pub previews: Vec<String>,
    /// Staged image records in upload order.
    pub image_data: Option<Vec<ImageRecord>>,
}

impl UploadState {
    /// Returns how many more files fit under `max_images`.
    pub fn remaining_capacity(&self, max_images: usize) -> usize {
        max_images.saturating_sub(self.accepted.len())
    }

    /// Returns whether the picker should accept more files.
    pub fn can_upload(&self, max_images: usize) -> bool {
        self.remaining_capacity(max_images) > 0
    }

    /// Returns whether the start action is enabled.
    pub fn can_start(&self) -> bool {
        !self.accepted.is_empty()
    }

    /// Number of staged records.
    pub fn record_count(&self) -> usize {
        self.image_data.as_ref().map_or(0, Vec::len)
    }

    /// First staged record, checked for readiness before starting a game.
    pub fn first_record(&self) -> Option<&ImageRecord> {
        self.image_data.as_ref().and_then(|records| records.first())
    }

    /// Clears all three collections together.
    pub fn reset(&mut self) {
        self.accepted.clear();
        self.previews.clear();
        self.image_data = None;
    }

    pub(crate) fn apply_batch(
        &mut self,
        files: Vec<CandidateFile>,
        previews: Vec<String>,
        records: Vec<ImageRecord>,
    ) {
        debug_assert_eq!(files.len(), previews.len());
        self.accepted.extend(files);
        self.previews.extend(previews);
        self.image_data.get_or_insert_with(Vec::new).extend(records);
    }
}
