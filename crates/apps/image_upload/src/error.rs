//! User-facing failures and notices raised by the upload screen.
//!
//! Display strings are what the screen shows; the structured fields are for logging and tests.

use std::fmt;

use thiserror::Error;

/// Failure of one upload attempt. None of these change the session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The batch would push the accepted file set past capacity.
    #[error("You can upload up to {max} images.")]
    CapacityExceeded {
        /// Capacity of the accepted file set.
        max: usize,
        /// Files already accepted.
        existing: usize,
        /// Files in the rejected batch, before type filtering.
        requested: usize,
    },
    /// Reading a selected file failed before anything was persisted.
    #[error("Could not read the selected images.")]
    ReadFailed {
        /// Underlying read or decode error.
        message: String,
    },
    /// Local persistence stored none of the batch.
    #[error("None of the images could be saved in this browser.")]
    NothingStored {
        /// Records that failed to write.
        failed: usize,
    },
    /// The upload endpoint answered with a non-success status.
    #[error("Image upload failed.")]
    Rejected {
        /// HTTP status returned by the endpoint.
        status: u16,
    },
    /// The upload request could not be completed or its response was unusable.
    #[error("An error occurred while uploading images.")]
    Failed {
        /// Underlying transport or decode error.
        message: String,
    },
}

/// Failure of a start-game or test-mode request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartGameError {
    /// No records have been staged yet.
    #[error("Please upload images first.")]
    NoImages,
    /// The first staged record is not addressable yet.
    #[error("Images are still loading. Please wait a moment.")]
    ImagesLoading,
    /// The room-creation endpoint answered with a non-success status.
    #[error("Could not start the game. Please try again.")]
    Rejected {
        /// HTTP status returned by the endpoint.
        status: u16,
    },
    /// Test mode was requested in a build without the test-mode flag.
    #[error("Test mode is not enabled in this build.")]
    TestModeDisabled,
}

/// Non-fatal message produced by an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNotice {
    /// Some selected files were dropped because their declared type is not allowed.
    UnsupportedTypes {
        /// Names of the dropped files.
        rejected: Vec<String>,
    },
    /// Records were written to browser storage.
    StoredLocally {
        /// Records written.
        stored: usize,
        /// Records that failed and were skipped.
        failed: usize,
    },
}

impl fmt::Display for UploadNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedTypes { .. } => {
                f.write_str("Only jpg, jpeg, and png files can be uploaded.")
            }
            Self::StoredLocally { stored, failed: 0 } => {
                write!(f, "{stored} image(s) saved in this browser.")
            }
            Self::StoredLocally { stored, failed } => write!(
                f,
                "{stored} image(s) saved in this browser; {failed} could not be saved."
            ),
        }
    }
}
