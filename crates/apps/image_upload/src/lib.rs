//! Image upload screen: pick up to five images, preview them, stage them for a game, and start
//! a game room.
//!
//! The screen has two persistence modes selected by one build flag. Regular builds upload each
//! batch to the game backend; test-mode builds keep records in the browser image store and
//! expose a test-mode launcher that skips uploading entirely.
//!
//! [`UploadWorkflow`] holds all behavior over injected [`platform_host::HostServices`], and
//! [`ImageUploadPage`] binds it to the shell-owned [`game_app_contract::GameSession`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod component;
pub mod config;
pub mod error;
pub mod navigation;
pub mod persistence;
pub mod preview;
pub mod state;
pub mod validator;
mod workflow;

pub use component::ImageUploadPage;
pub use config::{PersistenceMode, UploadConfig, MAX_IMAGES};
pub use error::{StartGameError, UploadError, UploadNotice};
pub use navigation::{TestModeLaunch, ROOM_ID_PREFIX, TEST_ROOM_ID_PREFIX};
pub use persistence::{
    LocalImagePersistence, PersistedBatch, PersistenceBackend, PersistenceRouter,
    RemoteImagePersistence,
};
pub use state::UploadState;
pub use validator::{validate_batch, ValidatedBatch, ALLOWED_IMAGE_TYPES};
pub use workflow::{UploadCommit, UploadReport, UploadTicket, UploadWorkflow};
