//! Start-game, go-back, and test-mode transitions out of the upload screen.

use std::time::Duration;

use game_app_contract::{Destination, GameRoomHandoff, Navigator};
use leptos::logging;
use platform_host::{
    iso8601_from_unix_ms, next_monotonic_timestamp_ms, stage_game_room_id, unix_time_ms_now,
    GameApiError, GameStartRequest, ImageRecord,
};

use crate::{error::StartGameError, state::UploadState, workflow::UploadWorkflow};

/// Prefix of room ids minted for regular games.
pub const ROOM_ID_PREFIX: &str = "room_";
/// Prefix of room ids minted by test mode.
pub const TEST_ROOM_ID_PREFIX: &str = "test_room_";

/// Placeholder `(original, modified)` pairs staged by test mode.
pub const TEST_MODE_IMAGES: [(&str, &str); 2] = [
    (
        "https://images.pexels.com/photos/19142741/pexels-photo-19142741.jpeg",
        "https://images.pexels.com/photos/18232621/pexels-photo-18232621.jpeg",
    ),
    (
        "https://images.pexels.com/photos/34622523/pexels-photo-34622523.jpeg",
        "https://images.pexels.com/photos/17378214/pexels-photo-17378214.jpeg",
    ),
];

/// Mints a room id from a monotonic millisecond timestamp and returns it with that timestamp.
pub fn mint_room_id(prefix: &str) -> (String, u64) {
    let minted_at = next_monotonic_timestamp_ms();
    (format!("{prefix}{minted_at}"), minted_at)
}

/// Records staged by test mode.
pub fn test_mode_records() -> Vec<ImageRecord> {
    TEST_MODE_IMAGES
        .iter()
        .map(|(original, modified)| ImageRecord {
            original: (*original).to_string(),
            modified: (*modified).to_string(),
        })
        .collect()
}

/// Test-mode launch that navigates once `navigate_after` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestModeLaunch {
    /// Staged test room.
    pub handoff: GameRoomHandoff,
    /// Delay before navigating.
    pub navigate_after: Duration,
}

impl TestModeLaunch {
    /// Destination to navigate to when the delay elapses.
    pub fn destination(&self) -> Destination {
        Destination::Game(self.handoff.clone())
    }
}

impl UploadWorkflow {
    /// Creates a game room for the staged images and navigates to the game screen.
    ///
    /// A non-success status blocks navigation. A transport fault (or an unreadable success
    /// body) is treated as offline play: a fresh room id is staged and navigation proceeds.
    ///
    /// # Errors
    ///
    /// Returns [`StartGameError::NoImages`] or [`StartGameError::ImagesLoading`] when the first
    /// staged record is missing or not addressable, and [`StartGameError::Rejected`] when the
    /// backend refuses the room.
    pub async fn start_game(
        &self,
        state: &UploadState,
        session_id: &str,
        navigator: &dyn Navigator,
    ) -> Result<GameRoomHandoff, StartGameError> {
        let first = state.first_record().ok_or(StartGameError::NoImages)?;
        if !first.is_ready() {
            return Err(StartGameError::ImagesLoading);
        }

        let (room_id, minted_at) = mint_room_id(ROOM_ID_PREFIX);
        let request = GameStartRequest {
            game_room_id: room_id.clone(),
            user_id: session_id.to_string(),
            start_time: iso8601_from_unix_ms(minted_at),
        };

        let staged_room = match self.services.game_api.start_game(&request).await {
            Ok(body) => {
                logging::log!("game room {room_id} created: {body}");
                room_id
            }
            Err(GameApiError::Status { status }) => {
                logging::warn!("game room {room_id} rejected with status {status}");
                return Err(StartGameError::Rejected { status });
            }
            Err(err) => {
                let (fallback, _) = mint_room_id(ROOM_ID_PREFIX);
                logging::warn!("game start failed ({err}); continuing offline in {fallback}");
                fallback
            }
        };

        let handoff = self.stage_room(staged_room).await;
        navigator.navigate(Destination::Game(handoff.clone()));
        Ok(handoff)
    }

    /// Clears all upload state and navigates home. Never fails.
    ///
    /// Uploads still in flight are superseded and will not be published.
    pub fn go_back(&self, state: &mut UploadState, navigator: &dyn Navigator) {
        self.start_new_generation();
        state.reset();
        navigator.navigate(Destination::Home);
    }

    /// Stages placeholder records and a test room without uploading anything.
    ///
    /// The accepted file set is left as is; only `image_data` is replaced. The caller navigates
    /// to [`TestModeLaunch::destination`] after [`TestModeLaunch::navigate_after`].
    ///
    /// # Errors
    ///
    /// Returns [`StartGameError::TestModeDisabled`] unless test mode is enabled.
    pub async fn launch_test_mode(
        &self,
        state: &mut UploadState,
    ) -> Result<TestModeLaunch, StartGameError> {
        if !self.config.test_mode_enabled {
            return Err(StartGameError::TestModeDisabled);
        }

        self.start_new_generation();
        state.image_data = Some(test_mode_records());
        let (room_id, _) = mint_room_id(TEST_ROOM_ID_PREFIX);
        let handoff = self.stage_room(room_id).await;
        Ok(TestModeLaunch {
            handoff,
            navigate_after: self.config.test_mode_navigation_delay,
        })
    }

    async fn stage_room(&self, room_id: String) -> GameRoomHandoff {
        if let Err(err) = stage_game_room_id(self.services.staging.as_ref(), &room_id).await {
            logging::warn!("staging game room {room_id} failed: {err}");
        }
        GameRoomHandoff {
            room_id,
            staged_at_unix_ms: unix_time_ms_now(),
        }
    }
}
