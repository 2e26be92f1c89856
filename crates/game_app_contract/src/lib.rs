//! Shared contract types between the game's screens and the application shell.
//!
//! Screens never reach into a global navigation system. They receive a [`Navigator`] and the
//! [`GameSession`] signals from the shell, and hand data forward explicitly: moving to the game
//! screen carries a [`GameRoomHandoff`] instead of relying on an ambient storage side channel.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::{Callable, Callback, RwSignal};
use platform_host::{CandidateFile, ImageRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Room created for a game and handed to the game screen.
pub struct GameRoomHandoff {
    /// Opaque room identifier (`room_<ms>` or `test_room_<ms>`).
    pub room_id: String,
    /// Unix milliseconds at which the room id was staged.
    pub staged_at_unix_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Screen the shell should show next.
pub enum Destination {
    /// Landing screen.
    Home,
    /// Game screen for the handed-off room.
    Game(GameRoomHandoff),
}

impl Destination {
    /// Returns the stable screen name (`"home"` or `"game"`).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Game(_) => "game",
        }
    }

    /// Returns the room handoff carried by a game destination.
    pub fn handoff(&self) -> Option<&GameRoomHandoff> {
        match self {
            Self::Home => None,
            Self::Game(handoff) => Some(handoff),
        }
    }
}

/// Navigation callback provided by the application shell.
pub trait Navigator {
    /// Switches to `destination`.
    fn navigate(&self, destination: Destination);
}

impl Navigator for Callback<Destination> {
    fn navigate(&self, destination: Destination) {
        self.call(destination);
    }
}

/// Session state owned by the shell and shared with the upload and game screens.
///
/// The upload screen appends to `uploaded_images` and `image_data`; the game screen reads
/// `image_data`. `image_data` is `None` until the first successful upload and after the user
/// navigates back.
#[derive(Clone, Copy)]
pub struct GameSession {
    /// Opaque session id used to correlate uploads and game rooms.
    pub session_id: RwSignal<String>,
    /// Accepted files in upload order.
    pub uploaded_images: RwSignal<Vec<CandidateFile>>,
    /// Staged image records in upload order.
    pub image_data: RwSignal<Option<Vec<ImageRecord>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_names_match_shell_routes() {
        assert_eq!(Destination::Home.name(), "home");
        let game = Destination::Game(GameRoomHandoff {
            room_id: "room_1".to_string(),
            staged_at_unix_ms: 1,
        });
        assert_eq!(game.name(), "game");
        assert_eq!(game.handoff().map(|h| h.room_id.as_str()), Some("room_1"));
        assert_eq!(Destination::Home.handoff(), None);
    }

    #[test]
    fn handoff_serializes_with_snake_case_fields() {
        let handoff = GameRoomHandoff {
            room_id: "test_room_5".to_string(),
            staged_at_unix_ms: 5,
        };
        let value = serde_json::to_value(&handoff).expect("serialize");
        assert_eq!(value["room_id"], "test_room_5");
        assert_eq!(value["staged_at_unix_ms"], 5);
    }
}
