//! Build-time configuration for the upload screen.

use std::time::Duration;

use platform_host::GameApiEndpoints;
use platform_host_web::DEFAULT_REQUEST_TIMEOUT_MS;

/// Maximum number of images one session may upload.
pub const MAX_IMAGES: usize = 5;
/// Environment variable read at compile time to enable test mode.
pub const TEST_MODE_ENV: &str = "HIDDEN_CATCH_TEST_MODE_ENABLED";
/// Delay between staging the test-mode room and navigating to the game screen.
pub const TEST_MODE_NAVIGATION_DELAY: Duration = Duration::from_millis(100);

/// Where accepted images are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Browser IndexedDB store; records carry data URIs.
    Local,
    /// Game backend upload endpoint; records carry server URLs.
    Remote,
}

/// Upload screen configuration.
///
/// `test_mode_enabled` is a single switch: it selects local persistence and exposes the
/// test-mode launcher together. Splitting them would need a second flag here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Development/test build flag.
    pub test_mode_enabled: bool,
    /// Capacity of the accepted file set.
    pub max_images: usize,
    /// Game backend endpoints.
    pub endpoints: GameApiEndpoints,
    /// Per-request timeout for backend calls in milliseconds.
    pub request_timeout_ms: u32,
    /// Delay before test mode navigates to the game screen.
    pub test_mode_navigation_delay: Duration,
}

impl UploadConfig {
    /// Builds the configuration from the `test-mode` feature or the [`TEST_MODE_ENV`]
    /// variable captured at compile time.
    pub fn from_build_env() -> Self {
        let enabled = cfg!(feature = "test-mode")
            || test_mode_flag(option_env!("HIDDEN_CATCH_TEST_MODE_ENABLED"));
        Self::with_test_mode(enabled)
    }

    /// Builds the default configuration with an explicit test-mode flag.
    pub fn with_test_mode(test_mode_enabled: bool) -> Self {
        Self {
            test_mode_enabled,
            max_images: MAX_IMAGES,
            endpoints: GameApiEndpoints::default(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            test_mode_navigation_delay: TEST_MODE_NAVIGATION_DELAY,
        }
    }

    /// Returns the persistence backend implied by the test-mode flag.
    pub const fn persistence_mode(&self) -> PersistenceMode {
        if self.test_mode_enabled {
            PersistenceMode::Local
        } else {
            PersistenceMode::Remote
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Parses the raw flag value. Only the exact string `"true"` enables test mode.
pub fn test_mode_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}
