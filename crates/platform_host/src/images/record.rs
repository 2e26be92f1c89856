//! Image record shapes exchanged with persistence backends and the game screen.

use serde::{Deserialize, Serialize};

/// IndexedDB database name used by the local image store.
pub const IMAGE_DB_NAME: &str = "HiddenCatchDB";
/// Schema version of [`IMAGE_DB_NAME`].
pub const IMAGE_DB_VERSION: u32 = 1;
/// Object store holding [`StoredImageRecord`] values keyed by `id`.
pub const IMAGE_STORE_NAME: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Two addressable variants of one staged image.
///
/// Locally persisted records carry the same data URI in both fields. Records returned by the
/// upload endpoint carry server URLs, and `modified` may point at a stylized variant.
pub struct ImageRecord {
    /// URI of the image as uploaded.
    pub original: String,
    /// URI of the variant the game compares against.
    pub modified: String,
}

impl ImageRecord {
    /// Builds a record whose variants both point at `uri`.
    pub fn unmodified(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            modified: uri.clone(),
            original: uri,
        }
    }

    /// Returns whether both variants carry a non-empty URI.
    pub fn is_ready(&self) -> bool {
        !self.original.is_empty() && !self.modified.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Row persisted in the `images` object store.
pub struct StoredImageRecord {
    /// Composite key: `{session}_{unix_ms}_{batch_index}_{tie_breaker}`.
    pub id: String,
    /// Original image URI.
    pub original: String,
    /// Modified image URI.
    pub modified: String,
    /// RFC 3339 write time.
    pub timestamp: String,
}

impl StoredImageRecord {
    /// Drops storage metadata and returns the exchanged record shape.
    pub fn into_record(self) -> ImageRecord {
        ImageRecord {
            original: self.original,
            modified: self.modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn image_record_wire_shape_matches_upload_response_entries() {
        let record: ImageRecord = serde_json::from_value(json!({
            "original": "https://cdn.example/a.png",
            "modified": "https://cdn.example/a-mod.png"
        }))
        .expect("decode record");
        assert_eq!(record.original, "https://cdn.example/a.png");
        assert_eq!(record.modified, "https://cdn.example/a-mod.png");
    }

    #[test]
    fn readiness_requires_both_variants() {
        assert!(ImageRecord::unmodified("data:image/png;base64,AA==").is_ready());
        let half = ImageRecord {
            original: "a".to_string(),
            modified: String::new(),
        };
        assert!(!half.is_ready());
    }

    #[test]
    fn stored_record_keeps_both_uris_when_converted() {
        let stored = StoredImageRecord {
            id: "s_1_0_x".to_string(),
            original: "o".to_string(),
            modified: "m".to_string(),
            timestamp: "1970-01-01T00:00:00.000Z".to_string(),
        };
        assert_eq!(
            stored.into_record(),
            ImageRecord {
                original: "o".to_string(),
                modified: "m".to_string(),
            }
        );
    }
}
