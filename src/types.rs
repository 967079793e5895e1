//! Common types used throughout photogrid
//!
//! This module contains the photo data model and small shared
//! utility types used across multiple modules.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Photo Identifier
// ============================================================================

/// Opaque, comparable photo identifier
///
/// The service may send identifiers as JSON numbers or strings; both are
/// accepted and held in their textual form. Nothing in the client assumes
/// identifiers are numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    /// Create an identifier from any displayable value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PhotoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PhotoId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PhotoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

// ============================================================================
// Photo
// ============================================================================

/// One photo as listed by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Stable identifier, unique within one loaded sequence
    pub id: PhotoId,

    /// Display filename
    #[serde(default, alias = "name")]
    pub filename: String,

    /// Thumbnail reference (relative path or absolute URL)
    #[serde(default, alias = "thumbnailUrl", alias = "thumb")]
    pub thumbnail_url: String,

    /// Full-resolution reference (relative path or absolute URL)
    #[serde(default, alias = "full_url", alias = "fullUrl")]
    pub url: String,
}

impl Photo {
    /// Create a photo
    pub fn new(
        id: impl Into<PhotoId>,
        filename: impl Into<String>,
        thumbnail_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            thumbnail_url: thumbnail_url.into(),
            url: url.into(),
        }
    }
}

/// Collect the identifiers of a photo sequence, preserving order
pub fn photo_ids(photos: &[Photo]) -> Vec<PhotoId> {
    photos.iter().map(|p| p.id.clone()).collect()
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_photo_id_accepts_numbers_and_strings() {
        let numeric: PhotoId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(numeric, PhotoId::new("42"));

        let negative: PhotoId = serde_json::from_value(json!(-7)).unwrap();
        assert_eq!(negative.as_str(), "-7");

        let text: PhotoId = serde_json::from_value(json!("abc-123")).unwrap();
        assert_eq!(text.to_string(), "abc-123");
    }

    #[test]
    fn test_photo_id_serializes_as_string() {
        let json = serde_json::to_string(&PhotoId::from(5u64)).unwrap();
        assert_eq!(json, "\"5\"");
    }

    #[test]
    fn test_photo_deserialize_aliases() {
        let photo: Photo = serde_json::from_value(json!({
            "id": 1,
            "filename": "beach.jpg",
            "thumbnailUrl": "/media/1/thumb",
            "fullUrl": "/media/1"
        }))
        .unwrap();

        assert_eq!(photo.id, PhotoId::new("1"));
        assert_eq!(photo.filename, "beach.jpg");
        assert_eq!(photo.thumbnail_url, "/media/1/thumb");
        assert_eq!(photo.url, "/media/1");
    }

    #[test]
    fn test_photo_missing_optional_fields() {
        let photo: Photo = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(photo.filename.is_empty());
        assert!(photo.thumbnail_url.is_empty());
    }

    #[test]
    fn test_photo_ids_preserve_order() {
        let photos = vec![
            Photo::new("b", "", "", ""),
            Photo::new("a", "", "", ""),
        ];
        assert_eq!(photo_ids(&photos), vec![PhotoId::new("b"), PhotoId::new("a")]);
    }
}
