use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id prefix carried by assets synthesized for an upload that never reached
/// the server.
pub const FALLBACK_ID_PREFIX: &str = "fallback-";

/// One uploaded image record as returned by the image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Server-assigned identifier.
    pub id: String,
    /// User-supplied title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// User-supplied description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// File name of the original upload.
    pub original_name: String,
    /// MIME type of the stored file (e.g. `"image/jpeg"`).
    pub mime_type: String,
    /// File size in bytes.
    pub size: u64,
    /// Pixel width, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Object storage key.
    #[serde(default, alias = "s3Key", skip_serializing_if = "Option::is_none")]
    pub source_key: Option<String>,
    /// URL the image bytes can be fetched from.
    #[serde(default, alias = "s3Url", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Lifecycle status (e.g. `"active"`).
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl MediaAsset {
    /// Returns `true` if this asset was synthesized locally for a failed upload.
    pub fn is_fallback(&self) -> bool {
        self.id.starts_with(FALLBACK_ID_PREFIX)
    }
}

/// Partial update applied with `PATCH /images/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AssetPatch {
    /// Returns `true` if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// An image to upload with `POST /images`.
///
/// Sent as a multipart body: the bytes under `file`, plus optional `title` and
/// `description` text fields.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAsset {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Optional title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl NewAsset {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            title: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for NewAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAsset")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("[{} bytes]", self.bytes.len()))
            .field("title", &self.title)
            .field("description", &self.description)
            .finish()
    }
}

/// Response of `GET /images/{id}/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub download_url: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_legacy_storage_field_names() {
        let json = r#"{
            "id": "img-1",
            "title": "Harbor",
            "originalName": "harbor.jpg",
            "mimeType": "image/jpeg",
            "size": 2048,
            "s3Key": "uploads/harbor.jpg",
            "s3Url": "http://localhost:9000/bucket/uploads/harbor.jpg",
            "status": "active",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        }"#;
        let asset: MediaAsset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.source_key.as_deref(), Some("uploads/harbor.jpg"));
        assert_eq!(
            asset.source_url.as_deref(),
            Some("http://localhost:9000/bucket/uploads/harbor.jpg")
        );
        assert!(asset.description.is_none());
        assert!(asset.width.is_none());
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_fields() {
        let json = r#"{
            "id": "img-2",
            "originalName": "a.png",
            "mimeType": "image/png",
            "size": 1,
            "sourceUrl": "https://cdn.example.com/a.png",
            "status": "active",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }"#;
        let asset: MediaAsset = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["originalName"], "a.png");
        assert_eq!(value["sourceUrl"], "https://cdn.example.com/a.png");
        assert!(value.get("title").is_none());
        assert!(value.get("sourceKey").is_none());
    }

    #[test]
    fn fallback_prefix_detection() {
        let json = r#"{
            "id": "fallback-1700000000000",
            "originalName": "a.png",
            "mimeType": "image/png",
            "size": 1,
            "status": "active",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-01T10:00:00Z"
        }"#;
        let mut asset: MediaAsset = serde_json::from_str(json).unwrap();
        assert!(asset.is_fallback());
        asset.id = "img-3".into();
        assert!(!asset.is_fallback());
    }

    #[test]
    fn patch_omits_absent_fields() {
        let patch = AssetPatch {
            title: Some("X".into()),
            description: None,
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"title":"X"}"#);
        assert!(!patch.is_empty());
        assert!(AssetPatch::default().is_empty());
    }

    #[test]
    fn new_asset_debug_hides_bytes() {
        let upload = NewAsset::new("cat.jpg", "image/jpeg", vec![0u8; 512]).with_title("Cat");
        let debug = format!("{upload:?}");
        assert!(debug.contains("[512 bytes]"));
        assert!(debug.contains("Cat"));
    }

    #[test]
    fn download_link_wire_name() {
        let link: DownloadLink =
            serde_json::from_str(r#"{"downloadUrl":"https://cdn.example.com/x"}"#).unwrap();
        assert_eq!(link.download_url, "https://cdn.example.com/x");
    }
}
