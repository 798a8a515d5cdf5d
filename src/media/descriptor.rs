//! Media Descriptor
//!
//! The normalized, immutable description of a resolved media reference.

use serde::{Deserialize, Serialize};

/// Broad media category of a reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Other,
    Photo,
    Video,
    Audio,
}

/// Hosting provider of a video reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    #[default]
    Other,
    Youtube,
    Dailymotion,
}

impl VideoKind {
    /// Returns true for providers whose thumbnails can be looked up remotely.
    pub fn is_provider(self) -> bool {
        !matches!(self, VideoKind::Other)
    }
}

// == Media Descriptor ==
/// Resolved description of a media reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Provider-specific identity (e.g. a YouTube video id)
    pub media_id: Option<String>,
    /// The reference exactly as supplied
    pub original_url: String,
    /// Canonical URL of the media itself
    pub media_url: String,
    /// Image to display for the media
    pub photo_url: Option<String>,
    /// Height divided by width of the photo
    pub photo_ratio: Option<f64>,
    pub media_kind: MediaKind,
    pub video_kind: VideoKind,
}

impl MediaDescriptor {
    /// Creates a bare descriptor for a reference that has not been classified.
    pub fn unclassified(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            media_id: None,
            media_url: reference.clone(),
            original_url: reference,
            photo_url: None,
            photo_ratio: None,
            media_kind: MediaKind::Other,
            video_kind: VideoKind::Other,
        }
    }

    /// Key this descriptor is cached under: the media id, or the original
    /// URL when there is no id.
    pub fn cache_key(&self) -> &str {
        match self.media_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.original_url,
        }
    }
}
