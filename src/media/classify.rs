//! Reference Classification
//!
//! Pure mapping from a raw reference string to media kind, provider and
//! identity. Unrecognized shapes fall back to `Other`/`Other`.

use std::sync::LazyLock;

use regex::Regex;

use crate::media::{MediaDescriptor, MediaKind, VideoKind};

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:www\.|m\.|music\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/)|youtube-nocookie\.com/embed/|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .expect("youtube pattern is valid")
});

static DAILYMOTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.)?(?:dailymotion\.com/(?:embed/)?video/|dai\.ly/)([A-Za-z0-9]+)")
        .expect("dailymotion pattern is valid")
});

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "avi", "mkv", "3gp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "wav", "ogg", "flac"];

// == Classification ==
/// What can be learned about a reference from its shape alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub media_kind: MediaKind,
    pub video_kind: VideoKind,
    pub media_id: Option<String>,
    pub media_url: String,
}

impl Classification {
    /// False when the reference matched no known shape.
    pub fn is_recognized(&self) -> bool {
        self.media_kind != MediaKind::Other || self.video_kind != VideoKind::Other
    }

    /// Builds the descriptor for `reference` from this classification.
    pub fn into_descriptor(self, reference: &str) -> MediaDescriptor {
        let photo_url = match self.media_kind {
            MediaKind::Photo => Some(reference.to_string()),
            _ => None,
        };

        MediaDescriptor {
            media_id: self.media_id,
            original_url: reference.to_string(),
            media_url: self.media_url,
            photo_url,
            photo_ratio: None,
            media_kind: self.media_kind,
            video_kind: self.video_kind,
        }
    }
}

/// Classifies a reference by provider URL pattern, then by file extension.
pub fn classify(reference: &str) -> Classification {
    let reference = reference.trim();

    if let Some(id) = capture_id(&YOUTUBE_RE, reference) {
        return Classification {
            media_kind: MediaKind::Video,
            video_kind: VideoKind::Youtube,
            media_url: format!("https://www.youtube.com/watch?v={}", id),
            media_id: Some(id),
        };
    }

    if let Some(id) = capture_id(&DAILYMOTION_RE, reference) {
        return Classification {
            media_kind: MediaKind::Video,
            video_kind: VideoKind::Dailymotion,
            media_url: format!("https://www.dailymotion.com/video/{}", id),
            media_id: Some(id),
        };
    }

    let media_kind = path_extension(reference)
        .map(|ext| kind_for_extension(&ext))
        .unwrap_or_default();

    Classification {
        media_kind,
        video_kind: VideoKind::Other,
        media_id: None,
        media_url: reference.to_string(),
    }
}

/// Classifies a reference whose media kind is already known to the caller.
///
/// Provider detection still applies to videos so their metadata can be
/// looked up.
pub fn classify_as(reference: &str, media_kind: MediaKind) -> Classification {
    let detected = classify(reference);
    if media_kind == MediaKind::Video && detected.video_kind.is_provider() {
        return detected;
    }

    Classification {
        media_kind,
        video_kind: VideoKind::Other,
        media_id: None,
        media_url: reference.trim().to_string(),
    }
}

fn capture_id(pattern: &Regex, reference: &str) -> Option<String> {
    pattern
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

fn kind_for_extension(ext: &str) -> MediaKind {
    if PHOTO_EXTENSIONS.contains(&ext) {
        MediaKind::Photo
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        MediaKind::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        MediaKind::Audio
    } else {
        MediaKind::Other
    }
}

/// Lowercased extension of the last path segment, ignoring query and
/// fragment. A bare host (`https://example.com`) has no extension.
fn path_extension(reference: &str) -> Option<String> {
    let without_suffix = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference);

    let path = match without_suffix.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path)?,
        None => without_suffix,
    };

    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
