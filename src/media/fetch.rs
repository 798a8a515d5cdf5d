//! Metadata Fetching
//!
//! The remote lookup a resolver uses to enrich a classified descriptor,
//! plus an oEmbed implementation for the supported video providers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::media::{MediaDescriptor, VideoKind};

// == Fetch Error ==
/// Failure of a single enrichment attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The lookup did not answer in time
    #[error("Metadata lookup timed out")]
    Timeout,

    /// Connection-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote answered with a non-success status
    #[error("Provider returned status {0}")]
    Status(u16),

    /// Remote answered with something unusable
    #[error("Malformed metadata: {0}")]
    Malformed(String),

    /// The fetcher cannot look this reference up
    #[error("Unsupported reference: {0}")]
    Unsupported(String),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Transport(_) => true,
            FetchError::Status(code) => *code == 429 || *code >= 500,
            FetchError::Malformed(_) | FetchError::Unsupported(_) => false,
        }
    }
}

// == Enrichment ==
/// Fields a successful lookup contributes to a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub photo_url: String,
    /// Height divided by width, when the provider reports dimensions
    pub photo_ratio: Option<f64>,
}

// == Metadata Fetcher ==
/// Remote lookup capability used during enrichment.
///
/// Implementations own their timeouts; a timeout should surface as
/// [`FetchError::Timeout`].
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Looks up display metadata for a classified descriptor.
    async fn fetch(&self, descriptor: &MediaDescriptor) -> Result<Enrichment, FetchError>;
}

// == oEmbed Fetcher ==
const YOUTUBE_OEMBED: &str = "https://www.youtube.com/oembed";
const DAILYMOTION_OEMBED: &str = "https://www.dailymotion.com/services/oembed";

/// Fetches thumbnails through the providers' oEmbed endpoints.
#[derive(Debug, Clone)]
pub struct OEmbedFetcher {
    client: reqwest::Client,
    youtube_endpoint: String,
    dailymotion_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    thumbnail_url: Option<String>,
    thumbnail_width: Option<f64>,
    thumbnail_height: Option<f64>,
}

impl OEmbedFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            youtube_endpoint: YOUTUBE_OEMBED.to_string(),
            dailymotion_endpoint: DAILYMOTION_OEMBED.to_string(),
        })
    }

    /// Overrides the provider endpoints, e.g. to point at a proxy.
    pub fn with_endpoints(
        mut self,
        youtube: impl Into<String>,
        dailymotion: impl Into<String>,
    ) -> Self {
        self.youtube_endpoint = youtube.into();
        self.dailymotion_endpoint = dailymotion.into();
        self
    }

    fn endpoint_for(&self, kind: VideoKind) -> Option<&str> {
        match kind {
            VideoKind::Youtube => Some(&self.youtube_endpoint),
            VideoKind::Dailymotion => Some(&self.dailymotion_endpoint),
            VideoKind::Other => None,
        }
    }
}

#[async_trait]
impl MetadataFetcher for OEmbedFetcher {
    async fn fetch(&self, descriptor: &MediaDescriptor) -> Result<Enrichment, FetchError> {
        let endpoint = self
            .endpoint_for(descriptor.video_kind)
            .ok_or_else(|| FetchError::Unsupported(descriptor.original_url.clone()))?;

        debug!(endpoint, url = %descriptor.media_url, "Requesting oEmbed metadata");

        let response = self
            .client
            .get(endpoint)
            .query(&[("url", descriptor.media_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        enrichment_from(body)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(error.to_string())
    }
}

fn enrichment_from(body: OEmbedResponse) -> Result<Enrichment, FetchError> {
    let photo_url = body
        .thumbnail_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| FetchError::Malformed("missing thumbnail_url".to_string()))?;

    let photo_ratio = match (body.thumbnail_width, body.thumbnail_height) {
        (Some(width), Some(height)) if width > 0.0 && height > 0.0 => Some(height / width),
        _ => None,
    };

    Ok(Enrichment {
        photo_url,
        photo_ratio,
    })
}
