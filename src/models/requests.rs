//! Request DTOs for the media API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Longest reference accepted for resolution
pub const MAX_REFERENCE_LENGTH: usize = 2048;

fn default_retrieve() -> bool {
    true
}

/// Request body for POST /resolve
///
/// # Fields
/// - `url`: The raw media reference
/// - `retrieve`: Whether to look up provider metadata (default: true)
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequest {
    pub url: String,
    #[serde(default = "default_retrieve")]
    pub retrieve: bool,
}

impl ResolveRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("URL cannot be empty".to_string());
        }
        if self.url.len() > MAX_REFERENCE_LENGTH {
            return Some(format!(
                "URL exceeds maximum length of {} characters",
                MAX_REFERENCE_LENGTH
            ));
        }
        None
    }
}

/// Query string for DELETE /media
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixQuery {
    /// Only entries whose key starts with this are removed; all when absent
    pub prefix: Option<String>,
}
