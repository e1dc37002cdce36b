//! Channel types.
//!
//! This module contains the output side of the pipeline:
//! - [`ChannelId`] - Opaque identifier for a remote channel
//! - [`ChannelRecord`] - Normalized channel metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for canonical channel links.
const CHANNEL_URL_BASE: &str = "https://www.youtube.com/channel/";

// ============================================================================
// Channel Id
// ============================================================================

/// Opaque identifier for a remote channel.
///
/// Identifiers are collected into a set during discovery; set membership is
/// the mechanism that prevents duplicate detail fetches when the same channel
/// is found under multiple keywords or pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Creates a channel id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the canonical channel URL from the identifier.
    ///
    /// The URL is always derived locally, never read from a remote response,
    /// so it is present even when every other field is missing.
    pub fn canonical_url(&self) -> String {
        format!("{CHANNEL_URL_BASE}{}", self.0)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Channel Record
// ============================================================================

/// Normalized metadata for a single discovered channel.
///
/// Numeric fields that are absent upstream stay `None` ("unavailable"). A
/// missing subscriber count is not the same as zero subscribers, so absence
/// is never coerced to a number. Missing textual fields normalize to the
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// The channel identifier.
    pub id: ChannelId,
    /// Channel title; empty if missing upstream.
    pub title: String,
    /// Custom URL / handle; empty if missing upstream.
    pub custom_url: String,
    /// Channel description; empty if missing upstream.
    pub description: String,
    /// Subscriber count; `None` when hidden or missing upstream.
    pub subscriber_count: Option<u64>,
    /// Video count; `None` when missing upstream.
    pub video_count: Option<u64>,
    /// When the channel was published; `None` when missing or unparseable.
    pub published_at: Option<DateTime<Utc>>,
    /// Canonical channel URL, derived from the identifier.
    pub channel_url: String,
}

impl ChannelRecord {
    /// Creates an empty record for the given identifier.
    ///
    /// The canonical URL is filled in immediately; every other field starts
    /// at its "missing" value.
    pub fn new(id: ChannelId) -> Self {
        let channel_url = id.canonical_url();
        Self {
            id,
            title: String::new(),
            custom_url: String::new(),
            description: String::new(),
            subscriber_count: None,
            video_count: None,
            published_at: None,
            channel_url,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url_derivation() {
        let id = ChannelId::new("UCabc123");
        assert_eq!(
            id.canonical_url(),
            "https://www.youtube.com/channel/UCabc123"
        );
    }

    #[test]
    fn test_new_record_has_url_and_missing_fields() {
        let record = ChannelRecord::new(ChannelId::new("UCxyz"));
        assert_eq!(record.channel_url, "https://www.youtube.com/channel/UCxyz");
        assert!(record.title.is_empty());
        assert!(record.subscriber_count.is_none());
        assert!(record.video_count.is_none());
        assert!(record.published_at.is_none());
    }

    #[test]
    fn test_channel_id_set_membership() {
        use std::collections::HashSet;

        let mut ids = HashSet::new();
        ids.insert(ChannelId::new("UC1"));
        ids.insert(ChannelId::new("UC2"));
        ids.insert(ChannelId::new("UC1"));
        assert_eq!(ids.len(), 2);
    }
}
