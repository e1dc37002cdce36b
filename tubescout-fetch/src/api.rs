//! Remote API seam and wire types.
//!
//! [`ChannelApi`] is the boundary between orchestration and transport: the
//! discovery and retrieval phases only ever talk to this trait, so tests can
//! script responses without a network. The wire types mirror the remote
//! service's JSON with every sub-field optional; normalization into
//! [`ChannelRecord`] happens in [`ChannelItem::into_record`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use tubescout_core::{ChannelId, ChannelRecord, LocaleFilter};

use crate::error::ApiError;

// ============================================================================
// Channel API Trait
// ============================================================================

/// The two call shapes the pipeline needs from the remote service.
#[async_trait]
pub trait ChannelApi: Send + Sync {
    /// Fetches one page of channel search results for a keyword.
    ///
    /// `page_token` is the continuation cursor from the previous page, or
    /// `None` for the first page.
    async fn search_page(
        &self,
        credential: &str,
        keyword: &str,
        locale: &LocaleFilter,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ApiError>;

    /// Fetches detail objects for a batch of at most 50 identifiers.
    async fn list_channels(
        &self,
        credential: &str,
        ids: &[ChannelId],
    ) -> Result<ChannelListPage, ApiError>;
}

// ============================================================================
// Search Wire Types
// ============================================================================

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Continuation cursor; absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Result items for this page.
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

impl SearchPage {
    /// Iterates the channel identifiers on this page, skipping items that
    /// carry none.
    pub fn channel_ids(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.items
            .iter()
            .filter_map(|item| item.id.as_ref())
            .filter_map(|id| id.channel_id.as_deref())
            .map(ChannelId::new)
    }
}

/// A single search result item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    /// Typed identifier object; absent for malformed items.
    #[serde(default)]
    pub id: Option<SearchResultId>,
}

/// The identifier object inside a search result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    /// The channel identifier; absent for non-channel results.
    #[serde(default)]
    pub channel_id: Option<String>,
}

// ============================================================================
// Channel Detail Wire Types
// ============================================================================

/// Response to a bulk channel detail call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListPage {
    /// Detail objects, one per identifier the service still knows about.
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

/// Detail object for a single channel, every sub-field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    /// The channel identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Title, description, publish timestamp.
    #[serde(default)]
    pub snippet: Option<ChannelSnippet>,
    /// Subscriber and video counts.
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
    /// Branding settings carrying the custom URL.
    #[serde(default)]
    pub branding_settings: Option<BrandingSettings>,
}

/// The `snippet` facet of a channel detail object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    /// Channel title.
    #[serde(default)]
    pub title: Option<String>,
    /// Channel description.
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339 publish timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
}

/// The `statistics` facet of a channel detail object.
///
/// Counts arrive as JSON strings of digits; `hidden_subscriber_count: true`
/// typically accompanies an absent subscriber count.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    /// Subscriber count as a decimal string.
    #[serde(default)]
    pub subscriber_count: Option<String>,
    /// Video count as a decimal string.
    #[serde(default)]
    pub video_count: Option<String>,
    /// Whether the subscriber count is hidden.
    #[serde(default)]
    pub hidden_subscriber_count: Option<bool>,
}

/// The `brandingSettings` facet of a channel detail object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandingSettings {
    /// Channel-level branding.
    #[serde(default)]
    pub channel: Option<BrandingChannel>,
}

/// Channel-level branding settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingChannel {
    /// Custom URL / handle.
    #[serde(default)]
    pub custom_url: Option<String>,
}

// ============================================================================
// Normalization
// ============================================================================

impl ChannelItem {
    /// Normalizes a wire item into a [`ChannelRecord`].
    ///
    /// Returns `None` when the item carries no identifier: the canonical URL
    /// derives from the id, so an id-less item cannot be represented. Missing
    /// textual fields become empty strings; missing or unparseable counts and
    /// timestamps stay `None` rather than becoming zero.
    pub fn into_record(self) -> Option<ChannelRecord> {
        let id = ChannelId::new(self.id?);
        let snippet = self.snippet.unwrap_or_default();
        let statistics = self.statistics.unwrap_or_default();
        let branding = self.branding_settings.unwrap_or_default();

        let mut record = ChannelRecord::new(id);
        record.title = snippet.title.unwrap_or_default();
        record.description = snippet.description.unwrap_or_default();
        record.custom_url = branding
            .channel
            .and_then(|c| c.custom_url)
            .unwrap_or_default();
        record.subscriber_count = statistics
            .subscriber_count
            .and_then(|s| s.parse::<u64>().ok());
        record.video_count = statistics.video_count.and_then(|s| s.parse::<u64>().ok());
        record.published_at = snippet
            .published_at
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|t| t.with_timezone(&Utc));

        Some(record)
    }
}

// ============================================================================
// Tests
// ============================================================================
