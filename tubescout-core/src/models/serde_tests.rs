//! Serde serialization/deserialization tests for core types.
//!
//! These tests verify that core types survive a JSON round-trip and that
//! the "unavailable" representation of missing numeric fields is preserved
//! (null, never zero).

use chrono::{TimeZone, Utc};
use serde_json;

use crate::{ChannelId, ChannelRecord, LocaleFilter, SearchQuery};

// ============================================================================
// ChannelId Serde Tests
// ============================================================================

#[test]
fn test_channel_id_serializes_transparently() {
    let id = ChannelId::new("UCabc");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""UCabc""#);

    let back: ChannelId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

// ============================================================================
// ChannelRecord Serde Tests
// ============================================================================

#[test]
fn test_record_roundtrip_full() {
    let mut record = ChannelRecord::new(ChannelId::new("UC123"));
    record.title = "Test Channel".to_string();
    record.custom_url = "@testchannel".to_string();
    record.description = "A channel".to_string();
    record.subscriber_count = Some(12_345);
    record.video_count = Some(67);
    record.published_at = Some(Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap());

    let json = serde_json::to_string(&record).unwrap();
    let back: ChannelRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_record_missing_counts_serialize_as_null() {
    let record = ChannelRecord::new(ChannelId::new("UC123"));
    let value = serde_json::to_value(&record).unwrap();

    // Unavailable counts must be null, not 0
    assert!(value["subscriber_count"].is_null());
    assert!(value["video_count"].is_null());
    assert!(value["published_at"].is_null());
    assert_eq!(value["channel_url"], "https://www.youtube.com/channel/UC123");
}

// ============================================================================
// Query Serde Tests
// ============================================================================

#[test]
fn test_search_query_roundtrip() {
    let query = SearchQuery::new(
        vec!["cats".to_string(), "dogs".to_string()],
        LocaleFilter::new("en", "US"),
        25,
    );

    let json = serde_json::to_string(&query).unwrap();
    let back: SearchQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
}
