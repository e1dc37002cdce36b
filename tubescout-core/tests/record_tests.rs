//! Integration tests for core channel types.

use tubescout_core::{ChannelId, ChannelRecord, LocaleFilter, SearchQuery};

#[test]
fn test_record_serialization_roundtrip() {
    let record = ChannelRecord::new(ChannelId::new("UCtest"));
    let json = serde_json::to_string(&record).unwrap();
    let parsed: ChannelRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
    assert!(parsed.subscriber_count.is_none());
}

#[test]
fn test_canonical_url_always_present() {
    let record = ChannelRecord::new(ChannelId::new("UCtest"));
    assert_eq!(record.channel_url, "https://www.youtube.com/channel/UCtest");
}

#[test]
fn test_query_normalization() {
    let query = SearchQuery::new(
        vec!["  rust  ".to_string(), "  ".to_string()],
        LocaleFilter::new("en", "GB"),
        5,
    );
    assert_eq!(query.keywords, vec!["rust"]);
    assert!(!query.is_trivially_empty());
}
