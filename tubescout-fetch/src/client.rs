//! YouTube Data API v3 client.
//!
//! [`YouTubeClient`] is the production implementation of
//! [`ChannelApi`]: it builds the two endpoint requests and classifies HTTP
//! failures into the [`ApiError`] taxonomy the backoff executor understands.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use tubescout_core::{ChannelId, LocaleFilter};

use crate::api::{ChannelApi, ChannelListPage, SearchPage};
use crate::error::{ApiError, FetchError};

// ============================================================================
// Constants
// ============================================================================

/// YouTube Data API v3 base URL.
const API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

/// Search endpoint, relative to the base.
const SEARCH_ENDPOINT: &str = "search";

/// Channel detail endpoint, relative to the base.
const CHANNELS_ENDPOINT: &str = "channels";

/// Facets requested from the search call.
const SEARCH_PARTS: &str = "snippet";

/// Facets requested from the detail call.
const DETAIL_PARTS: &str = "snippet,statistics,brandingSettings";

/// Result-type filter: channel-like resources only.
const SEARCH_TYPE: &str = "channel";

/// User agent string for TubeScout.
const USER_AGENT: &str = concat!("TubeScout/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Error Body
// ============================================================================

/// Error envelope the service attaches to failed responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Pulls the human-readable message out of an error body, if present.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// Classifies a non-success HTTP status.
///
/// 403/429 are rate limiting; any other 4xx is an unrecoverable rejection
/// (bad API key, malformed request); 5xx is transient. Classification is by
/// status code alone, the body only contributes the message.
fn classify_status(status: StatusCode, body: &str) -> ApiError {
    let code = status.as_u16();
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimited { status: code }
    } else if status.is_client_error() {
        ApiError::Rejected {
            status: code,
            message: error_message(body),
        }
    } else {
        ApiError::Transient(format!("HTTP {code}: {}", error_message(body)))
    }
}

// ============================================================================
// YouTube Client
// ============================================================================

/// Reqwest-backed implementation of [`ChannelApi`].
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    search_url: Url,
    channels_url: Url,
    timeout: Duration,
}

impl YouTubeClient {
    /// Creates a client with the default 30 second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(API_BASE).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Self::with_base_url(base, timeout)
    }

    /// Creates a client against an alternate base URL (for test servers).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the endpoint URLs cannot be
    /// derived from the base, or [`FetchError::Http`] if the HTTP client
    /// cannot be built.
    pub fn with_base_url(base: Url, timeout: Duration) -> Result<Self, FetchError> {
        let search_url = base
            .join(SEARCH_ENDPOINT)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        let channels_url = base
            .join(CHANNELS_ENDPOINT)
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            search_url,
            channels_url,
            timeout,
        })
    }

    /// Returns the per-request timeout this client was built with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues a GET and decodes the JSON body, classifying failures.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response received");

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transient(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to decode response body");
            ApiError::Transient(format!("undecodable body: {e}"))
        })
    }
}

#[async_trait]
impl ChannelApi for YouTubeClient {
    #[instrument(skip(self, credential, locale))]
    async fn search_page(
        &self,
        credential: &str,
        keyword: &str,
        locale: &LocaleFilter,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ApiError> {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", credential)
                .append_pair("part", SEARCH_PARTS)
                .append_pair("q", keyword)
                .append_pair("type", SEARCH_TYPE)
                .append_pair("regionCode", &locale.region)
                .append_pair("relevanceLanguage", &locale.language)
                .append_pair("maxResults", &page_size.to_string());
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
        }

        debug!(has_token = page_token.is_some(), "Searching channels");
        self.get_json(url).await
    }

    #[instrument(skip(self, credential, ids), fields(batch = ids.len()))]
    async fn list_channels(
        &self,
        credential: &str,
        ids: &[ChannelId],
    ) -> Result<ChannelListPage, ApiError> {
        let joined = ids
            .iter()
            .map(ChannelId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.channels_url.clone();
        url.query_pairs_mut()
            .append_pair("key", credential)
            .append_pair("part", DETAIL_PARTS)
            .append_pair("id", &joined);

        debug!("Fetching channel details");
        self.get_json(url).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YouTubeClient::new().unwrap();
        assert_eq!(client.search_url.path(), "/youtube/v3/search");
        assert_eq!(client.channels_url.path(), "/youtube/v3/channels");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_configured_timeout_reaches_client() {
        let client = YouTubeClient::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rate_limit_statuses() {
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "{}"),
            ApiError::RateLimited { status: 403 }
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "{}"),
            ApiError::RateLimited { status: 429 }
        ));
    }

    #[test]
    fn test_other_client_errors_are_rejections() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid"}}"#;
        match classify_status(StatusCode::BAD_REQUEST, body) {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_server_errors_are_transient() {
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            ApiError::Transient(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::Transient(_)
        ));
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("plain text failure"), "plain text failure");
        assert_eq!(
            error_message(r#"{"error": {"message": "quota exceeded"}}"#),
            "quota exceeded"
        );
    }
}
