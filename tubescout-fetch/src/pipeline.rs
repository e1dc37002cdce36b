//! Channel discovery pipeline.
//!
//! [`ChannelPipeline`] runs the two phases strictly in sequence: identifier
//! discovery first, detail retrieval only after discovery fully completes.
//! The pipeline is stateless per invocation; each call owns its own
//! identifier set and record list.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use tubescout_core::{ChannelId, ChannelRecord, CoreError, LocaleFilter, SearchQuery};

use crate::api::ChannelApi;
use crate::client::YouTubeClient;
use crate::context::{CancelToken, FetchContext, FetchSettings};
use crate::details::fetch_details;
use crate::discovery::discover_ids;
use crate::error::FetchError;

// ============================================================================
// Channel Pipeline
// ============================================================================

/// Two-phase discovery-and-retrieval pipeline over a [`ChannelApi`].
pub struct ChannelPipeline {
    ctx: FetchContext,
}

impl ChannelPipeline {
    /// Creates a pipeline with default settings over the given API handle.
    pub fn new(api: Arc<dyn ChannelApi>) -> Self {
        Self {
            ctx: FetchContext::new(api),
        }
    }

    /// Creates a pipeline from a fully configured context.
    pub fn with_context(ctx: FetchContext) -> Self {
        Self { ctx }
    }

    /// Returns a handle that cancels this pipeline's invocations.
    pub fn cancel_token(&self) -> CancelToken {
        self.ctx.cancel.clone()
    }

    /// Discovers channels matching the query and enriches them with details.
    ///
    /// Partial data loss (a bad page, a degraded batch, exhausted retries)
    /// never raises; the best-effort accumulated result is returned. A
    /// trivially empty query returns an empty list without any remote call.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Rejected`] on an unrecoverable protocol
    /// rejection, [`FetchError::Cancelled`] when the cancel token fires, and
    /// [`FetchError::Core`] when the credential is empty.
    #[instrument(
        skip(self, credential, query),
        fields(keywords = query.keywords.len(), limit = query.limit)
    )]
    pub async fn discover_channels(
        &self,
        credential: &str,
        query: &SearchQuery,
    ) -> Result<Vec<ChannelRecord>, FetchError> {
        if credential.trim().is_empty() {
            return Err(CoreError::InvalidQuery("credential must not be empty".into()).into());
        }
        if query.is_trivially_empty() {
            debug!("Nothing to search, returning empty result");
            return Ok(Vec::new());
        }

        let ids = discover_ids(
            &self.ctx,
            credential,
            &query.keywords,
            &query.locale,
            query.limit,
        )
        .await?;

        if ids.is_empty() {
            info!("No unique channel identifiers found");
            return Ok(Vec::new());
        }

        let id_list: Vec<ChannelId> = ids.into_iter().collect();
        info!(discovered = id_list.len(), "Discovery complete, fetching details");

        let records = fetch_details(&self.ctx, credential, &id_list).await?;
        info!(
            discovered = id_list.len(),
            enriched = records.len(),
            "Pipeline complete"
        );

        Ok(records)
    }
}

// ============================================================================
// Convenience Entry
// ============================================================================

/// Discovers channels against the live service with default settings.
///
/// Builds a [`YouTubeClient`], assembles a [`SearchQuery`] from the scalar
/// inputs, and runs one pipeline invocation.
///
/// # Errors
///
/// See [`ChannelPipeline::discover_channels`]; additionally returns
/// [`FetchError::Http`] if the HTTP client cannot be built.
pub async fn discover_channels(
    credential: &str,
    keywords: Vec<String>,
    language: &str,
    country: &str,
    limit: usize,
) -> Result<Vec<ChannelRecord>, FetchError> {
    let query = SearchQuery::new(keywords, LocaleFilter::new(language, country), limit);
    let settings = FetchSettings::default();
    let client = YouTubeClient::with_timeout(settings.timeout)?;
    let ctx = FetchContext::new(Arc::new(client)).with_settings(settings);
    let pipeline = ChannelPipeline::with_context(ctx);
    pipeline.discover_channels(credential, &query).await
}
