//! Detail retrieval phase.
//!
//! Partitions the discovered identifiers into batches of at most 50 and
//! fetches detail records for each batch through the backoff executor. Every
//! batch is preceded by an unconditional pacing delay; a degraded batch
//! contributes zero records and retrieval continues.

use tracing::debug;

use tubescout_core::{ChannelId, ChannelRecord};

use crate::api::ChannelItem;

use crate::backoff::BackoffExecutor;
use crate::context::FetchContext;
use crate::error::FetchError;

/// Fetches normalized records for the given identifiers.
///
/// Output preserves batch order and within-batch response order. Some
/// identifiers may yield no record when the service no longer has data for
/// them, so `records.len() <= ids.len()`.
pub(crate) async fn fetch_details(
    ctx: &FetchContext,
    credential: &str,
    ids: &[ChannelId],
) -> Result<Vec<ChannelRecord>, FetchError> {
    let mut records = Vec::with_capacity(ids.len());
    if ids.is_empty() {
        return Ok(records);
    }

    let executor = BackoffExecutor::new(ctx.settings.backoff.clone());

    for (index, batch) in ids.chunks(ctx.settings.batch_size).enumerate() {
        // Pacing is unconditional, before the first batch too
        ctx.cancel.sleep(ctx.settings.batch_delay).await?;
        debug!(batch = index + 1, size = batch.len(), "Fetching detail batch");

        let outcome = executor
            .execute(&ctx.cancel, "channels", || {
                ctx.api.list_channels(credential, batch)
            })
            .await?;

        // A batch with no payload contributes zero records
        let Some(page) = outcome.into_payload() else {
            continue;
        };

        records.extend(page.items.into_iter().filter_map(ChannelItem::into_record));
    }

    Ok(records)
}
