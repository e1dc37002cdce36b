//! Identifier discovery phase.
//!
//! Walks the keyword list in order, paginating each keyword's search results
//! through the backoff executor and deduplicating identifiers into a set.
//! Stops as soon as the global limit is reached; a degraded or empty page
//! ends pagination for that keyword only.

use std::collections::HashSet;

use tracing::{debug, info};

use tubescout_core::{ChannelId, LocaleFilter};

use crate::backoff::BackoffExecutor;
use crate::context::FetchContext;
use crate::error::FetchError;

/// Discovers up to `limit` unique channel identifiers matching any keyword.
///
/// Returns early with an empty set, issuing zero remote calls, when the
/// keyword list is empty or the limit is zero.
pub(crate) async fn discover_ids(
    ctx: &FetchContext,
    credential: &str,
    keywords: &[String],
    locale: &LocaleFilter,
    limit: usize,
) -> Result<HashSet<ChannelId>, FetchError> {
    let mut ids: HashSet<ChannelId> = HashSet::new();
    if keywords.is_empty() || limit == 0 {
        return Ok(ids);
    }

    let executor = BackoffExecutor::new(ctx.settings.backoff.clone());
    let page_size = ctx.settings.page_size;

    'keywords: for keyword in keywords {
        debug!(keyword = %keyword, "Searching keyword");
        let mut page_token: Option<String> = None;

        loop {
            if ids.len() >= limit {
                info!(limit, "Channel limit reached, stopping search");
                break 'keywords;
            }

            let token = page_token.clone();
            let outcome = executor
                .execute(&ctx.cancel, "search", || {
                    ctx.api
                        .search_page(credential, keyword, locale, page_size, token.as_deref())
                })
                .await?;

            // Degraded or exhausted call: this keyword is done, not an error
            let Some(page) = outcome.into_payload() else {
                break;
            };
            if page.items.is_empty() {
                break;
            }

            for id in page.channel_ids() {
                ids.insert(id);
            }
            debug!(keyword = %keyword, unique = ids.len(), "Collected page of identifiers");

            match page.next_page_token {
                None => {
                    debug!(keyword = %keyword, "All pages exhausted");
                    break;
                }
                Some(token) => {
                    ctx.cancel.sleep(ctx.settings.page_delay).await?;
                    page_token = Some(token);
                }
            }
        }
    }

    // Set order is not meaningful, so truncation order is arbitrary
    if ids.len() > limit {
        ids = ids.into_iter().take(limit).collect();
    }

    Ok(ids)
}
