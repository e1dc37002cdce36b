//! Fetch context, settings, and cancellation.
//!
//! The context bundles what the pipeline phases need: the remote API handle,
//! pacing/backoff settings, and a cancellation token checked before every
//! remote call and every sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::api::ChannelApi;
use crate::backoff::BackoffPolicy;
use crate::error::FetchError;

/// The remote search service never returns more than 50 items per page
/// or accepts more than 50 ids per detail call.
pub const SERVICE_MAX_PAGE_SIZE: u32 = 50;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Pacing and backoff configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Search page size; clamped to the service maximum of 50.
    pub page_size: u32,
    /// Detail batch size; clamped to the service maximum of 50.
    pub batch_size: usize,
    /// Delay between consecutive search pages of one keyword.
    pub page_delay: Duration,
    /// Delay before every detail batch, including the first.
    pub batch_delay: Duration,
    /// Retry policy for rate-limited calls.
    pub backoff: BackoffPolicy,
    /// Timeout for a single HTTP request.
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: SERVICE_MAX_PAGE_SIZE,
            batch_size: SERVICE_MAX_PAGE_SIZE as usize,
            page_delay: Duration::from_secs(2),
            batch_delay: Duration::from_secs(2),
            backoff: BackoffPolicy::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchSettings {
    /// Sets the search page size, clamped to `1..=50`.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, SERVICE_MAX_PAGE_SIZE);
        self
    }

    /// Sets the detail batch size, clamped to `1..=50`.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.clamp(1, SERVICE_MAX_PAGE_SIZE as usize);
        self
    }

    /// Sets the inter-page delay.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Sets the pre-batch delay.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Sets the backoff policy.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Cancel Token
// ============================================================================

/// Cheaply cloneable cancellation handle.
///
/// The pipeline checks the token before every remote call, and every pacing
/// or backoff sleep races against it, so a caller can abort a long-running
/// discovery without waiting for all keywords and pages to exhaust.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Wakes all pending sleeps exactly once.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Fails fast if cancellation has been requested.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] once the token has fired.
    pub fn checked(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleeps for `duration` unless cancellation interrupts it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] when the token fires before or
    /// during the sleep.
    pub async fn sleep(&self, duration: Duration) -> Result<(), FetchError> {
        self.checked()?;
        tokio::select! {
            () = self.inner.notify.notified() => Err(FetchError::Cancelled),
            () = tokio::time::sleep(duration) => self.checked(),
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Everything the discovery and retrieval phases need for one invocation.
pub struct FetchContext {
    /// Handle to the remote search-and-detail service.
    pub api: Arc<dyn ChannelApi>,
    /// Pacing and backoff settings.
    pub settings: FetchSettings,
    /// Cancellation token for this invocation.
    pub cancel: CancelToken,
}

impl FetchContext {
    /// Creates a context with default settings and a fresh token.
    pub fn new(api: Arc<dyn ChannelApi>) -> Self {
        Self {
            api,
            settings: FetchSettings::default(),
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the effective per-request timeout.
    ///
    /// Embedding code that constructs its own [`crate::YouTubeClient`]
    /// should build it with this value so the settings stay authoritative.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tubescout_core::{ChannelId, LocaleFilter};

    use crate::api::{ChannelListPage, SearchPage};
    use crate::error::ApiError;

    struct NullApi;

    #[async_trait]
    impl ChannelApi for NullApi {
        async fn search_page(
            &self,
            _credential: &str,
            _keyword: &str,
            _locale: &LocaleFilter,
            _page_size: u32,
            _page_token: Option<&str>,
        ) -> Result<SearchPage, ApiError> {
            Ok(SearchPage::default())
        }

        async fn list_channels(
            &self,
            _credential: &str,
            _ids: &[ChannelId],
        ) -> Result<ChannelListPage, ApiError> {
            Ok(ChannelListPage::default())
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = FetchSettings::default();
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.batch_size, 50);
        assert_eq!(settings.page_delay, Duration::from_secs(2));
        assert_eq!(settings.batch_delay, Duration::from_secs(2));
        assert_eq!(settings.backoff.max_retries, 5);
    }

    #[test]
    fn test_page_size_clamped_to_service_maximum() {
        let settings = FetchSettings::default().with_page_size(500);
        assert_eq!(settings.page_size, 50);

        let settings = FetchSettings::default().with_page_size(0);
        assert_eq!(settings.page_size, 1);

        let settings = FetchSettings::default().with_batch_size(200);
        assert_eq!(settings.batch_size, 50);
    }

    #[test]
    fn test_context_timeout_follows_settings() {
        let ctx = FetchContext::new(Arc::new(NullApi))
            .with_settings(FetchSettings::default().with_timeout(Duration::from_secs(5)));
        assert_eq!(ctx.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_sleep_completes_when_not_cancelled() {
        let token = CancelToken::new();
        assert!(token.sleep(Duration::from_millis(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_token_refuses_to_sleep() {
        let token = CancelToken::new();
        token.cancel();

        assert!(token.checked().is_err());
        assert!(matches!(
            token.sleep(Duration::from_secs(60)).await,
            Err(FetchError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_sleep() {
        let token = CancelToken::new();
        let sleeper = token.clone();

        let handle = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(60)).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }
}
