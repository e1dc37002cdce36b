//! Backoff executor for remote calls.
//!
//! Every remote call in the pipeline goes through [`BackoffExecutor`]. It
//! knows nothing about the API's domain semantics; it only looks at the
//! [`ApiError`] classification of a failed call:
//!
//! - rate-limited calls are retried with exponentially growing delays,
//! - transient failures degrade the call to "no data" immediately,
//! - protocol rejections abort as a hard [`FetchError`].

use std::time::Duration;

use tracing::warn;

use crate::context::CancelToken;
use crate::error::{ApiError, FetchError};

// ============================================================================
// Backoff Policy
// ============================================================================

/// Retry policy for rate-limited remote calls.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Maximum number of rate-limited retries before giving up.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl BackoffPolicy {
    /// Creates a policy with the given retry count.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Sets the initial delay.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Calculates the delay after the given number of completed retries.
    ///
    /// `retries = 0` yields the initial delay, each further retry doubles it,
    /// capped at `max_delay`.
    pub fn delay_after(&self, retries: u32) -> Duration {
        let factor = 2u32.saturating_pow(retries);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(5)
    }
}

// ============================================================================
// Call Outcome
// ============================================================================

/// Terminal outcome of an executed remote call.
///
/// Only [`CallOutcome::Completed`] carries data; the other variants tell the
/// orchestration "no data available right now" and must not be treated as
/// errors.
#[derive(Debug)]
pub enum CallOutcome<T> {
    /// The call succeeded.
    Completed(T),
    /// Every rate-limited retry was used up.
    RetriesExhausted,
    /// The call failed with a transient, non-rate-limit error.
    Degraded,
}

impl<T> CallOutcome<T> {
    /// Returns the payload, if the call completed.
    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Completed(payload) => Some(payload),
            Self::RetriesExhausted | Self::Degraded => None,
        }
    }
}

// ============================================================================
// Backoff Executor
// ============================================================================

/// Executes a remote call with bounded exponential retry on rate limits.
///
/// Stateless across calls; each `execute` starts from a fresh retry count.
#[derive(Debug, Clone, Default)]
pub struct BackoffExecutor {
    policy: BackoffPolicy,
}

impl BackoffExecutor {
    /// Creates an executor with the given policy.
    pub fn new(policy: BackoffPolicy) -> Self {
        Self { policy }
    }

    /// Runs `call` until it completes, degrades, or exhausts its retries.
    ///
    /// The cancellation token is checked before every attempt and interrupts
    /// any backoff sleep.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Rejected`] when the call fails with a protocol
    /// rejection, and [`FetchError::Cancelled`] when the token fires.
    pub async fn execute<T, F, Fut>(
        &self,
        cancel: &CancelToken,
        label: &str,
        mut call: F,
    ) -> Result<CallOutcome<T>, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut retries = 0;
        loop {
            cancel.checked()?;

            match call().await {
                Ok(payload) => return Ok(CallOutcome::Completed(payload)),
                Err(ApiError::RateLimited { status }) => {
                    // No retry budget left: exhaust without sleeping
                    if retries >= self.policy.max_retries {
                        warn!(call = label, retries, "Maximum retries reached");
                        return Ok(CallOutcome::RetriesExhausted);
                    }

                    let delay = self.policy.delay_after(retries);
                    retries += 1;
                    warn!(
                        call = label,
                        status,
                        attempt = retries,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off"
                    );
                    cancel.sleep(delay).await?;

                    if retries >= self.policy.max_retries {
                        warn!(call = label, retries, "Maximum retries reached");
                        return Ok(CallOutcome::RetriesExhausted);
                    }
                }
                Err(ApiError::Transient(message)) => {
                    warn!(call = label, error = %message, "Remote call degraded");
                    return Ok(CallOutcome::Degraded);
                }
                Err(ApiError::Rejected { status, message }) => {
                    return Err(FetchError::Rejected { status, message });
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
