//! Exponential backoff retry utility
//!
//! Provides configurable retry with exponential backoff and jitter for
//! transient failures, used by the ledger source when fetching over HTTP.
//!
//! # Examples
//!
//! ```
//! use salesdash_core::retry::{retry_with_backoff, RetryPolicy};
//!
//! async fn fetch_ledger() -> Result<String, std::io::Error> {
//!     Ok("CLIENTE,PRODUTO".to_string())
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let body = retry_with_backoff(
//!     || async { fetch_ledger().await },
//!     RetryPolicy::default(),
//!     |err: &std::io::Error| err.kind() == std::io::ErrorKind::ConnectionRefused,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Retry policy configuration for exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 means no retries, only the initial attempt)
    pub max_retries: u32,

    /// Base delay in milliseconds for the first retry
    pub base_delay_ms: u64,

    /// Maximum delay in milliseconds to cap exponential growth
    pub max_delay_ms: u64,

    /// Whether to add random jitter to delays
    pub jitter: bool,
}

impl Default for RetryPolicy {
    /// Default policy: 3 retries, 100 ms base, 5 s cap, jitter on
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 5000,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy with custom parameters
    pub fn new(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64, jitter: bool) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
            jitter,
        }
    }

    /// Gentle policy for non-critical reads: 2 retries, 500 ms base
    pub fn gentle() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 3000,
            jitter: true,
        }
    }

    /// Calculates the delay for a given retry attempt
    ///
    /// Exponential backoff: delay = min(base * 2^attempt, max_delay),
    /// plus up to 30% jitter when enabled.
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential_delay = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt));

        let capped_delay = exponential_delay.min(self.max_delay_ms);

        let final_delay = if self.jitter {
            let jitter_range = (capped_delay as f64 * 0.3) as u64;
            let jitter = if jitter_range > 0 {
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos() as u64;
                nanos % (jitter_range + 1)
            } else {
                0
            };
            capped_delay.saturating_add(jitter)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay)
    }
}

/// Retries an async operation with exponential backoff
///
/// Runs `operation` until it succeeds, exhausts `policy.max_retries`, or
/// fails with an error `is_retryable` rejects. The last error is
/// returned when retries run out.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    mut operation: F,
    policy: RetryPolicy,
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries || !is_retryable(&err) {
                    return Err(err);
                }

                let delay = policy.calculate_delay(attempt);
                tracing::warn!(
                    "attempt {} failed ({}), retrying in {:?}",
                    attempt + 1,
                    err,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
