//! Rate-limit retry loop with capped exponential backoff.
//!
//! Applies only to [`ErrorKind::RateLimit`]; every other kind surfaces
//! immediately. The delay before retry `k` (1-indexed) is
//! `2^k * 1000ms + 1000ms`, i.e. 3s, 5s, 9s. Implemented as a loop so
//! the stack stays flat and the task stays cancellable at each sleep.

use std::time::Duration;

use crate::error::ErrorKind;
use crate::llm::ProviderResult;

/// Maximum retries after the initial attempt.
pub const MAX_RETRIES: u32 = 3;

/// Backoff before retry `retry` (1-indexed): 3000, 5000, 9000 ms.
pub fn backoff_delay(retry: u32) -> Duration {
    let multiplier = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
    Duration::from_millis(multiplier.saturating_mul(1000).saturating_add(1000))
}

/// Runs `attempt` until it succeeds, fails with a non-rate-limit error,
/// or exhausts `max_retries` rate-limit retries. The last classified
/// error is returned on exhaustion.
pub(crate) async fn retry_rate_limited<F, Fut>(
    provider: &str,
    max_retries: u32,
    mut attempt: F,
) -> ProviderResult<String>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = ProviderResult<String>>,
{
    let mut retries = 0;
    loop {
        match attempt().await {
            Ok(text) => {
                if retries > 0 {
                    tracing::debug!("{} request succeeded after {} retries", provider, retries);
                }
                return Ok(text);
            }
            Err(err) if err.kind == ErrorKind::RateLimit && retries < max_retries => {
                retries += 1;
                let delay = backoff_delay(retries);
                tracing::warn!(
                    "{} rate limit hit, retrying in {}ms (attempt {}/{})",
                    provider,
                    delay.as_millis(),
                    retries,
                    max_retries
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
