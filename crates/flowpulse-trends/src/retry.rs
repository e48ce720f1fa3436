//! Retry with exponential back-off and jitter for the trends client.
//!
//! Only genuinely transient failures are retried. A 429 is deliberately NOT
//! retried here: hammering the quota window makes it worse, and the
//! ingestion loop already responds to throttling with a long cooldown
//! before the next unit.

use std::future::Future;
use std::time::Duration;

use crate::error::TrendsError;

/// Returns `true` for errors that are worth retrying after a back-off delay:
/// network-level failures (timeout, connection reset) and HTTP 5xx.
///
/// [`TrendsError::RateLimited`], [`TrendsError::MissingWidget`], and
/// [`TrendsError::Deserialize`] are returned immediately.
pub(crate) fn is_retriable(err: &TrendsError) -> bool {
    match err {
        TrendsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        TrendsError::RateLimited { .. }
        | TrendsError::MissingWidget { .. }
        | TrendsError::Deserialize { .. }
        | TrendsError::InvalidUrl(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors. The sleep before the n-th retry is
/// `backoff_base_ms × 2^(n-1)` with ±25% jitter, capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, TrendsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TrendsError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "trends transient error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn rate_limited_is_not_retriable() {
        assert!(!is_retriable(&TrendsError::RateLimited {
            keyword: "n8n workflow".to_owned()
        }));
    }

    #[test]
    fn missing_widget_is_not_retriable() {
        assert!(!is_retriable(&TrendsError::MissingWidget {
            keyword: "n8n workflow".to_owned()
        }));
    }

    #[tokio::test]
    async fn does_not_retry_rate_limited() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(TrendsError::RateLimited {
                    keyword: "n8n workflow".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "RateLimited must not be retried"
        );
        assert!(matches!(result, Err(TrendsError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn retries_connect_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 2 {
                    let resp = reqwest::Client::new()
                        .get("http://0.0.0.0:1")
                        .send()
                        .await
                        .unwrap_err();
                    Err::<u32, _>(TrendsError::Http(resp))
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
