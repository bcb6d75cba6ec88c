use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Runs `job` on the tokio runtime without blocking the caller, retrying failures
/// with exponential backoff (2s, 4s, ...). The last error is logged and dropped.
pub fn spawn_with_retry<F, Fut, E>(label: &'static str, max_attempts: u32, job: F)
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display + Send,
{
    tokio::spawn(async move {
        retry_with_backoff(label, max_attempts, Duration::from_secs(1), job).await;
    });
}

/// Retries `job` up to `max_attempts` times, sleeping `base * 2^attempt` between tries.
/// Returns whether the job eventually succeeded.
pub async fn retry_with_backoff<F, Fut, E>(
    label: &'static str,
    max_attempts: u32,
    base: Duration,
    job: F,
) -> bool
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    for attempt in 1..=max_attempts {
        match job().await {
            Ok(()) => return true,
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    "{} attempt {}/{} failed: {}. Retrying...",
                    label,
                    attempt,
                    max_attempts,
                    e
                );
                tokio::time::sleep(base * 2_u32.pow(attempt)).await;
            }
            Err(e) => {
                tracing::error!("All {} {} attempts failed: {}", max_attempts, label, e);
            }
        }
    }
    false
}
