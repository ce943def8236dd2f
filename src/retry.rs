// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// Retry with exponential backoff for transient platform failures.
///
/// List fetches hit rate limits and flaky network paths; those are worth
/// retrying with growing delays. Failures the crate classifies as permanent
/// (bad configuration, broken avatar, persistence) surface immediately.
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::Error;

/// Configuration for retry behavior with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts including the first (default: 3).
    pub max_attempts:     u32,
    /// Delay before the first retry in milliseconds (default: 1000).
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after every retry (default: 2.0).
    pub backoff_factor:   f64
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts:     3,
            initial_delay_ms: 1000,
            backoff_factor:   2.0
        }
    }
}

/// Runs `f` until it succeeds, exhausts `config.max_attempts` or returns an
/// error that is not retryable.
///
/// Retry eligibility is decided by [`Error::is_retryable`]: transport and
/// infrastructure failures are retried, everything else is returned on the
/// first occurrence.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last retryable error once
/// all attempts are exhausted.
///
/// # Example
///
/// ```no_run
/// use contributor_wall::{
///     Error,
///     retry::{RetryConfig, retry_with_backoff}
/// };
///
/// # async fn example() -> Result<(), Error> {
/// let config = RetryConfig::default();
/// let result = retry_with_backoff(&config, "fetch contributors", || async {
///     Ok::<_, Error>(42)
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Error>>
{
    let mut attempt = 1;
    let mut delay_ms = config.initial_delay_ms;

    loop {
        match f().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(error) if !error.is_retryable() => {
                warn!("{} failed with a permanent error: {}", operation_name, error);
                return Err(error);
            }
            Err(error) => {
                if attempt >= config.max_attempts {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, config.max_attempts, error
                    );
                    return Err(error);
                }

                warn!(
                    "{} failed on attempt {}/{}: {}. Retrying in {}ms...",
                    operation_name, attempt, config.max_attempts, error, delay_ms
                );

                sleep(Duration::from_millis(delay_ms)).await;
                delay_ms = (delay_ms as f64 * config.backoff_factor) as u64;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn retry_config_default_values() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay_ms, 1000);
        assert_eq!(config.backoff_factor, 2.0);
    }

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let config = RetryConfig::default();
        let result = retry_with_backoff(&config, "test", || async { Ok::<_, Error>(42) })
            .await
            .expect("should succeed");
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn retry_succeeds_after_transient_failures() {
        let config = RetryConfig {
            max_attempts:     3,
            initial_delay_ms: 10,
            backoff_factor:   2.0
        };
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        let result = retry_with_backoff(&config, "test", move || {
            let counter = counter_clone.clone();
            async move {
                let mut count = counter.lock().unwrap();
                *count += 1;
                if *count < 3 {
                    Err(Error::fetch("temporary failure"))
                } else {
                    Ok(42)
                }
            }
        })
        .await
        .expect("should succeed after retries");

        assert_eq!(result, 42);
        assert_eq!(*counter.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn retry_fails_after_max_attempts() {
        let config = RetryConfig {
            max_attempts:     2,
            initial_delay_ms: 10,
            backoff_factor:   2.0
        };
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        let result = retry_with_backoff(&config, "test", move || {
            let counter = counter_clone.clone();
            async move {
                let mut count = counter.lock().unwrap();
                *count += 1;
                Err::<i32, _>(Error::fetch("persistent failure"))
            }
        })
        .await;

        assert!(result.is_err(), "should fail after max attempts");
        assert_eq!(*counter.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let config = RetryConfig {
            max_attempts:     5,
            initial_delay_ms: 10,
            backoff_factor:   2.0
        };
        let counter = Arc::new(Mutex::new(0));
        let counter_clone = counter.clone();

        let result = retry_with_backoff(&config, "test", move || {
            let counter = counter_clone.clone();
            async move {
                let mut count = counter.lock().unwrap();
                *count += 1;
                Err::<i32, _>(Error::validation("malformed pattern"))
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(*counter.lock().unwrap(), 1, "permanent errors must not be retried");
    }
}
