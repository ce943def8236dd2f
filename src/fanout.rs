// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Bounded concurrent fan-out joined in input order.
//!
//! Both renderers issue one external call per actor. The calls run
//! concurrently on worker tasks gated by a semaphore, and results are joined
//! by original index, so final ordering always matches the source list no
//! matter which call resolves first.

use std::{future::Future, sync::Arc};

use tokio::sync::Semaphore;

use crate::error::Error;

/// Maximum number of per-actor external calls in flight for one bucket.
pub const MAX_IN_FLIGHT: usize = 8;

/// Runs `operation` over every item concurrently and collects the results in
/// input order.
///
/// Concurrency is capped at `limit` in-flight operations; a `limit` of zero
/// is treated as one. The first error aborts the join and is returned as the
/// overall result.
///
/// # Errors
///
/// Propagates the first error produced by `operation`, or
/// [`Error::Service`] when a worker task is cancelled or panics.
pub(crate) async fn map_ordered<T, R, F, Fut>(
    items: Vec<T>,
    limit: usize,
    operation: F
) -> Result<Vec<R>, Error>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = Result<R, Error>> + Send + 'static
{
    let gate = Arc::new(Semaphore::new(limit.max(1)));
    let mut handles = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let gate = Arc::clone(&gate);
        let future = operation(index, item);
        handles.push(tokio::spawn(async move {
            let _permit = gate
                .acquire_owned()
                .await
                .map_err(|_| Error::service("concurrency gate closed unexpectedly"))?;
            future.await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let value = handle
            .await
            .map_err(|e| Error::service(format!("worker task failed: {e}")))??;
        results.push(value);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering}
        },
        time::Duration
    };

    use tokio::time::sleep;

    use super::map_ordered;
    use crate::error::Error;

    #[tokio::test]
    async fn results_are_joined_in_input_order() {
        let items: Vec<usize> = (0..20).collect();
        let results = map_ordered(items, 4, |index, item| async move {
            // Later items finish earlier to exercise the ordered join.
            sleep(Duration::from_millis((20 - index) as u64)).await;
            Ok(item * 2)
        })
        .await
        .expect("fan-out should succeed");

        let expected: Vec<usize> = (0..20).map(|item| item * 2).collect();
        assert_eq!(results, expected);
    }

    #[tokio::test]
    async fn in_flight_operations_never_exceed_the_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..32).collect();
        let observed_in_flight = Arc::clone(&in_flight);
        let observed_peak = Arc::clone(&peak);
        map_ordered(items, 3, move |_, item| {
            let in_flight = Arc::clone(&observed_in_flight);
            let peak = Arc::clone(&observed_peak);
            async move {
                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(current, Ordering::SeqCst);
                sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok(item)
            }
        })
        .await
        .expect("fan-out should succeed");

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn first_failure_aborts_the_whole_join() {
        let items: Vec<usize> = (0..8).collect();
        let result = map_ordered(items, 2, |_, item| async move {
            if item == 5 {
                Err(Error::service("boom"))
            } else {
                Ok(item)
            }
        })
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let results = map_ordered(Vec::<usize>::new(), 4, |_, item| async move { Ok(item) })
            .await
            .expect("fan-out should succeed");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn zero_limit_is_treated_as_one() {
        let results = map_ordered(vec![1, 2, 3], 0, |_, item| async move { Ok(item) })
            .await
            .expect("fan-out should succeed");
        assert_eq!(results, [1, 2, 3]);
    }
}
