//! Ordered fan-out over a list of work items.
//!
//! At most `concurrency` item futures run at once and results come back in
//! input order, so callers that merge results (first-seen dedup, tallies) stay
//! deterministic. `concurrency = 1` runs the items strictly one after another.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

/// Run `fetch_one` over every item and collect all outcomes in input order.
pub async fn run_ordered<I, F, Fut>(
    items: I,
    concurrency: usize,
    fetch_one: F,
) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(items)
        .map(fetch_one)
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Like [`run_ordered`] but stops at the first error.
pub async fn try_run_ordered<I, T, E, F, Fut>(
    items: I,
    concurrency: usize,
    fetch_one: F,
) -> Result<Vec<T>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    stream::iter(items)
        .map(fetch_one)
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
