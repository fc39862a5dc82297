//! Bounded concurrent mapping for I/O-bound work.
//!
//! Runs an async function over a list of inputs with a fixed number of
//! calls in flight. Results come back in input order regardless of
//! completion order.

use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Instant;

/// Default number of concurrent calls
pub const DEFAULT_MAX_WORKERS: usize = 6;

/// Map `f` over `items` with at most `max_workers` calls in flight.
///
/// `label` names the work in progress logs. A `max_workers` of zero is
/// treated as one.
pub async fn map_bounded<T, R, F, Fut>(label: &str, items: Vec<T>, max_workers: usize, f: F) -> Vec<R>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = R>,
{
    let total = items.len();
    let workers = max_workers.max(1);
    let start = Instant::now();
    let step = (total / 10).max(1);

    tracing::info!("{}: {} items, {} workers", label, total, workers);

    let mut results = Vec::with_capacity(total);
    let mut completed = stream::iter(items).map(f).buffered(workers);

    while let Some(result) = completed.next().await {
        results.push(result);
        let done = results.len();
        if done % step == 0 || done == total {
            tracing::debug!("{}: {}/{}", label, done, total);
        }
    }

    tracing::info!(
        "{}: finished {} items in {}ms",
        label,
        total,
        start.elapsed().as_millis()
    );

    results
}
