//! Wave runners.
//!
//! Every function here has the same contract: invoke producers in waves of at
//! most `limit`, join each wave before starting the next, and return results
//! in input order. They differ only in how the waves are formed.
//!
//! A failing producer fails its wave (the other futures of that wave are
//! dropped) and no later wave is started.

use super::chunks::ChunkedExt;
use super::fluent::Fluent;
use crate::error::WaveError;
use futures::future::{join_all, try_join_all, BoxFuture};
use futures::TryFutureExt;
use std::future::Future;

/// A type-erased producer, for lists whose closures have different types.
pub type BoxProducer<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, T> + Send + 'a>;

/// Erase a producer's closure and future types.
pub fn boxed<'a, F, Fut>(f: F) -> BoxProducer<'a, Fut::Output>
where
    F: FnOnce() -> Fut + Send + 'a,
    Fut: Future + Send + 'a,
{
    Box::new(move || Box::pin(f()) as BoxFuture<'a, Fut::Output>)
}

/// Number of waves needed for `total` producers at `limit` per wave.
pub fn wave_count(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1))
}

/// Index-loop version: wave `i` holds producers `i * limit .. i * limit + limit`.
pub async fn concurrent<T, E, F, Fut>(
    limit: usize,
    producers: Vec<F>,
) -> Result<Vec<T>, WaveError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let limit = limit.max(1);
    let total = producers.len();
    let mut slots: Vec<Option<F>> = producers.into_iter().map(Some).collect();
    let mut waves: Vec<Vec<T>> = Vec::with_capacity(wave_count(total, limit));

    for i in 0..wave_count(total, limit) {
        let mut pending = Vec::with_capacity(limit);
        for j in 0..limit {
            let idx = i * limit + j;
            if let Some(f) = slots.get_mut(idx).and_then(Option::take) {
                pending.push(f().map_err(move |e| (idx, e)));
            }
        }
        let results = try_join_all(pending)
            .await
            .map_err(|(idx, e)| WaveError::new(i, idx, e))?;
        waves.push(results);
    }

    Ok(waves.into_iter().flatten().collect())
}

/// Index-loop version for producers that cannot fail.
pub async fn concurrent_all<T, F, Fut>(limit: usize, producers: Vec<F>) -> Vec<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let limit = limit.max(1);
    let mut out = Vec::with_capacity(producers.len());
    let mut rest = producers.into_iter();
    loop {
        let wave: Vec<Fut> = rest.by_ref().take(limit).map(|f| f()).collect();
        if wave.is_empty() {
            break;
        }
        out.extend(join_all(wave).await);
    }
    out
}

/// Chunk-iterator version: waves come from [`ChunkedExt::chunked`].
pub async fn concurrent_chunked<T, E, F, Fut>(
    limit: usize,
    producers: Vec<F>,
) -> Result<Vec<T>, WaveError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut out = Vec::with_capacity(producers.len());
    for (wave_no, wave) in producers.into_iter().enumerate().chunked(limit).enumerate() {
        let results = try_join_all(
            wave.into_iter()
                .map(|(idx, f)| f().map_err(move |e| (idx, e))),
        )
        .await
        .map_err(|(idx, e)| WaveError::new(wave_no, idx, e))?;
        out.extend(results);
    }
    Ok(out)
}

/// Fluent version: `chunk`, `map` each chunk to its joined wave, await in
/// order, then `flatten`.
pub async fn concurrent_fluent<T, E, F, Fut>(
    limit: usize,
    producers: Vec<F>,
) -> Result<Vec<T>, WaveError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let waves = Fluent::new(producers.into_iter().enumerate())
        .chunk(limit)
        .map(|wave| {
            try_join_all(
                wave.into_iter()
                    .map(|(idx, f)| f().map_err(move |e| (idx, e))),
            )
        });

    let mut settled = Vec::new();
    for (wave_no, joined) in waves.enumerate() {
        settled.push(
            joined
                .await
                .map_err(|(idx, e)| WaveError::new(wave_no, idx, e))?,
        );
    }
    Ok(Fluent::new(settled).flatten().to_vec())
}
