//! Bounded-concurrency wave runner.
//!
//! Runs an ordered list of zero-argument asynchronous producers with at most
//! `limit` of them in flight, returning results in input order.
//!
//! ## Overview
//!
//! Producers are split into consecutive waves of `limit`. Every producer of a
//! wave is invoked, the wave is joined, and only then does the next wave start.
//! A slow producer therefore holds back the next wave even when other slots are
//! idle; this is a lock-step scheduler, not a worker pool.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`concurrent`] | Index-loop runner |
//! | [`concurrent_chunked`] | Runner driven by the [`Chunked`] iterator adapter |
//! | [`concurrent_fluent`] | Runner written against the [`Fluent`] wrapper |
//! | [`WaveExecutor`] | Configured runner with logging and a [`WaveReport`] |
//! | [`WaveStrategy`] | Sequential, Parallel, or Bounded waves |
//!
//! ## Example
//!
//! ```rust
//! use wave_batch::batch::concurrent;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let producers: Vec<_> = (1..=6)
//!     .map(|i| move || async move { Ok::<_, String>(i * 10) })
//!     .collect();
//!
//! let results = concurrent(2, producers).await.unwrap();
//! assert_eq!(results, vec![10, 20, 30, 40, 50, 60]);
//! # }
//! ```
//!
//! ## Failure
//!
//! Joins are all-or-nothing. The first failing producer fails its wave and the
//! remaining waves never start; the returned [`WaveError`](crate::error::WaveError)
//! names the producer's input index and its wave.

mod chunks;
mod executor;
mod fluent;
mod runner;

pub use chunks::{Chunked, ChunkedExt};
pub use executor::{WaveExecutor, WaveExecutorConfig, WaveReport, WaveStrategy};
pub use fluent::Fluent;
pub use runner::{
    boxed, concurrent, concurrent_all, concurrent_chunked, concurrent_fluent, wave_count,
    BoxProducer,
};
