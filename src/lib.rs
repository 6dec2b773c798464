//! # wave-batch
//!
//! Bounded-concurrency batching for async producers, a race-with-timeout
//! helper, and a handful of value-level list utilities.
//!
//! ## Overview
//!
//! The core of the crate is a wave scheduler: given a `limit` and an ordered
//! list of zero-argument async producers, it runs the producers `limit` at a
//! time, joins each wave before starting the next, and returns every result in
//! input order. Each wave is an all-or-nothing `futures` join on the tokio
//! runtime.
//!
//! ## Key Features
//!
//! - **Wave runners**: [`batch::concurrent`], [`batch::concurrent_chunked`],
//!   [`batch::concurrent_fluent`] and the configured [`batch::WaveExecutor`]
//! - **Races**: [`race::race_with_sentinel`] and [`race::race_in_background`]
//!   resolve with whichever of an operation and a timer settles first, without
//!   cancelling the loser
//! - **Lists**: [`list`] helpers (`head`, `tail`, `reverse`, `split`, `flat`, ...)
//! - **Configuration**: [`config::RunnerConfig`] from defaults, YAML/JSON, and env
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use wave_batch::batch::{WaveExecutor, WaveStrategy};
//! use wave_batch::fetch::{demo_file_names, fetch_file};
//!
//! #[tokio::main]
//! async fn main() {
//!     let producers: Vec<_> = demo_file_names()
//!         .into_iter()
//!         .map(|name| move || fetch_file(name, Duration::from_secs(1)))
//!         .collect();
//!
//!     let executor = WaveExecutor::with_strategy(WaveStrategy::Bounded { limit: 2 });
//!     let report = executor.run_all(producers).await;
//!     println!("{} files in {:?}", report.len(), report.execution_time);
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Wave runners, chunking and fluent helpers |
//! | [`race`] | Race-with-timeout |
//! | [`list`] | Value-level list utilities |
//! | [`fetch`] | Simulated file fetch producers |
//! | [`config`] | Runner configuration |
//! | [`error`] | Error types |

pub mod batch;
pub mod config;
pub mod fetch;
pub mod list;
pub mod race;

pub use batch::{concurrent, WaveExecutor, WaveReport, WaveStrategy};
pub use config::RunnerConfig;
pub use fetch::FileRecord;
pub use race::{race_in_background, race_with_sentinel, RaceOutcome};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, WaveError};
