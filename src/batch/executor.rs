//! Wave executor.

use super::chunks::ChunkedExt;
use crate::config::{RunnerConfig, DEFAULT_LIMIT};
use crate::error::WaveError;
use futures::future::{join_all, try_join_all};
use futures::TryFutureExt;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct WaveReport<T> {
    /// Results in input order.
    pub results: Vec<T>,
    pub waves: usize,
    /// Effective per-wave limit used for the run.
    pub limit: usize,
    pub execution_time: Duration,
}

impl<T> WaveReport<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
    pub fn average_wave_time(&self) -> Duration {
        if self.waves == 0 {
            Duration::ZERO
        } else {
            self.execution_time / self.waves as u32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStrategy {
    /// One producer at a time.
    Sequential,
    /// Every producer in a single wave.
    Parallel,
    /// At most `limit` producers per wave.
    Bounded { limit: usize },
}

impl WaveStrategy {
    /// Per-wave limit for a batch of `len` producers. Never zero.
    pub fn limit_for(&self, len: usize) -> usize {
        match *self {
            WaveStrategy::Sequential => 1,
            WaveStrategy::Parallel => len.max(1),
            WaveStrategy::Bounded { limit } => limit.max(1),
        }
    }
}

impl Default for WaveStrategy {
    fn default() -> Self {
        WaveStrategy::Bounded {
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaveExecutorConfig {
    pub strategy: WaveStrategy,
    /// Label attached to log events.
    pub label: Option<String>,
}

impl WaveExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_strategy(mut self, s: WaveStrategy) -> Self {
        self.strategy = s;
        self
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&RunnerConfig> for WaveExecutorConfig {
    fn from(cfg: &RunnerConfig) -> Self {
        Self::new().with_strategy(WaveStrategy::Bounded { limit: cfg.limit })
    }
}

pub struct WaveExecutor {
    config: WaveExecutorConfig,
}

impl WaveExecutor {
    pub fn new() -> Self {
        Self {
            config: WaveExecutorConfig::default(),
        }
    }
    pub fn with_config(config: WaveExecutorConfig) -> Self {
        Self { config }
    }
    pub fn with_strategy(strategy: WaveStrategy) -> Self {
        Self::with_config(WaveExecutorConfig::new().with_strategy(strategy))
    }
    pub fn config(&self) -> &WaveExecutorConfig {
        &self.config
    }

    fn label(&self) -> &str {
        self.config.label.as_deref().unwrap_or("batch")
    }

    /// Run fallible producers wave by wave.
    ///
    /// The first failure ends the run; producers in later waves are never
    /// invoked.
    pub async fn run<T, E, F, Fut>(&self, producers: Vec<F>) -> Result<WaveReport<T>, WaveError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let start = Instant::now();
        let total = producers.len();
        let limit = self.config.strategy.limit_for(total);
        let mut results = Vec::with_capacity(total);
        let mut waves = 0;

        for (wave_no, wave) in producers.into_iter().enumerate().chunked(limit).enumerate() {
            debug!(label = self.label(), wave = wave_no, size = wave.len(), "starting wave");
            let joined = try_join_all(
                wave.into_iter()
                    .map(|(idx, f)| f().map_err(move |e| (idx, e))),
            )
            .await;
            match joined {
                Ok(values) => results.extend(values),
                Err((idx, e)) => {
                    warn!(
                        label = self.label(),
                        wave = wave_no,
                        index = idx,
                        error = %e,
                        "wave failed, abandoning remaining waves"
                    );
                    return Err(WaveError::new(wave_no, idx, e));
                }
            }
            waves += 1;
        }

        let execution_time = start.elapsed();
        info!(
            label = self.label(),
            total,
            waves,
            limit,
            elapsed_ms = execution_time.as_millis() as u64,
            "batch complete"
        );
        Ok(WaveReport {
            results,
            waves,
            limit,
            execution_time,
        })
    }

    /// Run producers that cannot fail.
    pub async fn run_all<T, F, Fut>(&self, producers: Vec<F>) -> WaveReport<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let start = Instant::now();
        let total = producers.len();
        let limit = self.config.strategy.limit_for(total);
        let mut results = Vec::with_capacity(total);
        let mut waves = 0;

        for (wave_no, wave) in producers.into_iter().chunked(limit).enumerate() {
            debug!(label = self.label(), wave = wave_no, size = wave.len(), "starting wave");
            results.extend(join_all(wave.into_iter().map(|f| f())).await);
            waves += 1;
        }

        let execution_time = start.elapsed();
        info!(
            label = self.label(),
            total,
            waves,
            limit,
            elapsed_ms = execution_time.as_millis() as u64,
            "batch complete"
        );
        WaveReport {
            results,
            waves,
            limit,
            execution_time,
        }
    }
}

impl Default for WaveExecutor {
    fn default() -> Self {
        Self::new()
    }
}
