//! Demo: six simulated file fetches in waves, then the two race scenarios.
//!
//! Configuration comes from `WAVE_BATCH_CONFIG` (YAML or JSON file) and
//! `WAVE_BATCH_*` variables; log level from `RUST_LOG` (default `info`).

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wave_batch::batch::{WaveExecutor, WaveExecutorConfig};
use wave_batch::config::RunnerConfig;
use wave_batch::fetch::{demo_file_names, fetch_file};
use wave_batch::race::{race_with_sentinel, RaceOutcome};

const TIMEOUT: &str = "timeout";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RunnerConfig::load().context("loading runner configuration")?;

    println!("=== Waves of {} ===\n", config.limit);
    batch_demo(&config).await?;

    println!("\n=== Race against {:?} ===\n", config.race_timeout());
    network_race(&config).await;

    println!("\n=== Loading state after {:?} ===\n", config.loading_timeout());
    loading_race(&config).await;

    Ok(())
}

async fn batch_demo(config: &RunnerConfig) -> anyhow::Result<()> {
    let latency = config.fetch_delay();
    let producers: Vec<_> = demo_file_names()
        .into_iter()
        .map(|name| move || fetch_file(name, latency))
        .collect();

    let executor =
        WaveExecutor::with_config(WaveExecutorConfig::from(config).with_label("files"));
    let report = executor.run_all(producers).await;

    println!("{}", serde_json::to_string_pretty(&report.results)?);
    println!(
        "{} files, {} waves, {:?}",
        report.len(),
        report.waves,
        report.execution_time
    );
    Ok(())
}

async fn network_race(config: &RunnerConfig) {
    let file = fetch_file("file1.png", config.fetch_delay());
    match race_with_sentinel(file, config.race_timeout(), TIMEOUT).await {
        RaceOutcome::Primary(record) => println!("{:?}", record),
        RaceOutcome::Sentinel { .. } => println!("Check your network connection"),
    }
}

async fn loading_race(config: &RunnerConfig) {
    let file = fetch_file("file1.png", config.fetch_delay());
    let outcome = race_with_sentinel(file, config.loading_timeout(), TIMEOUT).await;
    match outcome {
        RaceOutcome::Primary(_) => println!("Render!!"),
        RaceOutcome::Sentinel { pending, .. } => {
            println!("Loading...");
            println!("{:?}", pending.await);
        }
    }
}
