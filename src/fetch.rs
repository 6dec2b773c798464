//! Simulated file fetches.
//!
//! Stand-in producers with a fixed latency, used by the demo binary and the
//! tests to exercise wave scheduling and races.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const PLACEHOLDER_BODY: &str = "...";
pub const PLACEHOLDER_SIZE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub body: String,
    pub size: u64,
}

impl FileRecord {
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: PLACEHOLDER_BODY.to_string(),
            size: PLACEHOLDER_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("file not found: {0}")]
    NotFound(String),
}

/// Resolve to `value` after `duration`.
pub async fn delay<T>(duration: Duration, value: T) -> T {
    tokio::time::sleep(duration).await;
    value
}

/// Fetch a file that always exists.
pub async fn fetch_file(name: impl Into<String>, latency: Duration) -> FileRecord {
    let name = name.into();
    info!(file = %name, "fetching");
    delay(latency, FileRecord::placeholder(name)).await
}

/// Fetcher with a configurable latency and a set of names that fail.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    latency: Duration,
    missing: HashSet<String>,
}

impl FileFetcher {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            missing: HashSet::new(),
        }
    }

    pub fn with_missing(mut self, name: impl Into<String>) -> Self {
        self.missing.insert(name.into());
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Fails with [`FetchError::NotFound`] after the usual latency.
    pub async fn fetch(&self, name: impl Into<String>) -> Result<FileRecord, FetchError> {
        let name = name.into();
        info!(file = %name, "fetching");
        tokio::time::sleep(self.latency).await;
        if self.missing.contains(&name) {
            Err(FetchError::NotFound(name))
        } else {
            Ok(FileRecord::placeholder(name))
        }
    }
}

/// The six files of the demo scenario.
pub fn demo_file_names() -> Vec<String> {
    ["file1.png", "file2.ppt", "file3.pdf", "file4.jpg", "file5.gif", "file6.jpeg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
