//! Runner configuration.
//!
//! Values come from (lowest to highest precedence) built-in defaults, an
//! optional YAML or JSON file, and `WAVE_BATCH_*` environment variables.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LIMIT: usize = 2;
pub const DEFAULT_FETCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_RACE_TIMEOUT_MS: u64 = 4000;
pub const DEFAULT_LOADING_TIMEOUT_MS: u64 = 1000;

/// Path to an optional config file, read by [`RunnerConfig::load`].
pub const CONFIG_PATH_ENV: &str = "WAVE_BATCH_CONFIG";
pub const LIMIT_ENV: &str = "WAVE_BATCH_LIMIT";
pub const FETCH_DELAY_ENV: &str = "WAVE_BATCH_FETCH_DELAY_MS";
pub const RACE_TIMEOUT_ENV: &str = "WAVE_BATCH_RACE_TIMEOUT_MS";
pub const LOADING_TIMEOUT_ENV: &str = "WAVE_BATCH_LOADING_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Maximum producers in flight per wave.
    pub limit: usize,
    /// Simulated latency of one file fetch.
    pub fetch_delay_ms: u64,
    /// Sentinel delay for the "check your network" race.
    pub race_timeout_ms: u64,
    /// Sentinel delay for the "show a loading state" race.
    pub loading_timeout_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
            race_timeout_ms: DEFAULT_RACE_TIMEOUT_MS,
            loading_timeout_ms: DEFAULT_LOADING_TIMEOUT_MS,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
    pub fn with_fetch_delay(mut self, d: Duration) -> Self {
        self.fetch_delay_ms = saturating_millis(d);
        self
    }
    pub fn with_race_timeout(mut self, d: Duration) -> Self {
        self.race_timeout_ms = saturating_millis(d);
        self
    }
    pub fn with_loading_timeout(mut self, d: Duration) -> Self {
        self.loading_timeout_ms = saturating_millis(d);
        self
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
    pub fn race_timeout(&self) -> Duration {
        Duration::from_millis(self.race_timeout_ms)
    }
    pub fn loading_timeout(&self) -> Duration {
        Duration::from_millis(self.loading_timeout_ms)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a file, choosing the format by extension (`.json`, otherwise YAML).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Apply `WAVE_BATCH_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, LIMIT_ENV)? {
            self.limit = usize::try_from(v).map_err(|e| {
                Error::configuration_with_context(
                    format!("limit {} does not fit in usize", v),
                    ErrorContext::new()
                        .with_field_path(LIMIT_ENV)
                        .with_details(e.to_string())
                        .with_source("env"),
                )
            })?;
        }
        if let Some(v) = parse_var(&lookup, FETCH_DELAY_ENV)? {
            self.fetch_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, RACE_TIMEOUT_ENV)? {
            self.race_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, LOADING_TIMEOUT_ENV)? {
            self.loading_timeout_ms = v;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::configuration_with_context(
                "limit must be at least 1",
                ErrorContext::new()
                    .with_field_path("limit")
                    .with_details("got 0"),
            ));
        }
        Ok(())
    }

    /// Defaults, then the file named by `WAVE_BATCH_CONFIG` (if set), then
    /// environment overrides; validated.
    pub fn load() -> Result<Self> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim())?,
            _ => Self::default(),
        };
        let cfg = base.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn parse_var<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid value {:?}", raw),
                ErrorContext::new()
                    .with_field_path(key)
                    .with_details(e.to_string())
                    .with_source("env"),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.limit, 2);
        assert_eq!(cfg.fetch_delay(), Duration::from_secs(1));
        assert_eq!(cfg.race_timeout(), Duration::from_secs(4));
        assert_eq!(cfg.loading_timeout(), Duration::from_secs(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let cfg = RunnerConfig::new()
            .with_limit(3)
            .with_fetch_delay(Duration::from_millis(250))
            .with_race_timeout(Duration::from_millis(900))
            .with_loading_timeout(Duration::from_millis(100));
        assert_eq!(cfg.limit, 3);
        assert_eq!(cfg.fetch_delay_ms, 250);
        assert_eq!(cfg.race_timeout_ms, 900);
        assert_eq!(cfg.loading_timeout_ms, 100);
    }

    #[test]
    fn test_builder_saturates_huge_durations() {
        let cfg = RunnerConfig::new().with_race_timeout(Duration::MAX);
        assert_eq!(cfg.race_timeout_ms, u64::MAX);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let cfg = RunnerConfig::from_yaml_str("limit: 4\nfetch_delay_ms: 10\n").unwrap();
        assert_eq!(cfg.limit, 4);
        assert_eq!(cfg.fetch_delay_ms, 10);
        assert_eq!(cfg.race_timeout_ms, DEFAULT_RACE_TIMEOUT_MS);
    }

    #[test]
    fn test_json() {
        let cfg = RunnerConfig::from_json_str(r#"{"limit": 6, "race_timeout_ms": 50}"#).unwrap();
        assert_eq!(cfg.limit, 6);
        assert_eq!(cfg.race_timeout_ms, 50);
        assert_eq!(cfg.loading_timeout_ms, DEFAULT_LOADING_TIMEOUT_MS);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = RunnerConfig::from_yaml_str("limit: [oops").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_env_overrides() {
        let cfg = RunnerConfig::default()
            .apply_env_with(lookup(&[
                (LIMIT_ENV, "5"),
                (FETCH_DELAY_ENV, " 20 "),
                (RACE_TIMEOUT_ENV, ""),
            ]))
            .unwrap();
        assert_eq!(cfg.limit, 5);
        assert_eq!(cfg.fetch_delay_ms, 20);
        assert_eq!(cfg.race_timeout_ms, DEFAULT_RACE_TIMEOUT_MS);
    }

    #[test]
    fn test_env_parse_error_carries_field() {
        let err = RunnerConfig::default()
            .apply_env_with(lookup(&[(LIMIT_ENV, "many")]))
            .unwrap_err();
        let ctx = err.context().expect("configuration error has context");
        assert_eq!(ctx.field_path.as_deref(), Some(LIMIT_ENV));
        assert_eq!(ctx.source.as_deref(), Some("env"));
    }

    #[test]
    fn test_env_limit_must_fit_usize() {
        let max = u64::MAX.to_string();
        let result = RunnerConfig::default().apply_env_with(lookup(&[(LIMIT_ENV, max.as_str())]));
        if usize::BITS >= u64::BITS {
            assert_eq!(result.unwrap().limit, usize::MAX);
        } else {
            let err = result.unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }));
            assert!(err.to_string().contains("does not fit in usize"));
        }
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = RunnerConfig::new().with_limit(0).validate().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("limit must be at least 1"));
    }
}
