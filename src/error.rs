use std::fmt;
use thiserror::Error;

/// Structured error context for configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "runner.limit")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "env", "config_file")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Producer {index} failed in wave {wave}: {message}")]
    Wave {
        wave: usize,
        index: usize,
        message: String,
    },

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// A producer failure inside a wave.
///
/// Runner functions stay generic over the producer's error type; this wrapper
/// records where in the input the failure happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveError<E> {
    /// Zero-based wave number.
    pub wave: usize,
    /// Zero-based index of the failing producer in the input sequence.
    pub index: usize,
    pub source: E,
}

impl<E> WaveError<E> {
    pub fn new(wave: usize, index: usize, source: E) -> Self {
        Self {
            wave,
            index,
            source,
        }
    }

    pub fn into_inner(self) -> E {
        self.source
    }
}

impl<E: fmt::Display> fmt::Display for WaveError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "producer {} failed in wave {}: {}",
            self.index, self.wave, self.source
        )
    }
}

impl<E> std::error::Error for WaveError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl<E: fmt::Display> From<WaveError<E>> for Error {
    fn from(e: WaveError<E>) -> Self {
        Error::Wave {
            wave: e.wave,
            index: e.index,
            message: e.source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display_includes_context() {
        let err = Error::configuration_with_context(
            "limit must be at least 1",
            ErrorContext::new()
                .with_field_path("runner.limit")
                .with_source("env"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: limit must be at least 1 (field: runner.limit, source: env)"
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("runner.limit")
        );
    }

    #[test]
    fn test_error_without_context_has_no_suffix() {
        let err = Error::configuration_with_context("empty", ErrorContext::default());
        assert_eq!(err.to_string(), "Configuration error: empty");
    }

    #[test]
    fn test_wave_error_converts_into_error() {
        let wave_err = WaveError::new(2, 5, "connection reset");
        assert_eq!(
            wave_err.to_string(),
            "producer 5 failed in wave 2: connection reset"
        );

        let err: Error = wave_err.into();
        match err {
            Error::Wave {
                wave,
                index,
                ref message,
            } => {
                assert_eq!(wave, 2);
                assert_eq!(index, 5);
                assert_eq!(message, "connection reset");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.context().is_none());
    }

    #[test]
    fn test_wave_error_exposes_producer_error_as_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file3.pdf");
        let wave_err = WaveError::new(1, 2, io);
        let source = wave_err.source().expect("producer error is the source");
        assert_eq!(source.to_string(), "file3.pdf");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
}
