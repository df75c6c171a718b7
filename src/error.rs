use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pattern modules and the config loader.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("unknown database backend '{0}' (expected mysql or postgresql)")]
    UnknownDatabase(String),

    #[error("unknown observer '{0}' (expected stock or food)")]
    UnknownObserver(String),

    #[error("observer '{observer}' failed: {reason}")]
    ObserverFailed { observer: String, reason: String },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl PatternError {
    pub fn observer_failed(observer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ObserverFailed {
            observer: observer.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PatternError::UnknownDatabase("oracle".to_string());
        assert_eq!(
            err.to_string(),
            "unknown database backend 'oracle' (expected mysql or postgresql)"
        );

        let err = PatternError::observer_failed("stock", "market closed");
        assert_eq!(err.to_string(), "observer 'stock' failed: market closed");
    }

    #[test]
    fn test_io_error_converts_to_output() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PatternError = io.into();
        assert!(matches!(err, PatternError::Output(_)));
    }
}
