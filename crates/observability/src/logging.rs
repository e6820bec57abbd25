//! Subscriber initialization.
//!
//! `init()` keeps the usual behaviour: JSON lines with timestamps, filtered by
//! `RUST_LOG` (default `info`). `init_with` takes the filter and format
//! explicitly, e.g. pretty output for a local test run.

use core::str::FromStr;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::ObservabilityError;

/// Filter used when `RUST_LOG` is unset or unreadable.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ObservabilityError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `"info,cloudmodel_service=debug"`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    /// Filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
    pub fn from_env() -> Self {
        let filter = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        EnvFilter::try_new(&self.filter).map_err(|err| ObservabilityError::InvalidFilter {
            filter: self.filter.clone(),
            reason: err.to_string(),
        })
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). An unparsable
/// `RUST_LOG` falls back to the default filter.
pub fn init() {
    let config = LogConfig::from_env();
    if init_with(&config).is_err() {
        let _ = init_with(&LogConfig::default());
    }
}

/// Initialize with an explicit configuration.
///
/// Returns an error only for an invalid filter. If a global subscriber is
/// already installed the call does nothing.
pub fn init_with(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = config.env_filter()?;

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_target(true)
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_json_at_info() {
        let config = LogConfig::default();
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!(" json ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(
            "xml".parse::<LogFormat>(),
            Err(ObservabilityError::UnknownFormat("xml".to_string()))
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: LogConfig = serde_json::from_str(r#"{ "format": "pretty" }"#).unwrap();
        assert_eq!(config, LogConfig::default().with_format(LogFormat::Pretty));
    }

    #[test]
    fn invalid_filter_is_rejected_before_install() {
        let config = LogConfig {
            filter: "cloudmodel=loudest".to_string(),
            format: LogFormat::Json,
        };
        let err = init_with(&config).unwrap_err();
        assert!(matches!(err, ObservabilityError::InvalidFilter { .. }));
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        init();
        init();
        assert!(init_with(&LogConfig::default().with_format(LogFormat::Pretty)).is_ok());
    }
}
