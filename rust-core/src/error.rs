//! Error types for the streaming STFT engine

use crate::stft::FeedReport;
use thiserror::Error;

/// Main error type for the STFT engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("FFT failed: {0}")]
    Transform(String),

    /// A feed stopped at a failed frame. `report` covers the work done up to
    /// and including that frame; resume from `samples[report.accepted..]`.
    #[error("feed stopped after {} samples: {}", .report.accepted, .source)]
    Interrupted {
        report: FeedReport,
        #[source]
        source: Box<StftError>,
    },
}

/// Configuration errors (always fatal, raised at construction time)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read configuration: {0}")]
    Io(String),

    #[error("FFT length {actual} does not match frame length {expected}")]
    FftLengthMismatch { expected: usize, actual: usize },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, value: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Raised when a feed asks for more samples than the slice holds.
///
/// Not fatal: the engine clamps to what is available and keeps streaming.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("requested {requested} samples but only {available} were supplied")]
pub struct OverflowWarning {
    pub requested: usize,
    pub available: usize,
}

pub type Result<T> = std::result::Result<T, StftError>;
