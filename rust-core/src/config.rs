//! STFT engine configuration

use crate::error::ConfigError;
use crate::spectrum::WindowType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// STFT engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StftConfig {
    /// Frame (and FFT) length in samples, power of 2
    pub frame_length: usize,

    /// Largest number of samples the caller expects to feed between polls.
    /// Sizes the per-frame history ring.
    pub min_feed_size: usize,

    /// Sample rate in Hz, only used for the frequency axis
    pub sample_rate: f64,

    /// Analysis window
    pub window: WindowType,
}

impl Default for StftConfig {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            min_feed_size: 1,
            sample_rate: 48000.0,
            window: WindowType::BlackmanHarris,
        }
    }
}

impl StftConfig {
    /// Config with the given frame length and history sizing, defaults elsewhere
    pub fn new(frame_length: usize, min_feed_size: usize) -> Self {
        Self {
            frame_length,
            min_feed_size,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
            _ => ConfigError::Io(format!("{}: {}", path.display(), e)),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every construction-time invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Window formula divides by (L - 1), so a single-sample frame is out too
        if !self.frame_length.is_power_of_two() || self.frame_length < 2 {
            return Err(ConfigError::invalid("frame_length", self.frame_length));
        }
        if self.min_feed_size < 1 {
            return Err(ConfigError::invalid("min_feed_size", self.min_feed_size));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::invalid("sample_rate", self.sample_rate));
        }
        Ok(())
    }

    /// Samples consumed per hop (half a frame, 50% overlap)
    pub fn hop_length(&self) -> usize {
        self.frame_length / 2
    }

    /// Number of frequency bins (frame_length/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.frame_length / 2 + 1
    }

    /// Number of per-frame spectra kept in history
    pub fn history_size(&self) -> usize {
        self.min_feed_size.div_ceil(self.hop_length())
    }
}
