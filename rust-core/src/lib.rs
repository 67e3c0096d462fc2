//! STFT Stream - Streaming Short-Time Fourier Transform Core
//!
//! Turns a continuous stream of mono PCM samples into running power spectra:
//! 50%-overlapping Blackman-Harris frames, averaged between polls, with a short
//! per-frame history.
//!
//! # Example
//!
//! ```
//! use stft_stream::{Stft, StftConfig};
//!
//! let mut stft = Stft::new(StftConfig::new(1024, 4096)).unwrap();
//! stft.feed(&[0i16; 4096]).unwrap();
//!
//! let frames = stft.frames_since_query();
//! let spectrum = stft.amplitude_spectrum();
//! assert_eq!(frames, 7);
//! assert_eq!(spectrum.len(), 513);
//! ```

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod config;
pub mod error;
pub mod spectrum;
pub mod stft;
pub mod stream;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use config::StftConfig;
pub use error::{ConfigError, OverflowWarning, Result, StftError};
pub use spectrum::{RealFft, RealFftEngine, WindowType};
pub use stft::{FeedReport, Sample, SpectrumHistory, Stft};
pub use stream::{SampleQueue, SharedStft};
