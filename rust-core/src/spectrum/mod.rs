//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;
pub mod windowing;

pub use analysis::{packed_to_power, FrameProcessor};
pub use fft::{RealFft, RealFftEngine};
pub use windowing::{normalized_window, WindowType};
