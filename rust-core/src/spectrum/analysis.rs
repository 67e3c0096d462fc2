//! Per-frame spectrum analysis
//!
//! Combines the analysis window with the FFT capability and folds the packed
//! transform output into a single-sided power spectrum.

use super::fft::RealFft;
use super::windowing::{apply_window_into, normalized_window, WindowType};
use crate::error::{ConfigError, Result};

/// Turns one time-domain frame into one power spectrum
pub struct FrameProcessor {
    /// Unit-mean analysis window
    window: Vec<f64>,

    /// Windowed frame, transformed in place
    scratch: Vec<f64>,

    fft: Box<dyn RealFft + Send>,
}

impl FrameProcessor {
    /// Create new frame processor
    ///
    /// Fails if the FFT length differs from the frame length.
    pub fn new(
        frame_length: usize,
        window_type: WindowType,
        fft: Box<dyn RealFft + Send>,
    ) -> std::result::Result<Self, ConfigError> {
        if fft.len() != frame_length {
            return Err(ConfigError::FftLengthMismatch {
                expected: frame_length,
                actual: fft.len(),
            });
        }

        Ok(Self {
            window: normalized_window(window_type, frame_length),
            scratch: vec![0.0; frame_length],
            fft,
        })
    }

    /// Window, transform and convert `frame` into `spectrum`
    ///
    /// `spectrum` must hold `frame.len() / 2 + 1` bins.
    pub fn process(&mut self, frame: &[f64], spectrum: &mut [f64]) -> Result<()> {
        apply_window_into(frame, &self.window, &mut self.scratch);
        self.fft.forward(&mut self.scratch)?;
        packed_to_power(&self.scratch, spectrum);
        Ok(())
    }

    /// Analysis window coefficients
    pub fn window(&self) -> &[f64] {
        &self.window
    }
}

/// Convert a packed real FFT into a single-sided power spectrum
///
/// Interior bins are doubled to account for the folded negative frequencies.
/// DC and Nyquist have no mirror image, hence the extra `/ 4`.
pub fn packed_to_power(packed: &[f64], spectrum: &mut [f64]) {
    let n = packed.len();
    let scale = 2.0 * 2.0 / (n as f64 * n as f64);

    spectrum[0] = packed[0] * packed[0] * scale / 4.0;
    for (j, bin) in spectrum[1..n / 2].iter_mut().enumerate() {
        let re = packed[2 * j + 1];
        let im = packed[2 * j + 2];
        *bin = (re * re + im * im) * scale;
    }
    spectrum[n / 2] = packed[n - 1] * packed[n - 1] * scale / 4.0;
}
