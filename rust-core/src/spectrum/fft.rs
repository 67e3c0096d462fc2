//! FFT engine using realfft for real-valued signals
//!
//! The STFT only needs one capability from the transform: an in-place real FFT
//! over a fixed power-of-two buffer, written back in packed form:
//!
//! ```text
//! [ re(0), re(1), im(1), re(2), im(2), ..., re(L/2-1), im(L/2-1), re(L/2) ]
//! ```
//!
//! DC and Nyquist are purely real for real input, so the half spectrum fits in
//! exactly `L` values.

use crate::error::{Result, StftError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// In-place real FFT with packed output
pub trait RealFft {
    /// Transform length (number of real samples)
    fn len(&self) -> usize;

    /// Transform `buffer` in place into the packed layout.
    ///
    /// `buffer.len()` must equal [`RealFft::len`].
    fn forward(&mut self, buffer: &mut [f64]) -> Result<()>;
}

/// FFT engine for real-valued signals
pub struct RealFftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable output buffer (complex half spectrum)
    output_buffer: Vec<Complex<f64>>,

    /// Reusable scratch for the planner's algorithm
    scratch: Vec<Complex<f64>>,
}

impl RealFftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let output_buffer = r2c.make_output_vec();
        let scratch = r2c.make_scratch_vec();

        Self {
            fft_size,
            r2c,
            output_buffer,
            scratch,
        }
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

impl RealFft for RealFftEngine {
    fn len(&self) -> usize {
        self.fft_size
    }

    fn forward(&mut self, buffer: &mut [f64]) -> Result<()> {
        if buffer.len() != self.fft_size {
            return Err(StftError::Transform(format!(
                "buffer holds {} samples, transform expects {}",
                buffer.len(),
                self.fft_size
            )));
        }

        self.r2c
            .process_with_scratch(buffer, &mut self.output_buffer, &mut self.scratch)
            .map_err(|e| StftError::Transform(e.to_string()))?;

        pack_half_spectrum(&self.output_buffer, buffer);
        Ok(())
    }
}

/// Pack a complex half spectrum (`L/2 + 1` bins) into `L` reals
pub fn pack_half_spectrum(spectrum: &[Complex<f64>], packed: &mut [f64]) {
    let n = packed.len();
    let half = n / 2;

    packed[0] = spectrum[0].re;
    for k in 1..half {
        packed[2 * k - 1] = spectrum[k].re;
        packed[2 * k] = spectrum[k].im;
    }
    packed[n - 1] = spectrum[half].re;
}
