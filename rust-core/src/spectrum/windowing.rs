//! Analysis windows for the STFT
//!
//! Windows are applied to each frame before the FFT to reduce spectral leakage.
//! Every window is rescaled to unit mean so the average signal energy survives
//! windowing unchanged.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    /// Four-term Blackman-Harris:
    /// w[n] = 0.35875 - 0.48829*cos(2πn/(L-1)) + 0.14128*cos(4πn/(L-1)) - 0.01168*cos(6πn/(L-1))
    /// Sidelobe attenuation: ~92 dB
    #[default]
    BlackmanHarris,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(L-1)) + 0.08*cos(4πn/(L-1))
    /// Sidelobe attenuation: ~58 dB
    Blackman,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(L-1))
    /// Sidelobe attenuation: ~31 dB
    Hann,

    /// Rectangular window (no windowing)
    Rectangular,
}

impl WindowType {
    /// Nominal peak sidelobe level in dB
    pub fn sidelobe_level_db(&self) -> f64 {
        match self {
            WindowType::BlackmanHarris => -92.0,
            WindowType::Blackman => -58.0,
            WindowType::Hann => -31.5,
            WindowType::Rectangular => -13.3,
        }
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowType::BlackmanHarris => write!(f, "blackman_harris"),
            WindowType::Blackman => write!(f, "blackman"),
            WindowType::Hann => write!(f, "hann"),
            WindowType::Rectangular => write!(f, "rectangular"),
        }
    }
}

/// Generate raw (unnormalized) window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (L), must be at least 2
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..L-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    let span = (length as f64 - 1.0).max(1.0);

    match window_type {
        WindowType::BlackmanHarris => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / span;
                (0.35875 - 0.48829 * angle.cos() + 0.14128 * (2.0 * angle).cos()
                    - 0.01168 * (3.0 * angle).cos())
                    * 2.0
            })
            .collect(),

        WindowType::Blackman => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / span;
                0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos()
            })
            .collect(),

        WindowType::Hann => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / span;
                0.5 - 0.5 * angle.cos()
            })
            .collect(),

        WindowType::Rectangular => vec![1.0; length],
    }
}

/// Calculate window correction factor
///
/// Multiplying the window by this factor makes its mean exactly 1.
pub fn window_correction_factor(window: &[f64]) -> f64 {
    let sum: f64 = window.iter().sum();
    window.len() as f64 / sum
}

/// Generate a window rescaled to unit mean (sum == length)
pub fn normalized_window(window_type: WindowType, length: usize) -> Vec<f64> {
    let mut window = generate_window(window_type, length);
    let factor = window_correction_factor(&window);
    for w in window.iter_mut() {
        *w *= factor;
    }
    window
}

/// Apply window into a separate output buffer (zero-allocation)
pub fn apply_window_into(signal: &[f64], window: &[f64], output: &mut [f64]) {
    for ((out, &s), &w) in output.iter_mut().zip(signal).zip(window) {
        *out = s * w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(window: &[f64]) -> f64 {
        window.iter().sum::<f64>() / window.len() as f64
    }

    #[test]
    fn test_normalized_window_has_unit_mean() {
        for &length in &[2, 8, 64, 1024, 8192] {
            for window_type in [
                WindowType::BlackmanHarris,
                WindowType::Blackman,
                WindowType::Hann,
                WindowType::Rectangular,
            ] {
                let window = normalized_window(window_type, length);
                assert_eq!(window.len(), length);
                assert!(
                    (mean(&window) - 1.0).abs() < 1e-12,
                    "{} window of length {} has mean {}",
                    window_type,
                    length,
                    mean(&window)
                );
            }
        }
    }

    #[test]
    fn test_blackman_harris_shape() {
        let length = 129;
        let window = generate_window(WindowType::BlackmanHarris, length);

        // Endpoints: (0.35875 - 0.48829 + 0.14128 - 0.01168) * 2
        assert!((window[0] - 0.00012).abs() < 1e-10);
        assert!((window[0] - window[length - 1]).abs() < 1e-10);

        // Peak at the center: (0.35875 + 0.48829 + 0.14128 + 0.01168) * 2
        assert!((window[length / 2] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_window_symmetry() {
        let window = normalized_window(WindowType::BlackmanHarris, 256);
        for n in 0..128 {
            assert!((window[n] - window[255 - n]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sidelobe_ordering() {
        assert!(
            WindowType::BlackmanHarris.sidelobe_level_db() < WindowType::Blackman.sidelobe_level_db()
        );
        assert!(WindowType::Blackman.sidelobe_level_db() < WindowType::Hann.sidelobe_level_db());
        assert!(
            WindowType::Hann.sidelobe_level_db() < WindowType::Rectangular.sidelobe_level_db()
        );
        assert_eq!(WindowType::default(), WindowType::BlackmanHarris);
    }

    #[test]
    fn test_apply_window_into() {
        let signal = vec![0.5; 4];
        let window = vec![0.0, 1.0, 2.0, 1.0];
        let mut output = vec![0.0; 4];
        apply_window_into(&signal, &window, &mut output);
        assert_eq!(output, vec![0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_correction_factor() {
        let rect = generate_window(WindowType::Rectangular, 100);
        let hann = generate_window(WindowType::Hann, 100);

        assert!((window_correction_factor(&rect) - 1.0).abs() < 1e-12);

        // Hann averages to ~0.5, so the correction is ~2
        let factor = window_correction_factor(&hann);
        assert!(factor > 1.9 && factor < 2.1);
    }
}
