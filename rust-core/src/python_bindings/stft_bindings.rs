//! Python bindings for the streaming STFT

use crate::config::StftConfig;
use crate::error::StftError;
use crate::spectrum::WindowType;
use crate::stft::Stft;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1};
use pyo3::exceptions::{PyRuntimeError, PyRuntimeWarning, PyValueError};
use pyo3::prelude::*;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    BlackmanHarris,
    Blackman,
    Hann,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::BlackmanHarris => WindowType::BlackmanHarris,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

fn to_py_err(err: StftError) -> PyErr {
    match err {
        StftError::Config(e) => PyValueError::new_err(e.to_string()),
        StftError::Transform(msg) => PyRuntimeError::new_err(msg),
        err @ StftError::Interrupted { .. } => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Streaming STFT exposed to Python
#[pyclass(name = "Stft")]
pub struct PyStft {
    stft: Stft,
}

#[pymethods]
impl PyStft {
    /// Create a new streaming STFT
    ///
    /// Args:
    ///     frame_length: Frame length in samples (power of 2, at least 2)
    ///     min_feed_size: Expected samples per feed, sizes the history
    ///     sample_rate: Sample rate in Hz, for the frequency axis
    ///     window_type: Analysis window
    #[new]
    #[pyo3(signature = (frame_length, min_feed_size=1, sample_rate=48000.0, window_type=PyWindowType::BlackmanHarris))]
    fn new(
        frame_length: usize,
        min_feed_size: usize,
        sample_rate: f64,
        window_type: PyWindowType,
    ) -> PyResult<Self> {
        let config = StftConfig {
            frame_length,
            min_feed_size,
            sample_rate,
            window: window_type.into(),
        };

        Ok(Self {
            stft: Stft::new(config).map_err(to_py_err)?,
        })
    }

    /// Feed 16-bit PCM samples
    ///
    /// Args:
    ///     samples: int16 numpy array
    ///     count: Number of samples to use (default: all). Larger than the
    ///         array raises a RuntimeWarning and uses the whole array.
    ///
    /// Returns:
    ///     Number of frames completed
    #[pyo3(signature = (samples, count=None))]
    fn feed(
        &mut self,
        py: Python<'_>,
        samples: PyReadonlyArray1<i16>,
        count: Option<usize>,
    ) -> PyResult<usize> {
        let samples = samples
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let count = count.unwrap_or(samples.len());

        let report = self.stft.feed_count(samples, count).map_err(to_py_err)?;
        if let Some(warning) = report.overflow {
            PyErr::warn(py, py.get_type::<PyRuntimeWarning>(), &warning.to_string(), 1)?;
        }

        Ok(report.frames_completed)
    }

    /// Average power spectrum since the previous query
    fn amplitude_spectrum<'py>(&mut self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.stft.amplitude_spectrum())
    }

    /// Average power spectrum since the previous query, in dB
    fn amplitude_spectrum_db<'py>(&mut self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.stft.amplitude_spectrum_db())
    }

    /// Frames analyzed since the previous query
    fn frames_since_query(&self) -> usize {
        self.stft.frames_since_query()
    }

    /// Drop buffered samples, pending frames and history
    fn clear(&mut self) {
        self.stft.clear();
    }

    /// Per-frame spectra, oldest row first
    fn history<'py>(&self, py: Python<'py>) -> &'py PyArray2<f64> {
        self.stft.history().to_array().into_pyarray(py)
    }

    /// Get frequency bins in Hz
    fn frequency_bins_hz<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.stft.frequency_bins_hz())
    }

    /// Get number of frequency bins
    fn num_bins(&self) -> usize {
        self.stft.num_bins()
    }

    /// Get frame length
    fn frame_length(&self) -> usize {
        self.stft.frame_length()
    }
}
