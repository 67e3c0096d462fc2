//! Thread-safe handle to an STFT engine
//!
//! For setups where a capture thread feeds samples while a display thread
//! polls spectra. Every call takes the lock for its whole duration, and
//! queries hand back owned copies.

use crate::error::Result;
use crate::stft::{FeedReport, Sample, Stft};
use ndarray::Array2;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, lock-protected [`Stft`]
#[derive(Clone)]
pub struct SharedStft {
    inner: Arc<Mutex<Stft>>,
}

impl SharedStft {
    /// Wrap an engine
    pub fn new(stft: Stft) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stft)),
        }
    }

    // Every operation leaves the engine consistent, so a panic on another
    // thread does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, Stft> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// See [`Stft::feed`]
    pub fn feed<S: Sample>(&self, samples: &[S]) -> Result<FeedReport> {
        self.lock().feed(samples)
    }

    /// See [`Stft::feed_count`]
    pub fn feed_count<S: Sample>(&self, samples: &[S], count: usize) -> Result<FeedReport> {
        self.lock().feed_count(samples, count)
    }

    /// See [`Stft::amplitude_spectrum`]
    pub fn amplitude_spectrum(&self) -> Vec<f64> {
        self.lock().amplitude_spectrum().to_vec()
    }

    /// See [`Stft::amplitude_spectrum_db`]
    pub fn amplitude_spectrum_db(&self) -> Vec<f64> {
        self.lock().amplitude_spectrum_db().to_vec()
    }

    /// Frame count and averaged spectrum taken under one lock
    pub fn poll(&self) -> (usize, Vec<f64>) {
        let mut stft = self.lock();
        let frames = stft.frames_since_query();
        (frames, stft.amplitude_spectrum().to_vec())
    }

    /// See [`Stft::frames_since_query`]
    pub fn frames_since_query(&self) -> usize {
        self.lock().frames_since_query()
    }

    /// See [`Stft::clear`]
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Chronological copy of the per-frame history, oldest row first
    pub fn history(&self) -> Array2<f64> {
        self.lock().history().to_array()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut Stft) -> R) -> R {
        let mut stft = self.lock();
        f(&mut *stft)
    }
}
