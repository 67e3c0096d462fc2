//! Running spectral sum between polls
//!
//! Frames are summed until someone asks for the spectrum. The query divides by
//! the frame count, caches the average (and its dB form), and starts over. A
//! query with nothing new returns the cached pair unchanged.

/// Spectrum sum plus cached averages
#[derive(Debug, Clone)]
pub struct SpectralAccumulator {
    sum: Vec<f64>,
    frames: usize,

    /// Last averaged linear spectrum
    linear: Vec<f64>,

    /// 10*log10 of `linear`, refreshed with it
    decibel: Vec<f64>,
}

impl SpectralAccumulator {
    /// Create new accumulator for spectra of `num_bins` values
    pub fn new(num_bins: usize) -> Self {
        Self {
            sum: vec![0.0; num_bins],
            frames: 0,
            linear: vec![0.0; num_bins],
            decibel: vec![f64::NEG_INFINITY; num_bins],
        }
    }

    /// Fold one frame spectrum into the running sum
    pub fn add(&mut self, spectrum: &[f64]) {
        for (acc, &p) in self.sum.iter_mut().zip(spectrum) {
            *acc += p;
        }
        self.frames += 1;
    }

    /// Frames added since the last query
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Average the pending frames into the cache, if there are any
    fn refresh(&mut self) {
        if self.frames == 0 {
            return;
        }

        let count = self.frames as f64;
        for ((out, db), acc) in self
            .linear
            .iter_mut()
            .zip(self.decibel.iter_mut())
            .zip(self.sum.iter_mut())
        {
            *out = *acc / count;
            *db = 10.0 * out.log10();
            *acc = 0.0;
        }
        self.frames = 0;
    }

    /// Average linear spectrum since the previous query
    pub fn linear(&mut self) -> &[f64] {
        self.refresh();
        &self.linear
    }

    /// Average spectrum since the previous query, in dB
    pub fn decibel(&mut self) -> &[f64] {
        self.refresh();
        &self.decibel
    }

    /// Drop the running sum, the pending count and the cached averages
    pub fn clear(&mut self) {
        self.sum.fill(0.0);
        self.frames = 0;
        self.linear.fill(0.0);
        self.decibel.fill(f64::NEG_INFINITY);
    }
}
