//! Bounded history of per-frame spectra
//!
//! Fixed number of slots, one spectrum per row. The write cursor wraps around
//! and overwrites the oldest row.

use ndarray::{aview1, Array2, ArrayView1, ArrayView2, Axis};

/// Circular store of the most recent frame spectra
#[derive(Debug, Clone)]
pub struct SpectrumHistory {
    /// Row `i` is slot `i`, not necessarily in chronological order
    slots: Array2<f64>,

    /// Next slot to overwrite
    cursor: usize,

    /// Frames written since creation or the last clear
    written: u64,
}

impl SpectrumHistory {
    /// Create history with `capacity` slots of `num_bins` values each
    pub fn new(capacity: usize, num_bins: usize) -> Self {
        Self {
            slots: Array2::zeros((capacity, num_bins)),
            cursor: 0,
            written: 0,
        }
    }

    /// Store a copy of `spectrum` in the oldest slot
    pub fn push(&mut self, spectrum: &[f64]) {
        self.slots.row_mut(self.cursor).assign(&aview1(spectrum));
        self.cursor = (self.cursor + 1) % self.capacity();
        self.written += 1;
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.nrows()
    }

    /// Number of slots holding a real spectrum
    pub fn len(&self) -> usize {
        self.written.min(self.capacity() as u64) as usize
    }

    /// True until the first frame lands
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Slot the next frame will be written to
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Spectrum `age` frames back (0 = newest)
    pub fn get(&self, age: usize) -> Option<ArrayView1<'_, f64>> {
        if age >= self.len() {
            return None;
        }
        let capacity = self.capacity();
        let slot = (self.cursor + capacity - 1 - age) % capacity;
        Some(self.slots.row(slot))
    }

    /// Up to `n` most recent spectra, newest first
    pub fn latest(&self, n: usize) -> impl Iterator<Item = ArrayView1<'_, f64>> + '_ {
        (0..n.min(self.len())).filter_map(move |age| self.get(age))
    }

    /// Raw storage in slot order
    pub fn as_array(&self) -> ArrayView2<'_, f64> {
        self.slots.view()
    }

    /// Chronological copy of the filled slots, oldest row first
    pub fn to_array(&self) -> Array2<f64> {
        let len = self.len();
        let mut ordered = Array2::zeros((len, self.slots.ncols()));
        for (mut row, age) in ordered.axis_iter_mut(Axis(0)).zip((0..len).rev()) {
            if let Some(spectrum) = self.get(age) {
                row.assign(&spectrum);
            }
        }
        ordered
    }

    /// Zero every slot and rewind
    pub fn clear(&mut self) {
        self.slots.fill(0.0);
        self.cursor = 0;
        self.written = 0;
    }
}
